/* src/nut/resolver/src/resolver.rs */

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use nut_compiler::{FruitError, NutParser, NutParserError, ViewToken, fruit};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::{NutConfig, nut_name};
use crate::store::{FsStore, TemplateStore};

#[derive(Debug, Error)]
pub enum ResolveError {
  #[error("Nut file: {name} does not exists")]
  NotExists { name: String, path: PathBuf },

  #[error("failed to read {}: {source}", .path.display())]
  Io { path: PathBuf, source: io::Error },

  #[error(transparent)]
  Parse(#[from] NutParserError),

  #[error(transparent)]
  Fruit(#[from] FruitError),
}

/// One resolved template in the in-process table.
#[derive(Debug, Clone)]
pub struct CacheEntry {
  pub view: Arc<ViewToken>,
  pub nut_path: PathBuf,
  pub fruit_path: PathBuf,
}

/// Snapshot of the resolver's counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ResolverStats {
  /// Templates compiled from source.
  pub compiled: u64,
  /// Templates decoded from an artifact on disk.
  pub decoded: u64,
  /// Resolutions answered from the in-process table.
  pub memory_hits: u64,
  /// Artifact writes skipped because the bytes were unchanged.
  pub writes_skipped: u64,
  /// Artifact writes that failed and were ignored.
  pub write_failures: u64,
}

#[derive(Debug, Default)]
struct Counters {
  compiled: AtomicU64,
  decoded: AtomicU64,
  memory_hits: AtomicU64,
  writes_skipped: AtomicU64,
  write_failures: AtomicU64,
}

fn bump(counter: &AtomicU64) {
  counter.fetch_add(1, Ordering::Relaxed);
}

/// Maps logical template names (`Views.Posts`) to compiled views, reusing
/// in-memory and on-disk artifacts while they are newer than their source.
///
/// Safe to share between threads. Two callers compiling the same name at
/// once both compile; the last one to finish owns the table entry.
pub struct Resolver {
  store: Arc<dyn TemplateStore>,
  config: NutConfig,
  entries: Mutex<HashMap<String, CacheEntry>>,
  counters: Counters,
}

impl std::fmt::Debug for Resolver {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Resolver").field("config", &self.config).field("stats", &self.stats()).finish_non_exhaustive()
  }
}

impl Resolver {
  /// Resolver over the real filesystem.
  pub fn new(config: NutConfig) -> Self {
    Self::with_store(config, Arc::new(FsStore))
  }

  pub fn with_store(config: NutConfig, store: Arc<dyn TemplateStore>) -> Self {
    Self { store, config, entries: Mutex::new(HashMap::new()), counters: Counters::default() }
  }

  pub fn config(&self) -> &NutConfig {
    &self.config
  }

  fn entries(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
    self.entries.lock().unwrap_or_else(PoisonError::into_inner)
  }

  /// Compiled view for `name`.
  ///
  /// Order of preference: the in-process entry, then a decoded artifact,
  /// then a fresh compile. The first two are used only while the artifact
  /// is strictly newer than the source.
  pub fn resolve(&self, name: &str) -> Result<Arc<ViewToken>, ResolveError> {
    let nut_path = self.config.nut_path(name);
    let fruit_path = self.config.fruit_path(name);
    let fresh = self.is_fresh(&fruit_path, &nut_path);

    if fresh && let Some(entry) = self.entries().get(name) {
      bump(&self.counters.memory_hits);
      debug!(name, "template served from memory");
      return Ok(Arc::clone(&entry.view));
    }

    if !self.store.exists(&nut_path) {
      return Err(ResolveError::NotExists { name: nut_name(name), path: nut_path });
    }

    let view = match fresh.then(|| self.decode(&fruit_path)).flatten() {
      Some(view) => view,
      None => self.compile(name, &nut_path, &fruit_path)?,
    };

    let view = Arc::new(view);
    let entry = CacheEntry { view: Arc::clone(&view), nut_path, fruit_path };
    self.entries().insert(name.to_string(), entry);
    Ok(view)
  }

  /// Artifact strictly newer than the source; false if either is missing.
  fn is_fresh(&self, fruit_path: &Path, nut_path: &Path) -> bool {
    match (self.store.modified(fruit_path), self.store.modified(nut_path)) {
      (Ok(fruit), Ok(nut)) => fruit > nut,
      _ => false,
    }
  }

  /// A fresh artifact that cannot be read or decoded is treated as absent.
  fn decode(&self, fruit_path: &Path) -> Option<ViewToken> {
    let decoded = self
      .store
      .read(fruit_path)
      .map_err(|err| err.to_string())
      .and_then(|content| fruit::decode(&content).map_err(|err| err.to_string()));
    match decoded {
      Ok(view) => {
        bump(&self.counters.decoded);
        debug!(path = %fruit_path.display(), "template decoded from artifact");
        Some(view)
      }
      Err(error) => {
        warn!(path = %fruit_path.display(), %error, "ignoring unreadable artifact, recompiling");
        None
      }
    }
  }

  fn compile(&self, name: &str, nut_path: &Path, fruit_path: &Path) -> Result<ViewToken, ResolveError> {
    let content = self.store.read(nut_path).map_err(|source| match source.kind() {
      io::ErrorKind::NotFound => ResolveError::NotExists { name: nut_name(name), path: nut_path.to_path_buf() },
      _ => ResolveError::Io { path: nut_path.to_path_buf(), source },
    })?;
    let view = NutParser::new(&content, nut_name(name)).with_date_format(&self.config.date_format).compile()?;
    bump(&self.counters.compiled);
    debug!(name, "template compiled");

    let encoded = fruit::encode(&view)?;
    self.persist(fruit_path, &encoded);
    Ok(view)
  }

  /// Best-effort artifact write. Failures are logged and counted, never returned.
  fn persist(&self, fruit_path: &Path, encoded: &str) {
    if self.store.read(fruit_path).is_ok_and(|existing| existing == encoded) {
      bump(&self.counters.writes_skipped);
      debug!(path = %fruit_path.display(), "artifact unchanged, skipping write");
      return;
    }
    if let Err(error) = self.store.write_atomic(fruit_path, encoded) {
      bump(&self.counters.write_failures);
      warn!(path = %fruit_path.display(), %error, "failed to write compiled artifact");
    }
  }

  /// Table entry for `name`, if it has been resolved before.
  pub fn entry(&self, name: &str) -> Option<CacheEntry> {
    self.entries().get(name).cloned()
  }

  /// Drop every in-process entry. Artifacts on disk are kept.
  pub fn clear(&self) {
    self.entries().clear();
  }

  /// Delete the artifact directory, recreating it empty unless `remove_root`.
  pub fn clear_fruits(&self, remove_root: bool) -> io::Result<()> {
    match self.store.remove_dir_all(&self.config.fruits) {
      Err(err) if err.kind() != io::ErrorKind::NotFound => return Err(err),
      _ => {}
    }
    if !remove_root {
      self.store.create_dir_all(&self.config.fruits)?;
    }
    debug!(path = %self.config.fruits.display(), remove_root, "cleared artifacts");
    Ok(())
  }

  pub fn stats(&self) -> ResolverStats {
    let load = |counter: &AtomicU64| counter.load(Ordering::Relaxed);
    ResolverStats {
      compiled: load(&self.counters.compiled),
      decoded: load(&self.counters.decoded),
      memory_hits: load(&self.counters.memory_hits),
      writes_skipped: load(&self.counters.writes_skipped),
      write_failures: load(&self.counters.write_failures),
    }
  }
}
