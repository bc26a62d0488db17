/* src/nut/resolver/src/store.rs */

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tempfile::NamedTempFile;

/// File access used by the resolver.
pub trait TemplateStore: Send + Sync {
  fn read(&self, path: &Path) -> io::Result<String>;

  fn modified(&self, path: &Path) -> io::Result<SystemTime>;

  fn exists(&self, path: &Path) -> bool {
    self.modified(path).is_ok()
  }

  /// Replace `path` so that readers see either the old or the new contents,
  /// never a partial write. Missing parent directories are created.
  fn write_atomic(&self, path: &Path, contents: &str) -> io::Result<()>;

  fn remove_dir_all(&self, path: &Path) -> io::Result<()>;

  fn create_dir_all(&self, path: &Path) -> io::Result<()>;
}

/// The real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsStore;

impl TemplateStore for FsStore {
  fn read(&self, path: &Path) -> io::Result<String> {
    fs::read_to_string(path)
  }

  fn modified(&self, path: &Path) -> io::Result<SystemTime> {
    fs::metadata(path)?.modified()
  }

  fn write_atomic(&self, path: &Path, contents: &str) -> io::Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir)?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.persist(path).map_err(|err| err.error)?;
    Ok(())
  }

  fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
    fs::remove_dir_all(path)
  }

  fn create_dir_all(&self, path: &Path) -> io::Result<()> {
    fs::create_dir_all(path)
  }
}

#[derive(Debug)]
struct MemoryFile {
  contents: String,
  modified: SystemTime,
}

#[derive(Debug, Default)]
struct MemoryState {
  files: HashMap<PathBuf, MemoryFile>,
  clock: u64,
  read_only: bool,
}

impl MemoryState {
  fn tick(&mut self) -> SystemTime {
    self.clock += 1;
    UNIX_EPOCH + Duration::from_secs(self.clock)
  }
}

/// In-process store. Every write is stamped with a strictly increasing
/// logical modification time, so freshness comparisons are deterministic.
#[derive(Debug, Default)]
pub struct MemoryStore {
  state: Mutex<MemoryState>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  fn state(&self) -> std::sync::MutexGuard<'_, MemoryState> {
    self.state.lock().unwrap_or_else(PoisonError::into_inner)
  }

  /// Create or replace a file, bypassing the read-only switch.
  pub fn insert(&self, path: impl Into<PathBuf>, contents: impl Into<String>) {
    let mut state = self.state();
    let modified = state.tick();
    state.files.insert(path.into(), MemoryFile { contents: contents.into(), modified });
  }

  /// Bump a file's modification time without changing it.
  pub fn touch(&self, path: &Path) -> bool {
    let mut state = self.state();
    let modified = state.tick();
    match state.files.get_mut(path) {
      Some(file) => {
        file.modified = modified;
        true
      }
      None => false,
    }
  }

  /// Make every later `write_atomic` fail with `PermissionDenied`.
  pub fn set_read_only(&self, read_only: bool) {
    self.state().read_only = read_only;
  }

  pub fn paths(&self) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = self.state().files.keys().cloned().collect();
    paths.sort();
    paths
  }
}

fn not_found(path: &Path) -> io::Error {
  io::Error::new(io::ErrorKind::NotFound, format!("{} not found", path.display()))
}

impl TemplateStore for MemoryStore {
  fn read(&self, path: &Path) -> io::Result<String> {
    self.state().files.get(path).map(|file| file.contents.clone()).ok_or_else(|| not_found(path))
  }

  fn modified(&self, path: &Path) -> io::Result<SystemTime> {
    self.state().files.get(path).map(|file| file.modified).ok_or_else(|| not_found(path))
  }

  fn write_atomic(&self, path: &Path, contents: &str) -> io::Result<()> {
    let mut state = self.state();
    if state.read_only {
      return Err(io::Error::new(io::ErrorKind::PermissionDenied, "store is read-only"));
    }
    let modified = state.tick();
    state.files.insert(path.to_path_buf(), MemoryFile { contents: contents.to_string(), modified });
    Ok(())
  }

  fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
    self.state().files.retain(|file, _| !file.starts_with(path));
    Ok(())
  }

  fn create_dir_all(&self, _path: &Path) -> io::Result<()> {
    Ok(())
  }
}
