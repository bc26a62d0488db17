/* src/nut/resolver/src/config.rs */

use std::path::{Path, PathBuf};

use nut_compiler::DEFAULT_DATE_FORMAT;
use serde::Deserialize;

/// Where templates and their compiled artifacts live.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NutConfig {
  /// Directory holding `.nut` sources.
  #[serde(default = "default_nuts")]
  pub nuts: PathBuf,
  /// Directory holding `.fruit` artifacts.
  #[serde(default = "default_fruits")]
  pub fruits: PathBuf,
  #[serde(default = "default_date_format")]
  pub date_format: String,
}

fn default_nuts() -> PathBuf {
  PathBuf::from("Nuts")
}

fn default_fruits() -> PathBuf {
  PathBuf::from("Fruits")
}

fn default_date_format() -> String {
  DEFAULT_DATE_FORMAT.to_string()
}

impl Default for NutConfig {
  fn default() -> Self {
    Self { nuts: default_nuts(), fruits: default_fruits(), date_format: default_date_format() }
  }
}

impl NutConfig {
  pub fn new(nuts: impl Into<PathBuf>, fruits: impl Into<PathBuf>) -> Self {
    Self { nuts: nuts.into(), fruits: fruits.into(), ..Self::default() }
  }

  /// Resolve relative directories against `base`.
  #[must_use]
  pub fn rooted_at(mut self, base: &Path) -> Self {
    if self.nuts.is_relative() {
      self.nuts = base.join(&self.nuts);
    }
    if self.fruits.is_relative() {
      self.fruits = base.join(&self.fruits);
    }
    self
  }

  /// `Views.Posts` -> `<nuts>/Views/Posts.nut`
  pub fn nut_path(&self, name: &str) -> PathBuf {
    self.nuts.join(nut_name(name))
  }

  /// `Views.Posts` -> `<fruits>/Views.Posts.fruit`
  pub fn fruit_path(&self, name: &str) -> PathBuf {
    self.fruits.join(format!("{name}.fruit"))
  }
}

/// Compile name for a dotted logical name: `Views.Posts` -> `Views/Posts.nut`.
pub fn nut_name(name: &str) -> String {
  format!("{}.nut", name.replace('.', "/"))
}

/// Inverse of [`nut_name`] for a path relative to the nuts directory.
pub fn logical_name(relative: &Path) -> Option<String> {
  let stem = relative.with_extension("");
  let parts: Option<Vec<&str>> = stem.components().map(|c| c.as_os_str().to_str()).collect();
  let parts = parts?;
  (!parts.is_empty()).then(|| parts.join("."))
}
