/* src/cli/core/src/config.rs */

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use nut_resolver::NutConfig;

pub const CONFIG_FILE: &str = "nut.toml";

/// Nearest `nut.toml` at or above `start`.
pub fn find_nut_config(start: &Path) -> Result<Option<PathBuf>> {
  let mut dir =
    start.canonicalize().with_context(|| format!("failed to canonicalize {}", start.display()))?;
  loop {
    let candidate = dir.join(CONFIG_FILE);
    if candidate.is_file() {
      return Ok(Some(candidate));
    }
    if !dir.pop() {
      return Ok(None);
    }
  }
}

/// Parse `path`; relative directories are resolved against its directory.
pub fn load_nut_config(path: &Path) -> Result<NutConfig> {
  let content =
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
  let config: NutConfig =
    toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))?;
  let base = path.parent().unwrap_or_else(|| Path::new("."));
  Ok(config.rooted_at(base))
}

/// Explicit config, else the nearest one above `cwd`, else defaults rooted at `cwd`.
pub fn resolve_config(explicit: Option<&Path>, cwd: &Path) -> Result<NutConfig> {
  let path = match explicit {
    Some(path) => Some(path.to_path_buf()),
    None => find_nut_config(cwd)?,
  };
  match path {
    Some(path) => {
      tracing::debug!(path = %path.display(), "using config");
      load_nut_config(&path)
    }
    None => Ok(NutConfig::default().rooted_at(cwd)),
  }
}
