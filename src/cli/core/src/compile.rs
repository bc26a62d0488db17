/* src/cli/core/src/compile.rs */

// `nut compile`: one source file to Fruit JSON.

use std::path::{Component, Path};

use anyhow::{Context, Result};
use nut_compiler::{NutParser, fruit};
use nut_resolver::NutConfig;

use crate::ui;

fn canonical(path: &Path) -> std::path::PathBuf {
  path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

/// Compile name for `file`: its path under `nuts` with `/` separators, or
/// just the file name when it lives elsewhere.
pub fn default_name(file: &Path, nuts: &Path) -> String {
  let file = canonical(file);
  let nuts = canonical(nuts);
  match file.strip_prefix(&nuts) {
    Ok(relative) => relative
      .components()
      .filter_map(|c| match c {
        Component::Normal(part) => Some(part.to_string_lossy()),
        _ => None,
      })
      .collect::<Vec<_>>()
      .join("/"),
    Err(_) => file.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default(),
  }
}

/// Fruit JSON for the template at `file`, compiled under `name`.
pub fn compile_file(file: &Path, name: &str, date_format: &str, pretty: bool) -> Result<String> {
  let content =
    std::fs::read_to_string(file).with_context(|| format!("failed to read {}", file.display()))?;
  let view = NutParser::new(&content, name).with_date_format(date_format).compile()?;
  let encoded = if pretty { fruit::encode_pretty(&view)? } else { fruit::encode(&view)? };
  Ok(encoded)
}

pub fn run_compile(
  config: &NutConfig,
  file: &Path,
  name: Option<&str>,
  out: Option<&Path>,
  pretty: bool,
) -> Result<()> {
  let name = name.map_or_else(|| default_name(file, &config.nuts), str::to_string);
  let encoded = compile_file(file, &name, &config.date_format, pretty)?;

  match out {
    Some(out) => {
      if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
          .with_context(|| format!("failed to create {}", parent.display()))?;
      }
      std::fs::write(out, &encoded).with_context(|| format!("failed to write {}", out.display()))?;
      ui::ok(&format!("{name} -> {}", out.display()));
    }
    None => ui::raw(&encoded),
  }
  Ok(())
}
