/* src/cli/core/src/check.rs */

// `nut check`: compile every template under the nuts directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use nut_compiler::NutParser;
use nut_resolver::NutConfig;

use crate::compile::default_name;
use crate::ui;

#[derive(Debug, Default)]
pub struct CheckReport {
  pub passed: Vec<String>,
  /// Template name and rendered error.
  pub failed: Vec<(String, String)>,
}

/// Every `.nut` file below `dir`.
fn collect_nuts(dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
  let entries = std::fs::read_dir(dir).with_context(|| format!("failed to read {}", dir.display()))?;
  for entry in entries {
    let entry = entry.with_context(|| format!("failed to read {}", dir.display()))?;
    let path = entry.path();
    // Symlinked directories are not followed.
    let file_type = entry.file_type().with_context(|| format!("failed to stat {}", path.display()))?;
    if file_type.is_dir() {
      collect_nuts(&path, out)?;
    } else if path.extension().is_some_and(|ext| ext == "nut") {
      out.push(path);
    }
  }
  Ok(())
}

pub fn check_all(config: &NutConfig) -> Result<CheckReport> {
  let mut files = Vec::new();
  collect_nuts(&config.nuts, &mut files)?;
  files.sort();

  let mut report = CheckReport::default();
  for file in files {
    let name = default_name(&file, &config.nuts);
    let content =
      std::fs::read_to_string(&file).with_context(|| format!("failed to read {}", file.display()))?;
    match NutParser::new(&content, name.as_str()).with_date_format(&config.date_format).compile() {
      Ok(_) => report.passed.push(name),
      Err(err) => report.failed.push((name, err.to_string())),
    }
  }
  Ok(report)
}

pub fn run_check(config: &NutConfig) -> Result<()> {
  ui::banner("check");
  ui::arrow(&format!("checking {}", config.nuts.display()));

  let report = check_all(config)?;
  for name in &report.passed {
    ui::ok(name);
  }
  for (name, error) in &report.failed {
    ui::fail(name);
    for line in error.lines() {
      ui::detail(line);
    }
  }
  ui::blank();

  let total = report.passed.len() + report.failed.len();
  if !report.failed.is_empty() {
    anyhow::bail!("{} of {total} templates failed to compile", report.failed.len());
  }
  ui::ok(&format!("{total} templates compiled"));
  Ok(())
}
