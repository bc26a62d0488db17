/* src/cli/core/src/clear.rs */

// `nut clear`: delete compiled artifacts.

use anyhow::{Context, Result};
use nut_resolver::{NutConfig, Resolver};

use crate::ui;

pub fn run_clear(config: NutConfig, remove_root: bool) -> Result<()> {
  let fruits = config.fruits.clone();
  Resolver::new(config)
    .clear_fruits(remove_root)
    .with_context(|| format!("failed to clear {}", fruits.display()))?;
  if remove_root {
    ui::ok(&format!("removed {}", fruits.display()));
  } else {
    ui::ok(&format!("cleared {}", fruits.display()));
  }
  Ok(())
}
