/* src/cli/core/src/resolve.rs */

// `nut resolve`: resolve one template through the artifact cache.

use anyhow::Result;
use nut_resolver::{NutConfig, Resolver};

use crate::ui;

pub fn run_resolve(config: NutConfig, name: &str) -> Result<()> {
  let resolver = Resolver::new(config);
  let view = resolver.resolve(name)?;
  let stats = resolver.stats();

  if stats.compiled > 0 {
    ui::ok(&format!("{name} compiled"));
  } else {
    ui::ok(&format!("{name} loaded from cache"));
  }
  ui::detail(&format!("body: {} tokens, head: {} tokens", view.body.len(), view.head.len()));
  if let Some(layout) = view.layout_name() {
    ui::detail(&format!("layout: {layout}"));
  }
  let subviews = view.subviews();
  if !subviews.is_empty() {
    ui::detail(&format!("subviews: {}", subviews.join(", ")));
  }
  if stats.write_failures > 0 {
    ui::fail(&format!("could not write {}", resolver.config().fruit_path(name).display()));
  }
  Ok(())
}
