/* src/cli/core/src/main.rs */

mod check;
mod clear;
mod compile;
mod config;
mod resolve;
mod ui;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use nut_resolver::NutConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "nut", about = "Nut template compiler")]
struct Cli {
  /// Log debug output (overridden by RUST_LOG)
  #[arg(short, long, global = true)]
  verbose: bool,
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Compile one template and print or write its Fruit JSON
  Compile {
    /// Path to the .nut file
    file: PathBuf,
    /// Compile name (e.g. Views/Posts.nut); derived from the path if omitted
    #[arg(short, long)]
    name: Option<String>,
    /// Write to this file instead of stdout
    #[arg(short, long)]
    out: Option<PathBuf>,
    /// Pretty-print the JSON
    #[arg(long)]
    pretty: bool,
    /// Path to nut.toml (auto-detected if omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,
  },
  /// Compile every template under the nuts directory and report errors
  Check {
    /// Path to nut.toml (auto-detected if omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,
  },
  /// Resolve a template by logical name (e.g. Views.Posts) through the cache
  Resolve {
    name: String,
    /// Path to nut.toml (auto-detected if omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,
  },
  /// Delete compiled artifacts
  Clear {
    /// Path to nut.toml (auto-detected if omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Remove the fruits directory itself instead of leaving it empty
    #[arg(long)]
    remove_root: bool,
  },
}

fn init_tracing(verbose: bool) {
  let fallback = if verbose { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
  tracing_subscriber::fmt().with_env_filter(filter).with_target(false).with_writer(std::io::stderr).init();
}

fn load_config(explicit: Option<&Path>) -> Result<NutConfig> {
  let cwd = std::env::current_dir().context("failed to get cwd")?;
  config::resolve_config(explicit, &cwd)
}

fn main() -> Result<()> {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  match cli.command {
    Command::Compile { file, name, out, pretty, config } => {
      let config = load_config(config.as_deref())?;
      compile::run_compile(&config, &file, name.as_deref(), out.as_deref(), pretty)?;
    }
    Command::Check { config } => {
      check::run_check(&load_config(config.as_deref())?)?;
    }
    Command::Resolve { name, config } => {
      resolve::run_resolve(load_config(config.as_deref())?, &name)?;
    }
    Command::Clear { config, remove_root } => {
      clear::run_clear(load_config(config.as_deref())?, remove_root)?;
    }
  }
  Ok(())
}
