/* src/nut/resolver/src/lib.rs */

//! Resolves logical template names to compiled views through a two-level
//! cache: an in-process table and `.fruit` artifacts next to the sources.

mod config;
mod resolver;
mod store;

pub use config::{NutConfig, logical_name, nut_name};
pub use resolver::{CacheEntry, ResolveError, Resolver, ResolverStats};
pub use store::{FsStore, MemoryStore, TemplateStore};

#[cfg(test)]
mod tests;
