/* src/nut/compiler/src/lib.rs */

//! Compiler for Nut templates.
//!
//! A template is text with commands introduced by a backslash: `\(expr)`,
//! `\RawValue(expr)`, `\Date(expr)`, `\if cond {`, `\for x in xs {`, `\}`,
//! `\Subview("name")` and, depending on the template kind, `\Title(expr)`,
//! `\Layout("name")` or `\View()`. Compilation yields a [`ViewToken`] tree
//! which [`fruit`] serializes for caching.

mod command;
mod error;
mod eval;
pub mod fruit;
mod ident;
mod parser;
mod reduce;
mod segment;
mod token;

pub use error::{FruitError, NutParserError, ParseErrorKind};
pub use eval::ExpressionEvaluator;
pub use ident::{CHAINED_VARIABLE, SIMPLE_VARIABLE, is_chained_identifier, is_simple_identifier};
pub use parser::{DEFAULT_DATE_FORMAT, NutParser, TemplateKind};
pub use token::{Conditional, Expression, ForIn, Token, ViewToken};

/// Compile `content` as the template `name` with default options.
pub fn compile(content: &str, name: &str) -> Result<ViewToken, NutParserError> {
  NutParser::new(content, name).compile()
}

#[cfg(test)]
mod tests;
