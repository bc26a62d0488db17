/* src/nut/compiler/src/ident.rs */

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{NutParserError, ParseErrorKind};

/// A bare name: a letter followed by word characters.
pub const SIMPLE_VARIABLE: &str = r"^[a-zA-Z]\w*$";

/// Dot-separated simple names, e.g. `post.author.name`.
pub const CHAINED_VARIABLE: &str = r"^[a-zA-Z]\w*(?:\.[a-zA-Z]\w*)*$";

fn simple_re() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| Regex::new(SIMPLE_VARIABLE).unwrap())
}

fn chained_re() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| Regex::new(CHAINED_VARIABLE).unwrap())
}

pub fn is_simple_identifier(name: &str) -> bool {
  simple_re().is_match(name)
}

pub fn is_chained_identifier(name: &str) -> bool {
  chained_re().is_match(name)
}

pub(crate) fn check_simple(name: &str, clause: &str, line: usize) -> Result<(), NutParserError> {
  if is_simple_identifier(name) {
    return Ok(());
  }
  Err(NutParserError::new(
    ParseErrorKind::WrongSimpleVariable {
      name: name.to_string(),
      clause: clause.to_string(),
      pattern: SIMPLE_VARIABLE.to_string(),
    },
    line,
  ))
}

pub(crate) fn check_chained(name: &str, clause: &str, line: usize) -> Result<(), NutParserError> {
  if is_chained_identifier(name) {
    return Ok(());
  }
  Err(NutParserError::new(
    ParseErrorKind::WrongChainedVariable {
      name: name.to_string(),
      clause: clause.to_string(),
      pattern: CHAINED_VARIABLE.to_string(),
    },
    line,
  ))
}
