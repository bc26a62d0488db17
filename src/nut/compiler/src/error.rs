/* src/nut/compiler/src/error.rs */

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
  #[error("Unexpected end of file while reading: {reading}")]
  UnexpectedEnd { reading: String },

  #[error("Unexpected '\\}}'")]
  UnexpectedBlockEnd,

  #[error("Syntax error\nexpected:\n    {}\nbut got:\n    '{got}'", quote_lines(.expected))]
  Syntax { expected: Vec<String>, got: String },

  #[error("Variable name '{name}' in '{clause}' does not match regular expression '{pattern}'")]
  WrongSimpleVariable { name: String, clause: String, pattern: String },

  #[error("Variable name '{name}' in '{clause}' does not match regular expression '{pattern}'")]
  WrongChainedVariable { name: String, clause: String, pattern: String },

  #[error("Evaluation error in '{infix}', message: '{message}'")]
  Evaluation { infix: String, message: String },
}

fn quote_lines(expected: &[String]) -> String {
  expected.iter().map(|item| format!("'{item}'")).collect::<Vec<_>>().join("\n\t")
}

/// A compile failure, located by template name and 1-based line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}{}\nLine:{line}{}", name_suffix(.name), description_suffix(.description))]
pub struct NutParserError {
  pub kind: ParseErrorKind,
  pub name: Option<String>,
  pub line: usize,
  pub description: Option<String>,
}

fn name_suffix(name: &Option<String>) -> String {
  name.as_ref().map(|name| format!("\nFile name: {name}")).unwrap_or_default()
}

fn description_suffix(description: &Option<String>) -> String {
  description.as_ref().map(|text| format!("\nDescription: {text}")).unwrap_or_default()
}

impl NutParserError {
  pub fn new(kind: ParseErrorKind, line: usize) -> Self {
    Self { kind, name: None, line, description: None }
  }

  pub(crate) fn syntax(expected: &[&str], got: impl Into<String>, line: usize) -> Self {
    let expected = expected.iter().map(|item| (*item).to_string()).collect();
    Self::new(ParseErrorKind::Syntax { expected, got: got.into() }, line)
  }

  pub(crate) fn unexpected_end(reading: &str, line: usize) -> Self {
    Self::new(ParseErrorKind::UnexpectedEnd { reading: reading.to_string() }, line)
      .with_description("\\} not found")
  }

  pub(crate) fn unexpected_block_end(line: usize) -> Self {
    Self::new(ParseErrorKind::UnexpectedBlockEnd, line)
  }

  #[must_use]
  pub fn with_description(mut self, description: impl Into<String>) -> Self {
    self.description = Some(description.into());
    self
  }

  /// Attach the template name unless one is already set.
  #[must_use]
  pub fn with_name(mut self, name: &str) -> Self {
    if self.name.is_none() {
      self.name = Some(name.to_string());
    }
    self
  }
}

/// Failures reading or writing the Fruit representation.
#[derive(Debug, Error)]
pub enum FruitError {
  #[error("malformed fruit: {0}")]
  Decode(#[source] serde_json::Error),

  #[error("failed to encode fruit: {0}")]
  Encode(#[source] serde_json::Error),

  #[error("malformed fruit: {0}")]
  Shape(String),
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn syntax_message_lists_every_expectation() {
    let err = NutParserError::syntax(&["(<expression: Any>)", "x"], "(\"deasd", 3)
      .with_name("Views/Main.nut")
      .with_description("missing ')'");
    assert_eq!(
      err.to_string(),
      "Syntax error\nexpected:\n    '(<expression: Any>)'\n\t'x'\nbut got:\n    '(\"deasd'\n\
       File name: Views/Main.nut\nLine:3\nDescription: missing ')'"
    );
  }

  #[test]
  fn optional_parts_are_omitted() {
    let err = NutParserError::unexpected_block_end(5);
    assert_eq!(err.to_string(), "Unexpected '\\}'\nLine:5");
  }

  #[test]
  fn with_name_keeps_existing_name() {
    let err = NutParserError::unexpected_end("if", 1).with_name("Views/A.nut").with_name("Views/B.nut");
    assert_eq!(err.name.as_deref(), Some("Views/A.nut"));
    assert_eq!(err.description.as_deref(), Some("\\} not found"));
  }

  #[test]
  fn variable_message_names_the_pattern() {
    let kind = ParseErrorKind::WrongSimpleVariable {
      name: "3a".into(),
      clause: "if let 3a = b {".into(),
      pattern: "^[a-zA-Z]\\w*$".into(),
    };
    assert_eq!(
      kind.to_string(),
      "Variable name '3a' in 'if let 3a = b {' does not match regular expression '^[a-zA-Z]\\w*$'"
    );
  }
}
