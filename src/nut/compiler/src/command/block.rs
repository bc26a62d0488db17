/* src/nut/compiler/src/command/block.rs */

use super::{Command, opening_brace};
use crate::error::NutParserError;
use crate::ident::{check_chained, check_simple};
use crate::token::{Conditional, Expression, ForIn, Token};

const IF_EXPECTED: &[&str] =
  &["if <expression: Bool> {", "if let <variableName: Any> = <expression: Any?> {"];
const ELSE_IF_EXPECTED: &[&str] =
  &["} else if <expression: Bool> {", "} else if let <variableName: Any> = <expression: Any?> {"];
const FOR_EXPECTED: &[&str] = &[
  "for <variable: Any> in <array: [Any]> {",
  "for (<key: String>, <value: Any>) in <dictionary: [String: Value> {",
];

/// `\if <condition> {` and `\if let <name> = <expression> {`
pub(crate) fn parse_if(text: &str, line: usize) -> Result<Command, NutParserError> {
  let (conditional, end) = conditional(text, "if ", IF_EXPECTED, line)?;
  Ok(Command::new(Token::If(conditional), text, end, line))
}

/// `\} else if <condition> {` and its `let` form.
pub(crate) fn parse_else_if(text: &str, line: usize) -> Result<Command, NutParserError> {
  let (conditional, end) = conditional(text, "} else if ", ELSE_IF_EXPECTED, line)?;
  Ok(Command::new(Token::ElseIf(conditional), text, end, line))
}

/// `\} else {` followed by a single space or newline, which is dropped.
pub(crate) fn parse_else(text: &str, line: usize) -> Command {
  const OPEN_LEN: usize = "} else { ".len();
  Command::new(Token::Else { body: Vec::new(), line }, text, OPEN_LEN, line)
}

/// `\}`
pub(crate) fn parse_block_end(text: &str, line: usize) -> Command {
  Command::new(Token::EndBlock { line }, text, 1, line)
}

/// Shared by `if` and `else if`; `prefix` is the keyword text up to the clause.
fn conditional(
  text: &str,
  prefix: &str,
  expected: &[&str],
  line: usize,
) -> Result<(Conditional, usize), NutParserError> {
  let brace = opening_brace(text)
    .ok_or_else(|| NutParserError::syntax(expected, text, line).with_description("'{' not found"))?;
  let clause = text.get(prefix.len()..brace - 1).unwrap_or_default();
  let got = &text[..=brace];
  if clause.is_empty() {
    return Err(NutParserError::syntax(expected, got, line).with_description("empty <expression>"));
  }

  let conditional = if clause == "let" || clause.starts_with("let ") {
    if clause.trim_end() == "let" {
      return Err(NutParserError::syntax(expected, got, line).with_description("empty <expression>"));
    }
    let words: Vec<&str> = clause.split(' ').collect();
    let [_, variable, "=", expression] = words.as_slice() else {
      return Err(NutParserError::syntax(expected, got, line));
    };
    let normalized = format!("{prefix}let {variable} = {expression} {{");
    check_simple(variable, &normalized, line)?;
    check_chained(expression, &normalized, line)?;
    Conditional::new(Expression::new(*expression, line), Some((*variable).to_string()), line)
  } else {
    Conditional::new(Expression::new(clause, line), None, line)
  };
  Ok((conditional, brace + 1))
}

/// `\for <name> in <array> {` and `\for (<key>, <name>) in <dictionary> {`
pub(crate) fn parse_for(text: &str, line: usize) -> Result<Command, NutParserError> {
  let not_found =
    || NutParserError::syntax(FOR_EXPECTED, text, line).with_description("'{' not found");
  let brace = opening_brace(text).ok_or_else(not_found)?;
  // keeps the spaces around the clause: " post in posts "
  let statement = text.get("for".len()..brace).unwrap_or_default();
  if statement.trim().is_empty() {
    return Err(not_found());
  }

  let words: Vec<&str> = statement.split(' ').collect();
  let (key, variable, array) = match words.as_slice() {
    ["", variable, "in", array, ""] if !variable.contains(['(', ')', ',']) => (None, *variable, *array),
    ["", key, variable, "in", array, ""]
      if key.len() > 2 && key.starts_with('(') && key.ends_with(',') && variable.len() > 1 && variable.ends_with(')') =>
    {
      (Some(&key[1..key.len() - 1]), &variable[..variable.len() - 1], *array)
    }
    _ => return Err(NutParserError::syntax(FOR_EXPECTED, statement, line)),
  };

  let normalized = format!("for{statement}{{");
  if let Some(key) = key {
    check_simple(key, &normalized, line)?;
  }
  check_simple(variable, &normalized, line)?;
  check_chained(array, &normalized, line)?;

  let token = Token::ForIn(ForIn {
    key: key.map(str::to_string),
    variable: variable.to_string(),
    array: array.to_string(),
    body: Vec::new(),
    line,
  });
  Ok(Command::new(token, text, brace + 1, line))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::ParseErrorKind;

  fn got(err: &NutParserError) -> &str {
    match &err.kind {
      ParseErrorKind::Syntax { got, .. } => got,
      other => panic!("expected syntax error, got {other:?}"),
    }
  }

  #[test]
  fn plain_if_keeps_clause() {
    let command = parse_if("if a == \"{\" {\n  yes", 2).unwrap();
    let Token::If(conditional) = command.token else { panic!("not an if") };
    assert_eq!(conditional.condition, Expression::new("a == \"{\"", 2));
    assert!(conditional.variable.is_none());
    assert_eq!(command.trailing, Some(Token::text("\n  yes", 2)));
  }

  #[test]
  fn if_let_binds_variable() {
    let command = parse_if("if let user = post.author {", 1).unwrap();
    let Token::If(conditional) = command.token else { panic!("not an if") };
    assert_eq!(conditional.variable.as_deref(), Some("user"));
    assert_eq!(conditional.condition.infix, "post.author");
    assert!(command.trailing.is_none());
  }

  #[test]
  fn if_errors() {
    let err = parse_if("if {", 1).unwrap_err();
    assert_eq!(got(&err), "if {");
    assert_eq!(err.description.as_deref(), Some("empty <expression>"));

    let err = parse_if("if let {", 1).unwrap_err();
    assert_eq!(got(&err), "if let {");
    assert_eq!(err.description.as_deref(), Some("empty <expression>"));

    let err = parse_if("if let a b {", 1).unwrap_err();
    assert_eq!(got(&err), "if let a b {");
    assert!(err.description.is_none());

    let err = parse_if("if par ", 1).unwrap_err();
    assert_eq!(got(&err), "if par ");
    assert_eq!(err.description.as_deref(), Some("'{' not found"));
  }

  #[test]
  fn else_if_let_checks_names() {
    let err = parse_else_if("} else if let 3a = asd {", 1).unwrap_err();
    assert_eq!(
      err.kind,
      ParseErrorKind::WrongSimpleVariable {
        name: "3a".into(),
        clause: "} else if let 3a = asd {".into(),
        pattern: crate::SIMPLE_VARIABLE.into(),
      }
    );
    let command = parse_else_if("} else if b {", 1).unwrap();
    assert_eq!(command.token.id(), "else if");
  }

  #[test]
  fn else_drops_one_whitespace() {
    let command = parse_else("} else {\n    ds\n", 3);
    assert_eq!(command.token, Token::Else { body: vec![], line: 3 });
    assert_eq!(command.trailing, Some(Token::text("    ds\n", 4)));
  }

  #[test]
  fn for_forms() {
    let command = parse_for("for post in blog.posts { x", 1).unwrap();
    let Token::ForIn(for_in) = command.token else { panic!("not a for") };
    assert_eq!((for_in.key.clone(), for_in.variable.as_str(), for_in.array.as_str()), (None, "post", "blog.posts"));
    assert_eq!(command.trailing, Some(Token::text(" x", 1)));

    let command = parse_for("for (name, value) in entries {", 1).unwrap();
    let Token::ForIn(for_in) = command.token else { panic!("not a for") };
    assert_eq!(for_in.key.as_deref(), Some("name"));
    assert_eq!(for_in.variable, "value");
    assert_eq!(for_in.array, "entries");
  }

  #[test]
  fn for_errors() {
    let err = parse_for("for ds at blah {", 1).unwrap_err();
    assert_eq!(got(&err), " ds at blah ");

    let err = parse_for("for (a,b) in c {", 1).unwrap_err();
    assert_eq!(got(&err), " (a,b) in c ");

    let err = parse_for("for a in b", 1).unwrap_err();
    assert_eq!(got(&err), "for a in b");
    assert_eq!(err.description.as_deref(), Some("'{' not found"));

    let err = parse_for("for name.3a in asd3 {", 1).unwrap_err();
    assert!(matches!(err.kind, ParseErrorKind::WrongSimpleVariable { ref clause, .. } if clause == "for name.3a in asd3 {"));

    let err = parse_for("for name in 3a {", 1).unwrap_err();
    assert!(matches!(err.kind, ParseErrorKind::WrongChainedVariable { ref name, .. } if name == "3a"));
  }
}
