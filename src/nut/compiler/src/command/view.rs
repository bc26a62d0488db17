/* src/nut/compiler/src/command/view.rs */

use super::{Command, Quotes};
use crate::error::NutParserError;
use crate::token::Token;

/// Name inside `"...")`, where `body` starts right after the opening quote.
/// Returns the name and the offset just past `)`.
fn quoted_name(body: &str) -> Option<(&str, usize)> {
  let mut quotes = Quotes::inside_string();
  let mut prev = '\0';
  for (index, ch) in body.char_indices() {
    let code = quotes.feed(ch);
    if code && ch == ')' && prev == '"' {
      return Some((&body[..index - 1], index + 1));
    }
    prev = ch;
  }
  None
}

fn named(
  text: &str,
  open: &str,
  namespace: &str,
  expected: &str,
  line: usize,
) -> Result<(String, usize), NutParserError> {
  let body = &text[open.len()..];
  let (name, end) = quoted_name(body)
    .ok_or_else(|| NutParserError::syntax(&[expected], body, line).with_description("missing '\")'"))?;
  Ok((format!("{namespace}.{name}"), open.len() + end))
}

/// `\Layout("<name>")`, views only.
pub(crate) fn parse_layout(text: &str, line: usize) -> Result<Command, NutParserError> {
  let (name, end) = named(text, "Layout(\"", "Layouts", "Layout(\"<name>\")", line)?;
  Ok(Command::new(Token::Layout { name, line }, text, end, line))
}

/// `\Subview("<name>")`
pub(crate) fn parse_subview(text: &str, line: usize) -> Result<Command, NutParserError> {
  let (name, end) = named(text, "Subview(\"", "Subviews", "Subview(\"<name>\")", line)?;
  Ok(Command::new(Token::Subview { name, line }, text, end, line))
}

/// `\View()`, layouts only.
pub(crate) fn parse_insert_view(text: &str, line: usize) -> Command {
  Command::new(Token::InsertView { line }, text, "View()".len(), line)
}
