/* src/nut/compiler/src/command/expression.rs */

use super::{Command, closing_paren};
use crate::error::NutParserError;
use crate::token::{Expression, Token};

const EXPRESSION_EXPECTED: &[&str] = &["(<expression: Any>)"];
const RAW_VALUE_EXPECTED: &[&str] = &["RawValue(<expression: Any>)"];
const DATE_EXPECTED: &[&str] =
  &["Date(<expression: Double>, format: <expression: String>)", "Date(<expression: Double>)"];
const FORMAT_EXPECTED: &[&str] = &[" format: <expression: String>"];
const FORMAT_LABEL: &str = " format: ";

/// Content between the leading `(` of `text` and its match, plus the offset
/// just past the closing `)`. `keyword` is whatever preceded the parenthesis
/// and only shows up in error reports.
fn parenthesized<'a>(
  text: &'a str,
  keyword: &str,
  expected: &[&str],
  line: usize,
) -> Result<(&'a str, usize), NutParserError> {
  let close = closing_paren(text, 0).ok_or_else(|| {
    NutParserError::syntax(expected, format!("{keyword}{text}"), line).with_description("missing ')'")
  })?;
  let infix = &text[1..close];
  if infix.is_empty() {
    let got = format!("{keyword}{}", &text[..=close]);
    return Err(NutParserError::syntax(expected, got, line).with_description("Empty expression"));
  }
  Ok((infix, close + 1))
}

/// `\(<expression>)`
pub(crate) fn parse_expression(text: &str, line: usize) -> Result<Command, NutParserError> {
  let (infix, end) = parenthesized(text, "", EXPRESSION_EXPECTED, line)?;
  let token = Token::Expression(Expression::new(infix, line));
  Ok(Command::new(token, text, end, line))
}

/// `\RawValue(<expression>)`
pub(crate) fn parse_raw_value(text: &str, line: usize) -> Result<Command, NutParserError> {
  const KEYWORD: &str = "RawValue";
  let body = &text[KEYWORD.len()..];
  let (infix, end) = parenthesized(body, KEYWORD, RAW_VALUE_EXPECTED, line)?;
  let token = Token::RawExpression(Expression::new(infix, line));
  Ok(Command::new(token, text, KEYWORD.len() + end, line))
}

/// `\Title(<expression>)`
pub(crate) fn parse_title(text: &str, line: usize) -> Result<Command, NutParserError> {
  const KEYWORD: &str = "Title";
  let body = &text[KEYWORD.len()..];
  let (infix, end) = parenthesized(body, "", EXPRESSION_EXPECTED, line)?;
  let token = Token::Title { expression: Expression::new(infix, line), line };
  Ok(Command::new(token, text, KEYWORD.len() + end, line))
}

/// `\Date(<expression>)` or `\Date(<expression>, format: <expression>)`.
///
/// Without a format clause the token carries `default_format` as a string
/// literal expression.
pub(crate) fn parse_date(text: &str, line: usize, default_format: &str) -> Result<Command, NutParserError> {
  const OPEN: &str = "Date(";
  let body = &text[OPEN.len()..];
  let missing_close =
    || NutParserError::syntax(DATE_EXPECTED, body, line).with_description("missing '\")'");

  let split = top_level_split(body).ok_or_else(missing_close)?;
  let date_infix = &body[..split.index];
  if date_infix.is_empty() {
    return Err(NutParserError::syntax(DATE_EXPECTED, body, line));
  }
  let date = Expression::new(date_infix, line);

  let (format, end) = match split.kind {
    SplitKind::Close => (Expression::new(format!("\"{default_format}\""), line), split.index + 1),
    SplitKind::Comma => {
      let after = &body[split.index + 1..];
      let Some(format_text) = after.strip_prefix(FORMAT_LABEL) else {
        return Err(NutParserError::syntax(FORMAT_EXPECTED, after, line));
      };
      let close = closing_paren(format_text, 1).ok_or_else(missing_close)?;
      let format_infix = &format_text[..close];
      if format_infix.is_empty() {
        return Err(NutParserError::syntax(FORMAT_EXPECTED, after, line).with_description("Empty expression"));
      }
      let offset = split.index + 1 + FORMAT_LABEL.len() + close + 1;
      (Expression::new(format_infix, line), offset)
    }
  };

  let token = Token::Date { date, format, line };
  Ok(Command::new(token, text, OPEN.len() + end, line))
}

enum SplitKind {
  Comma,
  Close,
}

struct Split {
  index: usize,
  kind: SplitKind,
}

/// First top-level `,` or the `)` closing the already-open `Date(`.
fn top_level_split(body: &str) -> Option<Split> {
  let mut quotes = super::Quotes::default();
  let mut depth = 1usize;
  for (index, ch) in body.char_indices() {
    if !quotes.feed(ch) {
      continue;
    }
    match ch {
      '(' => depth += 1,
      ')' => {
        depth -= 1;
        if depth == 0 {
          return Some(Split { index, kind: SplitKind::Close });
        }
      }
      ',' if depth == 1 => return Some(Split { index, kind: SplitKind::Comma }),
      _ => {}
    }
  }
  None
}
