/* src/nut/compiler/src/command/mod.rs */

//! Per-command parsers. Each takes one segment (the text after an escape,
//! starting with the command keyword) and returns the token plus whatever
//! literal text follows the command on that segment.

mod block;
mod expression;
mod view;

pub(crate) use block::{parse_block_end, parse_else, parse_else_if, parse_for, parse_if};
pub(crate) use expression::{parse_date, parse_expression, parse_raw_value, parse_title};
pub(crate) use view::{parse_insert_view, parse_layout, parse_subview};

use crate::segment::ESCAPE;
use crate::token::Token;

#[derive(Debug)]
pub(crate) struct Command {
  pub(crate) token: Token,
  pub(crate) trailing: Option<Token>,
}

impl Command {
  /// `rest_start` is the byte offset in `segment` where literal text resumes.
  fn new(token: Token, segment: &str, rest_start: usize, line: usize) -> Self {
    let rest = &segment[rest_start..];
    let trailing = (!rest.is_empty()).then(|| {
      let consumed = &segment[..rest_start];
      let rest_line = line + consumed.bytes().filter(|b| *b == b'\n').count();
      Token::text(rest, rest_line)
    });
    Self { token, trailing }
  }
}

/// Tracks string literals while scanning command text.
///
/// A `"` toggles string mode unless it follows an unescaped backslash.
#[derive(Debug, Default)]
struct Quotes {
  in_string: bool,
  escaped: bool,
}

impl Quotes {
  fn inside_string() -> Self {
    Self { in_string: true, escaped: false }
  }

  /// Feed one character. Returns true when it is code: outside any string
  /// literal and not itself a quote.
  fn feed(&mut self, ch: char) -> bool {
    if self.escaped {
      self.escaped = false;
      return !self.in_string;
    }
    match ch {
      ESCAPE => {
        self.escaped = true;
        !self.in_string
      }
      '"' => {
        self.in_string = !self.in_string;
        false
      }
      _ => !self.in_string,
    }
  }
}

/// Byte offset of the `)` closing a parenthesis that is already `depth` levels
/// open at the start of `text`.
fn closing_paren(text: &str, depth: usize) -> Option<usize> {
  let mut quotes = Quotes::default();
  let mut depth = depth;
  for (index, ch) in text.char_indices() {
    if !quotes.feed(ch) {
      continue;
    }
    match ch {
      '(' => depth += 1,
      ')' => {
        depth = depth.saturating_sub(1);
        if depth == 0 {
          return Some(index);
        }
      }
      _ => {}
    }
  }
  None
}

/// Byte offset of the first block-opening `{`: outside strings and preceded
/// by a space.
fn opening_brace(text: &str) -> Option<usize> {
  let mut quotes = Quotes::default();
  let mut prev = '\0';
  for (index, ch) in text.char_indices() {
    if quotes.feed(ch) && ch == '{' && prev == ' ' {
      return Some(index);
    }
    prev = ch;
  }
  None
}
