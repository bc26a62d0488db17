/* src/nut/compiler/src/reduce.rs */

//! Folds the flat command stream into nested blocks.

use crate::error::NutParserError;
use crate::token::{Conditional, ForIn, Token};

/// A block still waiting for its terminator.
enum Frame {
  /// Collecting `then` of `current`. `chain` holds the earlier links of an
  /// `else if` chain, outermost first.
  Branch { chain: Vec<Conditional>, current: Conditional },
  /// Collecting the final `else` of a chain.
  Else { chain: Vec<Conditional>, last: Conditional, line: usize },
  Loop(ForIn),
}

struct Open {
  frame: Frame,
  body: Vec<Token>,
}

impl Open {
  fn new(frame: Frame) -> Self {
    Self { frame, body: Vec::new() }
  }

  /// Error for input that ends while this block is open.
  fn into_unexpected_end(self) -> NutParserError {
    match &self.frame {
      Frame::Branch { chain, current } => {
        let reading = if chain.is_empty() { current.if_id() } else { current.else_if_id() };
        NutParserError::unexpected_end(reading, current.line)
      }
      Frame::Else { line, .. } => NutParserError::unexpected_end("else", *line),
      Frame::Loop(for_in) => NutParserError::unexpected_end(for_in.id(), for_in.line),
    }
  }
}

/// Nest `last` into the `otherwise` of each earlier link, innermost first.
fn close_chain(chain: Vec<Conditional>, mut last: Conditional, otherwise: Option<Vec<Token>>) -> Token {
  last.otherwise = otherwise;
  let closed = chain.into_iter().rev().fold(last, |nested, mut conditional| {
    conditional.otherwise = Some(vec![Token::If(nested)]);
    conditional
  });
  Token::If(closed)
}

/// Single pass over document-order tokens with an explicit stack of open
/// blocks. Each terminator closes exactly one block; an `else if` chain is
/// one block whose links nest as an `If` inside the previous `otherwise`.
pub(crate) fn reduce(tokens: Vec<Token>) -> Result<Vec<Token>, NutParserError> {
  let mut root = Vec::new();
  let mut stack: Vec<Open> = Vec::new();

  for token in tokens {
    match token {
      Token::If(conditional) => stack.push(Open::new(Frame::Branch { chain: Vec::new(), current: conditional })),
      Token::ForIn(for_in) => stack.push(Open::new(Frame::Loop(for_in))),
      Token::ElseIf(next) => match stack.pop() {
        Some(Open { frame: Frame::Branch { mut chain, mut current }, body }) => {
          current.then = body;
          chain.push(current);
          stack.push(Open::new(Frame::Branch { chain, current: next }));
        }
        _ => return Err(NutParserError::unexpected_block_end(next.line)),
      },
      Token::Else { line, .. } => match stack.pop() {
        Some(Open { frame: Frame::Branch { chain, mut current }, body }) => {
          current.then = body;
          stack.push(Open::new(Frame::Else { chain, last: current, line }));
        }
        _ => return Err(NutParserError::unexpected_block_end(line)),
      },
      Token::EndBlock { line } => {
        let Some(Open { frame, body }) = stack.pop() else {
          return Err(NutParserError::unexpected_block_end(line));
        };
        let closed = match frame {
          Frame::Branch { chain, mut current } => {
            current.then = body;
            close_chain(chain, current, None)
          }
          Frame::Else { chain, last, .. } => close_chain(chain, last, Some(body)),
          Frame::Loop(mut for_in) => {
            for_in.body = body;
            Token::ForIn(for_in)
          }
        };
        stack.last_mut().map_or(&mut root, |open| &mut open.body).push(closed);
      }
      other => stack.last_mut().map_or(&mut root, |open| &mut open.body).push(other),
    }
  }

  match stack.pop() {
    Some(open) => Err(open.into_unexpected_end()),
    None => Ok(root),
  }
}
