/* src/nut/compiler/src/segment.rs */

pub(crate) const ESCAPE: char = '\\';

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Segment {
  pub(crate) text: String,
  /// 1-based line of the first character of `text`.
  pub(crate) line: usize,
}

fn newlines(text: &str) -> usize {
  text.bytes().filter(|b| *b == b'\n').count()
}

/// Split template source on the escape character.
///
/// The first segment is the literal text before any command and may be empty.
/// Every later segment is the text following one escape. A doubled escape is a
/// literal backslash: it and the chunk after it join the previous segment.
pub(crate) fn segment(source: &str) -> Vec<Segment> {
  let mut parts = source.split(ESCAPE);
  let leading = parts.next().unwrap_or_default();
  let mut line = 1 + newlines(leading);
  let mut segments = vec![Segment { text: leading.to_string(), line: 1 }];

  while let Some(part) = parts.next() {
    if part.is_empty() {
      let next = parts.next().unwrap_or_default();
      if let Some(last) = segments.last_mut() {
        last.text.push(ESCAPE);
        last.text.push_str(next);
      }
      line += newlines(next);
      continue;
    }
    segments.push(Segment { text: part.to_string(), line });
    line += newlines(part);
  }
  segments
}
