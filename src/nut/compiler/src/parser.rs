/* src/nut/compiler/src/parser.rs */

use tracing::debug;

use crate::command::{self, Command};
use crate::error::NutParserError;
use crate::reduce::reduce;
use crate::segment::{ESCAPE, Segment, segment};
use crate::token::{Token, ViewToken};

/// Used by `\Date(...)` when no `format:` is given.
pub const DEFAULT_DATE_FORMAT: &str = "MMM dd yyyy";

/// Role of a template, taken from the first component of its logical path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
  /// `Views/...`: may declare `\Title` and `\Layout`.
  View,
  /// `Layouts/...`: may place `\View()`.
  Layout,
  Subview,
}

impl TemplateKind {
  pub fn from_name(name: &str) -> Self {
    match name.split('/').next() {
      Some("Views") => Self::View,
      Some("Layouts") => Self::Layout,
      _ => Self::Subview,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommandKind {
  Layout,
  Title,
  InsertView,
  Expression,
  RawValue,
  Date,
  Subview,
  If,
  For,
  ElseIf,
  Else,
  BlockEnd,
}

/// Compiles one template source into a [`ViewToken`].
#[derive(Debug, Clone)]
pub struct NutParser<'a> {
  content: &'a str,
  name: String,
  kind: TemplateKind,
  date_format: String,
}

impl<'a> NutParser<'a> {
  pub fn new(content: &'a str, name: impl Into<String>) -> Self {
    let name = name.into();
    let kind = TemplateKind::from_name(&name);
    Self { content, name, kind, date_format: DEFAULT_DATE_FORMAT.to_string() }
  }

  #[must_use]
  pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
    self.date_format = format.into();
    self
  }

  pub fn kind(&self) -> TemplateKind {
    self.kind
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  /// Compile the whole template. Errors carry this template's name.
  pub fn compile(&self) -> Result<ViewToken, NutParserError> {
    self.compile_inner().map_err(|err| err.with_name(&self.name))
  }

  fn compile_inner(&self) -> Result<ViewToken, NutParserError> {
    let (leading, commands) = self.split();
    let mut tokens = Vec::new();
    let mut title = None;
    let mut layout = None;

    if !leading.text.is_empty() {
      tokens.push(Token::text(leading.text, leading.line));
    }

    for (kind, segment) in &commands {
      let Command { token, trailing } = self.parse(*kind, segment)?;
      match token {
        Token::Title { .. } if title.is_none() => title = Some(token),
        Token::Layout { .. } if layout.is_none() => layout = Some(token),
        Token::Title { line, .. } | Token::Layout { line, .. } => {
          debug!(name = %self.name, line, id = token.id(), "ignoring repeated declaration");
        }
        _ => tokens.push(token),
      }
      tokens.extend(trailing);
    }

    let body = reduce(tokens)?;
    debug!(name = %self.name, tokens = body.len(), "compiled template");
    Ok(ViewToken { name: self.name.clone(), head: title.into_iter().collect(), body, layout })
  }

  /// Leading text plus every command segment tagged with its command.
  ///
  /// A segment that starts no command was not an escape at all: it is put
  /// back, backslash included, onto the segment before it. That is how a
  /// backslash reaches command text, e.g. `\("a\"b")`.
  fn split(&self) -> (Segment, Vec<(CommandKind, Segment)>) {
    let mut segments = segment(self.content).into_iter();
    let mut leading = segments.next().unwrap_or(Segment { text: String::new(), line: 1 });
    let mut commands: Vec<(CommandKind, Segment)> = Vec::new();

    for segment in segments {
      match self.command_kind(&segment.text) {
        Some(kind) => commands.push((kind, segment)),
        None => {
          let previous = commands.last_mut().map_or(&mut leading, |(_, previous)| previous);
          previous.text.push(ESCAPE);
          previous.text.push_str(&segment.text);
        }
      }
    }
    (leading, commands)
  }

  /// Command introduced by `text`, honouring the kind-gated commands first.
  fn command_kind(&self, text: &str) -> Option<CommandKind> {
    let kind = match self.kind {
      TemplateKind::View if text.starts_with("Layout(\"") => CommandKind::Layout,
      TemplateKind::View if text.starts_with("Title(") => CommandKind::Title,
      TemplateKind::Layout if text.starts_with("View()") => CommandKind::InsertView,
      _ if text.starts_with('(') => CommandKind::Expression,
      _ if text.starts_with("RawValue(") => CommandKind::RawValue,
      _ if text.starts_with("Date(") => CommandKind::Date,
      _ if text.starts_with("Subview(\"") => CommandKind::Subview,
      _ if text.starts_with("if ") => CommandKind::If,
      _ if text.starts_with("for ") => CommandKind::For,
      _ if text.starts_with("} else if ") => CommandKind::ElseIf,
      _ if text.starts_with("} else { ") || text.starts_with("} else {\n") => CommandKind::Else,
      _ if text.starts_with('}') => CommandKind::BlockEnd,
      _ => return None,
    };
    Some(kind)
  }

  fn parse(&self, kind: CommandKind, segment: &Segment) -> Result<Command, NutParserError> {
    let text = segment.text.as_str();
    let line = segment.line;
    let command = match kind {
      CommandKind::Layout => command::parse_layout(text, line)?,
      CommandKind::Title => command::parse_title(text, line)?,
      CommandKind::InsertView => command::parse_insert_view(text, line),
      CommandKind::Expression => command::parse_expression(text, line)?,
      CommandKind::RawValue => command::parse_raw_value(text, line)?,
      CommandKind::Date => command::parse_date(text, line, &self.date_format)?,
      CommandKind::Subview => command::parse_subview(text, line)?,
      CommandKind::If => command::parse_if(text, line)?,
      CommandKind::For => command::parse_for(text, line)?,
      CommandKind::ElseIf => command::parse_else_if(text, line)?,
      CommandKind::Else => command::parse_else(text, line),
      CommandKind::BlockEnd => command::parse_block_end(text, line),
    };
    Ok(command)
  }
}
