/* src/nut/compiler/src/token.rs */

/// Unevaluated expression source, exactly as written inside the command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
  pub infix: String,
  pub line: usize,
}

impl Expression {
  pub fn new(infix: impl Into<String>, line: usize) -> Self {
    Self { infix: infix.into(), line }
  }
}

/// Payload shared by `\if` and `\} else if`.
///
/// With the `let <variable> = <condition>` form, `variable` holds the bound name
/// and `condition` the optional value being unwrapped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conditional {
  pub condition: Expression,
  pub variable: Option<String>,
  pub then: Vec<Token>,
  pub otherwise: Option<Vec<Token>>,
  pub line: usize,
}

impl Conditional {
  pub fn new(condition: Expression, variable: Option<String>, line: usize) -> Self {
    Self { condition, variable, then: Vec::new(), otherwise: None, line }
  }

  pub(crate) fn if_id(&self) -> &'static str {
    if self.variable.is_some() { "if let" } else { "if" }
  }

  pub(crate) fn else_if_id(&self) -> &'static str {
    if self.variable.is_some() { "else if let" } else { "else if" }
  }
}

/// `\for variable in array {` or `\for (key, variable) in array {`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForIn {
  pub key: Option<String>,
  pub variable: String,
  pub array: String,
  pub body: Vec<Token>,
  pub line: usize,
}

impl ForIn {
  pub(crate) fn id(&self) -> &'static str {
    if self.key.is_some() { "for in Dictionary" } else { "for in Array" }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
  Text { value: String, line: usize },
  /// HTML-escaped at render time.
  Expression(Expression),
  /// Emitted as-is at render time.
  RawExpression(Expression),
  Date { date: Expression, format: Expression, line: usize },
  If(Conditional),
  ElseIf(Conditional),
  Else { body: Vec<Token>, line: usize },
  ForIn(ForIn),
  EndBlock { line: usize },
  Title { expression: Expression, line: usize },
  Layout { name: String, line: usize },
  Subview { name: String, line: usize },
  InsertView { line: usize },
}

impl Token {
  pub fn text(value: impl Into<String>, line: usize) -> Self {
    Self::Text { value: value.into(), line }
  }

  pub fn line(&self) -> usize {
    match self {
      Self::Text { line, .. }
      | Self::Date { line, .. }
      | Self::Else { line, .. }
      | Self::EndBlock { line }
      | Self::Title { line, .. }
      | Self::Layout { line, .. }
      | Self::Subview { line, .. }
      | Self::InsertView { line } => *line,
      Self::Expression(expression) | Self::RawExpression(expression) => expression.line,
      Self::If(conditional) | Self::ElseIf(conditional) => conditional.line,
      Self::ForIn(for_in) => for_in.line,
    }
  }

  /// Discriminator used by the Fruit format.
  pub fn id(&self) -> &'static str {
    match self {
      Self::Text { .. } => "text",
      Self::Expression(_) => "expression",
      Self::RawExpression(_) => "raw expression",
      Self::Date { .. } => "date",
      Self::If(conditional) => conditional.if_id(),
      Self::ElseIf(conditional) => conditional.else_if_id(),
      Self::Else { .. } => "else",
      Self::ForIn(for_in) => for_in.id(),
      Self::EndBlock { .. } => "}",
      Self::Title { .. } => "title",
      Self::Layout { .. } => "layout",
      Self::Subview { .. } => "subview",
      Self::InsertView { .. } => "view",
    }
  }
}

/// Drops nested bodies from a work list; recursion would follow block depth.
fn release(mut pending: Vec<Token>) {
  while let Some(token) = pending.pop() {
    match token {
      Token::If(mut conditional) | Token::ElseIf(mut conditional) => {
        pending.append(&mut conditional.then);
        pending.extend(conditional.otherwise.take().into_iter().flatten());
      }
      Token::ForIn(mut for_in) => pending.append(&mut for_in.body),
      Token::Else { body, .. } => pending.extend(body),
      _ => {}
    }
  }
}

impl Drop for Conditional {
  fn drop(&mut self) {
    let mut pending = std::mem::take(&mut self.then);
    pending.extend(self.otherwise.take().into_iter().flatten());
    release(pending);
  }
}

impl Drop for ForIn {
  fn drop(&mut self) {
    release(std::mem::take(&mut self.body));
  }
}

/// Root of a compiled template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewToken {
  /// Logical path, e.g. `Views/Posts.nut`.
  pub name: String,
  pub head: Vec<Token>,
  pub body: Vec<Token>,
  pub layout: Option<Token>,
}

impl ViewToken {
  pub fn title(&self) -> Option<&Expression> {
    self.head.iter().find_map(|token| match token {
      Token::Title { expression, .. } => Some(expression),
      _ => None,
    })
  }

  pub fn layout_name(&self) -> Option<&str> {
    match &self.layout {
      Some(Token::Layout { name, .. }) => Some(name),
      _ => None,
    }
  }

  /// Names of every subview referenced from the body, nested blocks included,
  /// in document order.
  pub fn subviews(&self) -> Vec<&str> {
    let mut out = Vec::new();
    let mut pending = vec![self.body.iter()];
    while let Some(tokens) = pending.last_mut() {
      let Some(token) = tokens.next() else {
        pending.pop();
        continue;
      };
      match token {
        Token::Subview { name, .. } => out.push(name.as_str()),
        Token::If(conditional) | Token::ElseIf(conditional) => {
          if let Some(otherwise) = &conditional.otherwise {
            pending.push(otherwise.iter());
          }
          pending.push(conditional.then.iter());
        }
        Token::Else { body, .. } => pending.push(body.iter()),
        Token::ForIn(for_in) => pending.push(for_in.body.iter()),
        _ => {}
      }
    }
    out
  }
}
