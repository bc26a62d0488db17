/* src/nut/compiler/src/fruit.rs */

//! Fruit: the JSON form of a compiled [`ViewToken`], used as the on-disk cache.
//!
//! Every token is an object discriminated by `"id"`. Readers ignore unknown
//! fields, default a missing text `line` to 0 and a missing date `format` to
//! the default format literal.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::FruitError;
use crate::parser::DEFAULT_DATE_FORMAT;
use crate::token::{Conditional, Expression, ForIn, Token, ViewToken};

#[derive(Debug, Serialize, Deserialize)]
struct FruitView {
  #[serde(rename = "fileName")]
  file_name: String,
  body: Vec<FruitToken>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  head: Vec<FruitToken>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  layout: Option<FruitToken>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "id")]
enum FruitExpression {
  #[serde(rename = "expression")]
  Plain { infix: String, line: usize },
  #[serde(rename = "raw expression")]
  Raw { infix: String, line: usize },
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "id")]
enum FruitToken {
  #[serde(rename = "text")]
  Text {
    value: String,
    #[serde(default)]
    line: usize,
  },
  #[serde(rename = "expression")]
  Expression { infix: String, line: usize },
  #[serde(rename = "raw expression")]
  RawExpression { infix: String, line: usize },
  #[serde(rename = "date")]
  Date {
    date: FruitExpression,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    format: Option<FruitExpression>,
    line: usize,
  },
  #[serde(rename = "if")]
  If(FruitConditional),
  #[serde(rename = "if let")]
  IfLet(FruitConditional),
  #[serde(rename = "else if")]
  ElseIf(FruitConditional),
  #[serde(rename = "else if let")]
  ElseIfLet(FruitConditional),
  #[serde(rename = "else")]
  Else {
    #[serde(default, with = "nested")]
    body: Vec<FruitToken>,
    line: usize,
  },
  #[serde(rename = "for in Array")]
  ForInArray {
    variable: String,
    array: String,
    #[serde(with = "nested")]
    body: Vec<FruitToken>,
    line: usize,
  },
  #[serde(rename = "for in Dictionary")]
  ForInDictionary {
    key: String,
    variable: String,
    array: String,
    #[serde(with = "nested")]
    body: Vec<FruitToken>,
    line: usize,
  },
  #[serde(rename = "}")]
  EndBlock { line: usize },
  #[serde(rename = "title")]
  Title { expression: FruitExpression, line: usize },
  #[serde(rename = "layout")]
  Layout { name: String, line: usize },
  #[serde(rename = "subview")]
  Subview { name: String, line: usize },
  #[serde(rename = "view")]
  View { line: usize },
}

#[derive(Debug, Serialize, Deserialize)]
struct FruitConditional {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  variable: Option<String>,
  condition: FruitExpression,
  #[serde(with = "nested")]
  then: Vec<FruitToken>,
  #[serde(rename = "else", default, skip_serializing_if = "Option::is_none", with = "nested")]
  otherwise: Option<Vec<FruitToken>>,
  line: usize,
}

impl FruitExpression {
  fn plain(expression: &Expression) -> Self {
    Self::Plain { infix: expression.infix.clone(), line: expression.line }
  }

  fn raw(expression: &Expression) -> Self {
    Self::Raw { infix: expression.infix.clone(), line: expression.line }
  }

  fn into_expression(self) -> Expression {
    match self {
      Self::Plain { infix, line } | Self::Raw { infix, line } => Expression { infix, line },
    }
  }
}

/// Block bodies nest as deep as the template does; every level below the
/// top runs on a stack segment that grows on demand.
mod nested {
  use super::{Deserialize, Deserializer, Serialize, Serializer};

  const RED_ZONE: usize = 64 * 1024;
  const STACK_GROWTH: usize = 1024 * 1024;

  pub(super) fn grow<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_GROWTH, f)
  }

  pub(super) fn serialize<T: Serialize, S: Serializer>(value: &T, serializer: S) -> Result<S::Ok, S::Error> {
    grow(|| value.serialize(serializer))
  }

  pub(super) fn deserialize<'de, T: Deserialize<'de>, D: Deserializer<'de>>(deserializer: D) -> Result<T, D::Error> {
    grow(|| T::deserialize(deserializer))
  }
}

fn encode_tokens(tokens: &[Token]) -> Vec<FruitToken> {
  nested::grow(|| tokens.iter().map(FruitToken::from).collect())
}

fn decode_tokens(tokens: Vec<FruitToken>) -> Vec<Token> {
  nested::grow(|| tokens.into_iter().map(Token::from).collect())
}

impl From<&Conditional> for FruitConditional {
  fn from(conditional: &Conditional) -> Self {
    Self {
      variable: conditional.variable.clone(),
      condition: FruitExpression::raw(&conditional.condition),
      then: encode_tokens(&conditional.then),
      otherwise: conditional.otherwise.as_deref().map(encode_tokens),
      line: conditional.line,
    }
  }
}

impl From<FruitConditional> for Conditional {
  fn from(fruit: FruitConditional) -> Self {
    Self {
      condition: fruit.condition.into_expression(),
      variable: fruit.variable,
      then: decode_tokens(fruit.then),
      otherwise: fruit.otherwise.map(decode_tokens),
      line: fruit.line,
    }
  }
}

impl From<&Token> for FruitToken {
  fn from(token: &Token) -> Self {
    match token {
      Token::Text { value, line } => Self::Text { value: value.clone(), line: *line },
      Token::Expression(e) => Self::Expression { infix: e.infix.clone(), line: e.line },
      Token::RawExpression(e) => Self::RawExpression { infix: e.infix.clone(), line: e.line },
      Token::Date { date, format, line } => Self::Date {
        date: FruitExpression::plain(date),
        format: Some(FruitExpression::plain(format)),
        line: *line,
      },
      Token::If(c) if c.variable.is_some() => Self::IfLet(c.into()),
      Token::If(c) => Self::If(c.into()),
      Token::ElseIf(c) if c.variable.is_some() => Self::ElseIfLet(c.into()),
      Token::ElseIf(c) => Self::ElseIf(c.into()),
      Token::Else { body, line } => Self::Else { body: encode_tokens(body), line: *line },
      Token::ForIn(ForIn { key: Some(key), variable, array, body, line }) => Self::ForInDictionary {
        key: key.clone(),
        variable: variable.clone(),
        array: array.clone(),
        body: encode_tokens(body),
        line: *line,
      },
      Token::ForIn(ForIn { key: None, variable, array, body, line }) => Self::ForInArray {
        variable: variable.clone(),
        array: array.clone(),
        body: encode_tokens(body),
        line: *line,
      },
      Token::EndBlock { line } => Self::EndBlock { line: *line },
      Token::Title { expression, line } => {
        Self::Title { expression: FruitExpression::plain(expression), line: *line }
      }
      Token::Layout { name, line } => Self::Layout { name: name.clone(), line: *line },
      Token::Subview { name, line } => Self::Subview { name: name.clone(), line: *line },
      Token::InsertView { line } => Self::View { line: *line },
    }
  }
}

impl From<FruitToken> for Token {
  fn from(fruit: FruitToken) -> Self {
    match fruit {
      FruitToken::Text { value, line } => Self::Text { value, line },
      FruitToken::Expression { infix, line } => Self::Expression(Expression { infix, line }),
      FruitToken::RawExpression { infix, line } => Self::RawExpression(Expression { infix, line }),
      FruitToken::Date { date, format, line } => {
        let format = format.map_or_else(
          || Expression::new(format!("\"{DEFAULT_DATE_FORMAT}\""), line),
          FruitExpression::into_expression,
        );
        Self::Date { date: date.into_expression(), format, line }
      }
      FruitToken::If(c) | FruitToken::IfLet(c) => Self::If(c.into()),
      FruitToken::ElseIf(c) | FruitToken::ElseIfLet(c) => Self::ElseIf(c.into()),
      FruitToken::Else { body, line } => Self::Else { body: decode_tokens(body), line },
      FruitToken::ForInArray { variable, array, body, line } => {
        Self::ForIn(ForIn { key: None, variable, array, body: decode_tokens(body), line })
      }
      FruitToken::ForInDictionary { key, variable, array, body, line } => {
        Self::ForIn(ForIn { key: Some(key), variable, array, body: decode_tokens(body), line })
      }
      FruitToken::EndBlock { line } => Self::EndBlock { line },
      FruitToken::Title { expression, line } => Self::Title { expression: expression.into_expression(), line },
      FruitToken::Layout { name, line } => Self::Layout { name, line },
      FruitToken::Subview { name, line } => Self::Subview { name, line },
      FruitToken::View { line } => Self::InsertView { line },
    }
  }
}

impl From<&ViewToken> for FruitView {
  fn from(view: &ViewToken) -> Self {
    Self {
      file_name: view.name.clone(),
      body: encode_tokens(&view.body),
      head: encode_tokens(&view.head),
      layout: view.layout.as_ref().map(FruitToken::from),
    }
  }
}

impl TryFrom<FruitView> for ViewToken {
  type Error = FruitError;

  fn try_from(fruit: FruitView) -> Result<Self, Self::Error> {
    let head = decode_tokens(fruit.head);
    if let Some(token) = head.iter().find(|token| !matches!(token, Token::Title { .. })) {
      return Err(FruitError::Shape(format!("head may only hold title tokens, found '{}'", token.id())));
    }
    let layout = fruit.layout.map(Token::from);
    if let Some(token) = layout.as_ref().filter(|token| !matches!(token, Token::Layout { .. })) {
      return Err(FruitError::Shape(format!("layout must be a layout token, found '{}'", token.id())));
    }
    Ok(Self { name: fruit.file_name, head, body: decode_tokens(fruit.body), layout })
  }
}

/// Serialize a compiled view as compact JSON.
pub fn encode(view: &ViewToken) -> Result<String, FruitError> {
  serde_json::to_string(&FruitView::from(view)).map_err(FruitError::Encode)
}

/// Serialize a compiled view as indented JSON.
pub fn encode_pretty(view: &ViewToken) -> Result<String, FruitError> {
  serde_json::to_string_pretty(&FruitView::from(view)).map_err(FruitError::Encode)
}

/// The Fruit form as a JSON value tree.
pub fn to_value(view: &ViewToken) -> Result<Value, FruitError> {
  serde_json::to_value(FruitView::from(view)).map_err(FruitError::Encode)
}

/// Parse a Fruit document. Nesting depth is bounded by memory only.
pub fn decode(content: &str) -> Result<ViewToken, FruitError> {
  let mut de = serde_json::Deserializer::from_str(content);
  de.disable_recursion_limit();
  let fruit = FruitView::deserialize(serde_stacker::Deserializer::new(&mut de)).map_err(FruitError::Decode)?;
  de.end().map_err(FruitError::Decode)?;
  fruit.try_into()
}
