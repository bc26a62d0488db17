/* src/nut/compiler/src/eval.rs */

use serde_json::Value;

use crate::error::{NutParserError, ParseErrorKind};
use crate::token::Expression;

/// Evaluates expression source against render data. The compiler never calls
/// this; it is the seam a renderer plugs its expression language into.
pub trait ExpressionEvaluator {
  /// Evaluate `infix`, or describe why it could not be evaluated.
  fn evaluate(&self, infix: &str, data: &Value) -> Result<Value, String>;
}

impl<F> ExpressionEvaluator for F
where
  F: Fn(&str, &Value) -> Result<Value, String>,
{
  fn evaluate(&self, infix: &str, data: &Value) -> Result<Value, String> {
    self(infix, data)
  }
}

impl Expression {
  /// Run this expression through `evaluator`, reporting failures at the
  /// expression's line.
  pub fn evaluate<E>(&self, evaluator: &E, data: &Value) -> Result<Value, NutParserError>
  where
    E: ExpressionEvaluator + ?Sized,
  {
    evaluator.evaluate(&self.infix, data).map_err(|message| {
      NutParserError::new(ParseErrorKind::Evaluation { infix: self.infix.clone(), message }, self.line)
    })
  }
}
