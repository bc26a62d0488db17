/* src/nut/compiler/src/tests/mod.rs */

use super::*;

mod errors;

/// Body of `content` compiled as `name`, in Fruit form.
fn body_json(content: &str, name: &str) -> serde_json::Value {
  let view = compile(content, name).unwrap();
  fruit::to_value(&view).unwrap()["body"].clone()
}

/// Display form of the error raised compiling `content` as `Views/Main.nut`.
fn error_text(content: &str) -> String {
  compile(content, "Views/Main.nut").unwrap_err().to_string()
}
