/* src/nut/compiler/src/tests/errors.rs */

use super::*;

fn syntax(expected: &[&str], got: &str, line: usize, description: Option<&str>) -> String {
  let mut err = NutParserError::new(
    ParseErrorKind::Syntax {
      expected: expected.iter().map(|item| (*item).to_string()).collect(),
      got: got.to_string(),
    },
    line,
  )
  .with_name("Views/Main.nut");
  if let Some(description) = description {
    err = err.with_description(description);
  }
  err.to_string()
}

fn simple_variable(name: &str, clause: &str, line: usize) -> String {
  NutParserError::new(
    ParseErrorKind::WrongSimpleVariable {
      name: name.into(),
      clause: clause.into(),
      pattern: SIMPLE_VARIABLE.into(),
    },
    line,
  )
  .with_name("Views/Main.nut")
  .to_string()
}

fn chained_variable(name: &str, clause: &str, line: usize) -> String {
  NutParserError::new(
    ParseErrorKind::WrongChainedVariable {
      name: name.into(),
      clause: clause.into(),
      pattern: CHAINED_VARIABLE.into(),
    },
    line,
  )
  .with_name("Views/Main.nut")
  .to_string()
}

fn unexpected_end(reading: &str, line: usize) -> String {
  NutParserError::new(ParseErrorKind::UnexpectedEnd { reading: reading.into() }, line)
    .with_name("Views/Main.nut")
    .with_description("\\} not found")
    .to_string()
}

fn unexpected_block_end(line: usize) -> String {
  NutParserError::new(ParseErrorKind::UnexpectedBlockEnd, line).with_name("Views/Main.nut").to_string()
}

const DATE: &[&str] = &["Date(<expression: Double>, format: <expression: String>)", "Date(<expression: Double>)"];
const FORMAT: &[&str] = &[" format: <expression: String>"];
const IF: &[&str] = &["if <expression: Bool> {", "if let <variableName: Any> = <expression: Any?> {"];
const ELSE_IF: &[&str] =
  &["} else if <expression: Bool> {", "} else if let <variableName: Any> = <expression: Any?> {"];
const FOR: &[&str] = &[
  "for <variable: Any> in <array: [Any]> {",
  "for (<key: String>, <value: Any>) in <dictionary: [String: Value> {",
];

#[test]
fn date_errors() {
  assert_eq!(error_text("\n\\Date()"), syntax(DATE, ")", 2, None));
  assert_eq!(
    error_text("\n\n\\Date(\"dwa ada - a) fea \n\ne"),
    syntax(DATE, "\"dwa ada - a) fea \n\ne", 3, Some("missing '\")'"))
  );
  assert_eq!(error_text("\n\n\\Date(\"dwa ada\",)"), syntax(FORMAT, ")", 3, None));
  assert_eq!(error_text("\n\n\\Date(\"dwa ada\",format: 3)"), syntax(FORMAT, "format: 3)", 3, None));
  assert_eq!(error_text("\n\\Date(\"dwa ada\",forma)"), syntax(FORMAT, "forma)", 2, None));
}

#[test]
fn if_errors() {
  let empty = Some("empty <expression>");
  let no_brace = Some("'{' not found");
  assert_eq!(error_text("\n\\if {"), syntax(IF, "if {", 2, empty));
  assert_eq!(error_text("\n\n\n\n\\if let { \\}"), syntax(IF, "if let {", 5, empty));
  assert_eq!(error_text("\n\n\n\n\\if let asd = pom + 2 { \\}"), syntax(IF, "if let asd = pom + 2 {", 5, None));
  assert_eq!(error_text("\n\n\n\n\\if let asd as = { \\}"), syntax(IF, "if let asd as = {", 5, None));
  assert_eq!(error_text("\n\n\n\n\\if let = asd as { \\}"), syntax(IF, "if let = asd as {", 5, None));
  assert_eq!(error_text("\n\n\n\n\\if let asd == par { \\}"), syntax(IF, "if let asd == par {", 5, None));
  assert_eq!(error_text("\n\n\n\n\\if par \\}"), syntax(IF, "if par ", 5, no_brace));
  assert_eq!(error_text("\n\n\n\n\\if let asd as = \\}"), syntax(IF, "if let asd as = ", 5, no_brace));
}

#[test]
fn if_error_on_first_line() {
  let err = compile("\\if {", "Views/Main.nut").unwrap_err();
  assert_eq!(err.line, 1);
  assert_eq!(
    err.kind,
    ParseErrorKind::Syntax {
      expected: IF.iter().map(|item| (*item).to_string()).collect(),
      got: "if {".into(),
    }
  );
}

#[test]
fn else_if_errors() {
  let empty = Some("empty <expression>");
  let no_brace = Some("'{' not found");
  assert_eq!(error_text("\n\\} else if {"), syntax(ELSE_IF, "} else if {", 2, empty));
  assert_eq!(error_text("\n\n\n\n\\} else if let { \\}"), syntax(ELSE_IF, "} else if let {", 5, empty));
  assert_eq!(
    error_text("\n\n\n\n\\} else if let asd = pom + 2 { \\}"),
    syntax(ELSE_IF, "} else if let asd = pom + 2 {", 5, None)
  );
  assert_eq!(
    error_text("\n\n\n\n\\} else if let asd as = { \\}"),
    syntax(ELSE_IF, "} else if let asd as = {", 5, None)
  );
  assert_eq!(
    error_text("\n\n\n\n\\} else if let asd == par { \\}"),
    syntax(ELSE_IF, "} else if let asd == par {", 5, None)
  );
  assert_eq!(error_text("\n\n\n\n\\} else if par \\}"), syntax(ELSE_IF, "} else if par ", 5, no_brace));
  assert_eq!(
    error_text("\n\n\n\n\\} else if let asd as = \\}"),
    syntax(ELSE_IF, "} else if let asd as = ", 5, no_brace)
  );
}

#[test]
fn layout_and_subview_errors() {
  let missing = Some("missing '\")'");
  assert_eq!(error_text("\n\\Layout(\"deasd"), syntax(&["Layout(\"<name>\")"], "deasd", 2, missing));
  assert_eq!(
    error_text("\n\n\n\n\\Layout(\" asd ad \" + a)"),
    syntax(&["Layout(\"<name>\")"], " asd ad \" + a)", 5, missing)
  );
  assert_eq!(error_text("\n\\Subview(\"deasd"), syntax(&["Subview(\"<name>\")"], "deasd", 2, missing));
  assert_eq!(
    error_text("\n\n\n\n\\Subview(\" asd ad \" + a)"),
    syntax(&["Subview(\"<name>\")"], " asd ad \" + a)", 5, missing)
  );
}

#[test]
fn title_and_expression_errors() {
  let any = &["(<expression: Any>)"];
  assert_eq!(error_text("\n\\Title(\"deasd"), syntax(any, "(\"deasd", 2, Some("missing ')'")));
  assert_eq!(error_text("\n\\(asd a"), syntax(any, "(asd a", 2, Some("missing ')'")));
  assert_eq!(error_text("\n\n\n\n\\() \\} {"), syntax(any, "()", 5, Some("Empty expression")));

  let raw = &["RawValue(<expression: Any>)"];
  assert_eq!(error_text("\n\\RawValue(asd a"), syntax(raw, "RawValue(asd a", 2, Some("missing ')'")));
  assert_eq!(error_text("\n\n\n\n\\RawValue() \\} {"), syntax(raw, "RawValue()", 5, Some("Empty expression")));
}

#[test]
fn for_errors() {
  let no_brace = Some("'{' not found");
  assert_eq!(error_text("\n\\for "), syntax(FOR, "for ", 2, no_brace));
  assert_eq!(error_text("\n\n\n\n\\for ds ea sd ads s \\} {"), syntax(FOR, "for ds ea sd ads s ", 5, no_brace));
  assert_eq!(
    error_text("\n\n\n\n\\for (ds, as) ea sd ads s \\} {"),
    syntax(FOR, "for (ds, as) ea sd ads s ", 5, no_brace)
  );
  for clause in [
    " ds at blah ",
    " ds in blah 3ra ",
    " (ds, as) at blah ",
    " (ds, as) in blah 3ra ",
    " (ds,as) in blah ",
    " ds,as in blah ",
    " (ds,as in blah ",
    " ds,as) in blah ",
    " ds, as in blah ",
    " (ds, as in blah ",
    " ds, as) in blah ",
  ] {
    let content = format!("\n\n\n\n\\for{clause}{{");
    assert_eq!(error_text(&content), syntax(FOR, clause, 5, None), "clause {clause:?}");
  }
}

#[test]
fn variable_names() {
  assert_eq!(error_text("\n\\if let 3a = asd {"), simple_variable("3a", "if let 3a = asd {", 2));
  assert_eq!(
    error_text("\n\n\n\n\\if let name = 3a { \\} {"),
    chained_variable("3a", "if let name = 3a {", 5)
  );
  assert_eq!(
    error_text("\n\n\n\n\\if let name = asd.3a { \\} {"),
    chained_variable("asd.3a", "if let name = asd.3a {", 5)
  );
  assert_eq!(
    error_text("\n\n\n\n\\if let name.da = asd { \\} {"),
    simple_variable("name.da", "if let name.da = asd {", 5)
  );
  assert_eq!(error_text("\n\\} else if let 3a = asd {"), simple_variable("3a", "} else if let 3a = asd {", 2));
  assert_eq!(
    error_text("\n\n\n\n\\} else if let name = 3a { \\} {"),
    chained_variable("3a", "} else if let name = 3a {", 5)
  );
  assert_eq!(
    error_text("\n\n\n\n\\} else if let name.da = asd { \\} {"),
    simple_variable("name.da", "} else if let name.da = asd {", 5)
  );

  let cases = [
    ("for 4a in sda {", simple_variable("4a", "for 4a in sda {", 5)),
    ("for name.3a in asd3 {", simple_variable("name.3a", "for name.3a in asd3 {", 5)),
    ("for name in asd.3a {", chained_variable("asd.3a", "for name in asd.3a {", 5)),
    ("for name in 3a {", chained_variable("3a", "for name in 3a {", 5)),
    ("for (4a, asd) in sda {", simple_variable("4a", "for (4a, asd) in sda {", 5)),
    ("for (asd, 4a) in sda {", simple_variable("4a", "for (asd, 4a) in sda {", 5)),
    ("for (name.3a, asd) in asd3 {", simple_variable("name.3a", "for (name.3a, asd) in asd3 {", 5)),
    ("for (asd, name.3a) in asd3 {", simple_variable("name.3a", "for (asd, name.3a) in asd3 {", 5)),
  ];
  for (command, expected) in cases {
    assert_eq!(error_text(&format!("\n\n\n\n\\{command} \\}} {{")), expected, "command {command:?}");
  }
}

#[test]
fn unclosed_if_chains() {
  assert_eq!(error_text("\n\\if let a = asd { asd s"), unexpected_end("if let", 2));
  assert_eq!(error_text("\n\n\n\n\\if a == b { asd s"), unexpected_end("if", 5));
  assert_eq!(error_text("\n\n\n\n\\if let a = b { asd \\} else { s"), unexpected_end("else", 5));
  assert_eq!(error_text("\n\n\n\n\\if a == b { asd \\} else { s"), unexpected_end("else", 5));
  assert_eq!(error_text("\n\n\n\n\\if a == b { asd \\} else if b == c { s"), unexpected_end("else if", 5));
  assert_eq!(
    error_text("\n\n\n\n\\if a == b { asd \\} else if let b = c { s"),
    unexpected_end("else if let", 5)
  );
  assert_eq!(
    error_text("\n\n\n\n\\if a == b { asd \\} else if b == c {  a \\} else {\ns"),
    unexpected_end("else", 5)
  );
  assert_eq!(
    error_text("\n\n\n\n\\if a == b { asd \\} else if let b = c {  a \\} else { s"),
    unexpected_end("else", 5)
  );
  assert_eq!(error_text("\n\n\n\n\\if a == b { asd \\} \\}"), unexpected_block_end(5));
}

#[test]
fn unclosed_for_loops() {
  assert_eq!(error_text("\\for a in b { asd s"), unexpected_end("for in Array", 1));
  assert_eq!(error_text("\n\n\n\n\n\n\\for (a, b) in c { asd s"), unexpected_end("for in Dictionary", 7));
  assert_eq!(error_text("\n\n\n\n\n\n\\for (a, b) in c { asd s \\} \\}"), unexpected_block_end(7));
}

#[test]
fn orphan_else_is_unexpected() {
  assert_eq!(error_text("a\n\\} else { b \\}"), unexpected_block_end(2));
  assert_eq!(error_text("\\for a in b {\n\\} else if c { \\}"), unexpected_block_end(2));
}

#[test]
fn display_carries_name_and_line() {
  assert_eq!(
    error_text("\n\\(asd a"),
    "Syntax error\nexpected:\n    '(<expression: Any>)'\nbut got:\n    '(asd a'\nFile name: Views/Main.nut\nLine:2\nDescription: missing ')'"
  );
}
