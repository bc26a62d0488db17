/* src/nut/resolver/src/tests/mod.rs */

use super::*;


const POSTS: &str = "\\Title(\"Posts\")\\Layout(\"Default\")
<h1>Posts</h1>
\\for post in posts {
  \\Subview(\"Post.Card\")
\\}
\\if let next = page.next {
  <a href=\"\\(next)\">next</a>
\\}
";

const DEFAULT_LAYOUT: &str = "<html>
<head>\\Subview(\"Page.Head\")</head>
<body>\\View()</body>
</html>";

const HEAD: &str = "<title>\\(title)</title>";
