// src/blog/render.rs
// =============================================================================
// Renders a post's markdown body to HTML with `pulldown-cmark`.
//
// pulldown-cmark parses markdown into a stream of events and
// `html::push_html` writes those events out as HTML. We turn on the
// GitHub-flavoured extensions posts tend to use (tables, strikethrough,
// task lists, footnotes).
// =============================================================================

use pulldown_cmark::{html, Options, Parser};

// Converts markdown text into an HTML fragment
pub fn render_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_FOOTNOTES);

    let parser = Parser::new_ext(markdown, options);

    // Rough pre-allocation; HTML is usually a bit longer than its source
    let mut output = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut output, parser);
    output
}
