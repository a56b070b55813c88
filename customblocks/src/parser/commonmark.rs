use pulldown_cmark::{Options, Parser as CmarkParser, html};

use crate::html::{Element, Node};

/// Render plain Markdown blocks and append the result to `parent`.
pub fn render_into(parent: &mut Element, text: &str) {
    let options = Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES;
    let parser = CmarkParser::new_ext(text, options);

    let mut markup = String::new();
    html::push_html(&mut markup, parser);

    if !markup.trim().is_empty() {
        parent.push(Node::Raw(markup));
    }
}
