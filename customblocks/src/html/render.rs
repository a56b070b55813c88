use html_escape::{encode_double_quoted_attribute, encode_text};

use super::{Element, Node};

const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "details", "div", "dl", "fieldset",
    "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header",
    "hr", "iframe", "li", "main", "nav", "ol", "p", "pre", "section", "table", "ul", "video",
];

const VOID_TAGS: &[&str] = &["br", "embed", "hr", "img", "input", "link", "meta", "source"];

fn is_block_tag(tag: &str) -> bool {
    BLOCK_TAGS.contains(&tag)
}

fn is_block(node: &Node) -> bool {
    match node {
        Node::Element(e) => is_block_tag(&e.tag),
        Node::Raw(_) => true,
        Node::Text(_) => false,
    }
}

pub(super) fn write_element(out: &mut String, element: &Element) {
    out.push('<');
    out.push_str(&element.tag);
    for (name, value) in &element.attributes {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&encode_double_quoted_attribute(value));
        out.push('"');
    }

    if VOID_TAGS.contains(&element.tag.as_str()) {
        out.push_str(" />");
    } else {
        out.push('>');
        if element.children.iter().any(is_block) {
            out.push('\n');
        }
        write_children(out, element);
        out.push_str("</");
        out.push_str(&element.tag);
        out.push('>');
    }

    if is_block_tag(&element.tag) {
        out.push('\n');
    }
}

pub(super) fn write_children(out: &mut String, element: &Element) {
    for child in &element.children {
        match child {
            Node::Element(e) => write_element(out, e),
            Node::Text(text) => out.push_str(&encode_text(text)),
            Node::Raw(markup) => {
                out.push_str(markup);
                if !markup.ends_with('\n') {
                    out.push('\n');
                }
            }
        }
    }
}
