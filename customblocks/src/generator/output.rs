use crate::html::{Element, Node};

/// What a generator hands back.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    /// The generator already wrote into the tree through its context.
    Nothing,
    Node(Element),
    Markup(String),
    Bytes(Vec<u8>),
}

impl From<Element> for Output {
    fn from(element: Element) -> Self {
        Output::Node(element)
    }
}

impl From<String> for Output {
    fn from(markup: String) -> Self {
        Output::Markup(markup)
    }
}

impl From<&str> for Output {
    fn from(markup: &str) -> Self {
        Output::Markup(markup.to_string())
    }
}

impl From<Vec<u8>> for Output {
    fn from(bytes: Vec<u8>) -> Self {
        Output::Bytes(bytes)
    }
}

impl From<()> for Output {
    fn from(_: ()) -> Self {
        Output::Nothing
    }
}

/// Fold a generator's output into the tree at `parent`.
pub fn append_output(parent: &mut Element, output: Output) {
    match output {
        Output::Nothing => {}
        Output::Node(element) => parent.push_element(element),
        Output::Markup(markup) => parent.push(Node::Raw(markup)),
        Output::Bytes(bytes) => {
            parent.push(Node::Raw(String::from_utf8_lossy(&bytes).into_owned()));
        }
    }
}
