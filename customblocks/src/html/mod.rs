mod render;

use std::fmt;

/// A node in the output tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    /// Character data, escaped on serialization.
    Text(String),
    /// Pre-rendered markup spliced verbatim (host-rendered Markdown,
    /// or markup returned by a generator).
    Raw(String),
}

/// An HTML element with insertion-ordered attributes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    pub tag: String,
    attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Element {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Build an element from a `tag.class1.class2` selector.
    /// An empty tag means `div`, so `.admonition.note` is a classed div.
    pub fn from_selector(selector: &str) -> Self {
        let mut parts = selector.split('.');
        let tag = match parts.next() {
            Some(tag) if !tag.is_empty() => tag,
            _ => "div",
        };
        let mut element = Element::new(tag);
        for class in parts.filter(|c| !c.is_empty()) {
            element.add_class(class);
        }
        element
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Set an attribute, replacing the value in place if already present.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Set the attribute only when a value is given.
    pub fn with_opt_attr(mut self, name: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        if let Some(value) = value {
            self.set_attr(name, value);
        }
        self
    }

    /// Append a class to the `class` attribute.
    pub fn add_class(&mut self, class: &str) {
        if class.is_empty() {
            return;
        }
        let joined = match self.attr("class") {
            Some(existing) if !existing.is_empty() => format!("{} {}", existing, class),
            _ => class.to_string(),
        };
        self.set_attr("class", joined);
    }

    pub fn push(&mut self, node: Node) {
        self.children.push(node);
    }

    pub fn push_element(&mut self, element: Element) {
        self.children.push(Node::Element(element));
    }

    pub fn push_text(&mut self, text: impl Into<String>) {
        self.children.push(Node::Text(text.into()));
    }

    pub fn with_child(mut self, element: Element) -> Self {
        self.push_element(element);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.push_text(text);
        self
    }

    /// Child elements, skipping text and raw markup.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Serialize only the children, as used for the document root.
    pub fn inner_html(&self) -> String {
        let mut out = String::new();
        render::write_children(&mut out, self);
        out
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        render::write_element(&mut out, self);
        out
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_html())
    }
}
