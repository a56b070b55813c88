//! Generic containers: the fallback `div` and admonitions.

use customblocks::ConvertError;
use customblocks::generator::{AdaptedCall, BlockContext, Generator, Output, Param, Signature};
use customblocks::html::Element;

/// `ctx, *args, **kwds`: a `div` classed with the block type and every
/// positional value, keywords as attributes, body parsed inside.
#[derive(Debug, Clone, Copy, Default)]
pub struct Container;

impl Generator for Container {
    fn signature(&self) -> Signature {
        Signature::new()
            .context()
            .param(Param::var_positional("args"))
            .param(Param::var_keyword("kwds"))
    }

    fn generate(&self, ctx: &mut BlockContext<'_>, call: AdaptedCall) -> Result<Output, ConvertError> {
        let mut div = Element::new("div");
        div.add_class(ctx.block_type);
        for arg in call.rest() {
            div.add_class(&class_name(arg));
        }
        set_attributes(&mut div, &call);
        ctx.parse_content(&mut div)?;
        Ok(div.into())
    }
}

/// `ctx, title=None, *args, **kwds`: a titled box. The title defaults to
/// the block type in title case.
#[derive(Debug, Clone, Copy, Default)]
pub struct Admonition;

impl Generator for Admonition {
    fn signature(&self) -> Signature {
        Signature::new()
            .context()
            .param(Param::either("title").optional())
            .param(Param::var_positional("args"))
            .param(Param::var_keyword("kwds"))
    }

    fn generate(&self, ctx: &mut BlockContext<'_>, call: AdaptedCall) -> Result<Output, ConvertError> {
        let mut div = Element::from_selector(".admonition");
        div.add_class(ctx.block_type);
        for arg in call.rest() {
            div.add_class(&class_name(arg));
        }
        set_attributes(&mut div, &call);

        let title = match call.text("title") {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => title_case(ctx.block_type),
        };
        div.push_element(Element::from_selector(".admonition-title").with_text(title));

        ctx.parse_content(&mut div)?;
        Ok(div.into())
    }
}

/// A positional value as a single class name: inner whitespace becomes `-`.
pub(crate) fn class_name(arg: &str) -> String {
    arg.split_whitespace().collect::<Vec<_>>().join("-")
}

/// Copy caught keywords onto `element`. A `class` keyword adds to the classes.
pub(crate) fn set_attributes(element: &mut Element, call: &AdaptedCall) {
    for (name, value) in call.extra().iter() {
        let value = value.to_string();
        if name == "class" {
            for class in value.split_whitespace() {
                element.add_class(class);
            }
        } else {
            element.set_attr(name, value);
        }
    }
}

/// Upper-case the first letter of every alphabetic run, lower-case the rest.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

