use customblocks::ConvertError;
use customblocks::generator::{AdaptedCall, BlockContext, Generator, Output, Param, Signature};
use customblocks::html::Element;

use crate::container::set_attributes;

/// `ctx, url, *args, **kwds`: an image linked to itself with the block body
/// as caption. `title` and `alt` go to the image, other keywords to the figure.
#[derive(Debug, Clone, Copy, Default)]
pub struct Figure;

impl Generator for Figure {
    fn signature(&self) -> Signature {
        Signature::new()
            .context()
            .param(Param::either("url"))
            .param(Param::var_positional("args"))
            .param(Param::var_keyword("kwds"))
    }

    fn generate(&self, ctx: &mut BlockContext<'_>, mut call: AdaptedCall) -> Result<Output, ConvertError> {
        let url = call.text("url").unwrap_or_default().to_string();
        let title = call.take_extra("title").map(|v| v.to_string());
        let alt = call.take_extra("alt").map(|v| v.to_string());

        let mut figure = Element::new("figure");
        for arg in call.rest() {
            figure.add_class(arg);
        }
        set_attributes(&mut figure, &call);

        let image = Element::new("img")
            .with_attr("src", url.as_str())
            .with_opt_attr("title", title)
            .with_opt_attr("alt", alt);
        figure.push_element(Element::new("a").with_attr("href", url).with_child(image));

        let mut caption = Element::new("figcaption");
        ctx.parse_content(&mut caption)?;
        figure.push_element(caption);

        Ok(figure.into())
    }
}
