//! Third-party player and widget embeds.

use customblocks::ConvertError;
use customblocks::generator::{AdaptedCall, BlockContext, Generator, Output, Param, Signature};
use customblocks::html::Element;

/// Config key that makes YouTube embeds carry their own fluid layout styles.
pub const YOUTUBE_INLINE_FLUID_STYLE: &str = "youtube_inline_fluid_style";

const YOUTUBE_WRAPPER_STYLE: &str =
    "position:relative; padding-bottom:56.25%; height:0; overflow:hidden; width:100%";
const YOUTUBE_IFRAME_STYLE: &str = "position:absolute; top:0; left:0; width:100%; height:100%;";

/// `ctx, id, *args, *, autoplay=False, controls=True, loop=False`
#[derive(Debug, Clone, Copy, Default)]
pub struct YouTube;

impl Generator for YouTube {
    fn signature(&self) -> Signature {
        Signature::new()
            .context()
            .param(Param::either("id"))
            .param(Param::var_positional("args"))
            .param(Param::flag("autoplay", false))
            .param(Param::flag("controls", true))
            .param(Param::flag("loop", false))
    }

    fn generate(&self, ctx: &mut BlockContext<'_>, call: AdaptedCall) -> Result<Output, ConvertError> {
        let mut options = Vec::new();
        if call.flag("autoplay") {
            options.push("autoplay=1");
        }
        if !call.flag("controls") {
            options.push("controls=0");
        }
        if call.flag("loop") {
            options.push("loop=1");
        }

        let id = call.text("id").unwrap_or_default();
        let mut src = format!("https://www.youtube.com/embed/{}", id);
        if !options.is_empty() {
            src.push('?');
            src.push_str(&options.join("&"));
        }

        let inline_style = ctx.config_flag(YOUTUBE_INLINE_FLUID_STYLE);
        let mut wrapper = Element::from_selector(".videowrapper.youtube");
        for arg in call.rest() {
            wrapper.add_class(arg);
        }
        let iframe = Element::new("iframe")
            .with_attr("src", src)
            .with_opt_attr("style", inline_style.then_some(YOUTUBE_IFRAME_STYLE));
        let wrapper = wrapper
            .with_opt_attr("style", inline_style.then_some(YOUTUBE_WRAPPER_STYLE))
            .with_child(iframe);
        Ok(wrapper.into())
    }
}

/// `ctx, id, *, autoplay=False, loop=False, byline=True, portrait=False`
#[derive(Debug, Clone, Copy, Default)]
pub struct Vimeo;

impl Generator for Vimeo {
    fn signature(&self) -> Signature {
        Signature::new()
            .context()
            .param(Param::either("id"))
            .param(Param::flag("autoplay", false))
            .param(Param::flag("loop", false))
            .param(Param::flag("byline", true))
            .param(Param::flag("portrait", false))
    }

    fn generate(&self, _ctx: &mut BlockContext<'_>, call: AdaptedCall) -> Result<Output, ConvertError> {
        let mut options = Vec::new();
        if !call.flag("byline") {
            options.push("byline=0");
        }
        if !call.flag("portrait") {
            options.push("portrait=0");
        }
        if call.flag("loop") {
            options.push("loop=1");
        }
        if call.flag("autoplay") {
            options.push("autoplay=1");
        }

        let id = call.text("id").unwrap_or_default();
        let iframe = Element::new("iframe")
            .with_attr("src", format!("https://player.vimeo.com/video/{}?{}", id, options.join("&")))
            .with_attr("width", "100%")
            .with_attr("height", "300")
            .with_attr("frameborder", "0")
            .with_attr("allow", "autoplay; fullscreen")
            .with_attr("allowfullscreen", "allowfullscreen");
        Ok(iframe.into())
    }
}

/// `ctx, id, *, landscape=False`: a Verkami crowdfunding widget.
#[derive(Debug, Clone, Copy, Default)]
pub struct Verkami;

impl Generator for Verkami {
    fn signature(&self) -> Signature {
        Signature::new()
            .context()
            .param(Param::either("id"))
            .param(Param::flag("landscape", false))
    }

    fn generate(&self, _ctx: &mut BlockContext<'_>, call: AdaptedCall) -> Result<Output, ConvertError> {
        let (orientation, element_id, style) = if call.flag("landscape") {
            ("landscape", "verkamiLandscape", "width: 480px; height: 210px")
        } else {
            ("portrait", "verkamiPortrait", "width: 240px; height: 350px")
        };
        let id = call.text("id").unwrap_or_default();
        let iframe = Element::from_selector("iframe.js-widget-iframe")
            .with_attr("id", element_id)
            .with_attr("allowtransparency", "true")
            .with_attr("style", style)
            .with_attr("frameborder", "0")
            .with_attr("scrolling", "no")
            .with_attr(
                "src",
                format!("https://www.verkami.com/projects/{}/widget_{}", id, orientation),
            );
        Ok(iframe.into())
    }
}

/// `ctx, id`: a Goteo project widget.
#[derive(Debug, Clone, Copy, Default)]
pub struct Goteo;

impl Generator for Goteo {
    fn signature(&self) -> Signature {
        Signature::new().context().param(Param::either("id"))
    }

    fn generate(&self, _ctx: &mut BlockContext<'_>, call: AdaptedCall) -> Result<Output, ConvertError> {
        let id = call.text("id").unwrap_or_default();
        let iframe = Element::new("iframe")
            .with_attr("frameborder", "0")
            .with_attr("height", "492px")
            .with_attr("src", format!("//www.goteo.org/widget/project/{}", id))
            .with_attr("width", "300px")
            .with_attr("scrolling", "no");
        Ok(iframe.into())
    }
}
