use customblocks::generator::{
    AdaptedCall, BlockContext, FnGenerator, Output, Param, Registry, Signature,
};
use customblocks::{Conversion, ConvertError, Converter, DiagnosticKind, Element, Node};
use pretty_assertions::assert_eq;

fn container() -> FnGenerator {
    FnGenerator::new(
        Signature::new()
            .context()
            .param(Param::var_positional("args"))
            .param(Param::var_keyword("kwds")),
        |ctx, call| {
            let mut div = Element::new("div");
            div.add_class(ctx.block_type);
            for arg in call.rest() {
                div.add_class(arg);
            }
            for (name, value) in call.extra().iter() {
                div.set_attr(name, value.to_string());
            }
            ctx.parse_content(&mut div)?;
            Ok(div.into())
        },
    )
}

fn admonition() -> FnGenerator {
    FnGenerator::new(
        Signature::new()
            .context()
            .param(Param::either("title").optional()),
        |ctx, call| {
            let mut div = Element::from_selector(".admonition");
            div.add_class(ctx.block_type);
            let title = call.text("title").unwrap_or("Note").to_string();
            div.push_element(Element::from_selector(".admonition-title").with_text(title));
            ctx.parse_content(&mut div)?;
            Ok(div.into())
        },
    )
}

fn converter() -> Converter {
    let mut registry = Registry::new(container());
    registry.register("note", admonition());
    Converter::new(registry)
}

fn convert_with(converter: &Converter, source: &str) -> Conversion {
    converter.convert(source).expect("conversion failed")
}

fn render(source: &str) -> String {
    convert_with(&converter(), source).html
}

// ---------------------------------------------------------------------------
// Block scanning
// ---------------------------------------------------------------------------

#[test]
fn admonition_with_keyword_title() {
    assert_eq!(
        render("::: note title=\"A title\"\n    content\n"),
        "<div class=\"admonition note\">\n\
         <div class=\"admonition-title\">A title</div>\n\
         <p>content</p>\n\
         </div>"
    );
}

#[test]
fn nested_blocks() {
    assert_eq!(
        render("::: myblock\n    ::: inner\n        Inner content\n    Some content\n"),
        "<div class=\"myblock\">\n\
         <div class=\"inner\">\n\
         <p>Inner content</p>\n\
         </div>\n\
         <p>Some content</p>\n\
         </div>"
    );
}

#[test]
fn explicit_end_marker() {
    assert_eq!(
        render("::: myblock\n    Some content\n:::\n    Some code\n"),
        "<div class=\"myblock\">\n\
         <p>Some content</p>\n\
         </div>\n\
         <pre><code>Some code\n</code></pre>"
    );
}

#[test]
fn end_marker_with_trailing_spaces_is_text() {
    let html = render("::: myblock\n    body\n:::   \nafter");
    assert!(html.starts_with("<div class=\"myblock\">\n<p>body</p>\n</div>\n"));
    assert!(html.contains("<p>:::"));
    assert!(html.contains("after</p>"));
}

#[test]
fn text_before_header_is_a_sibling() {
    assert_eq!(
        render("Intro paragraph\n::: box\n    body"),
        "<p>Intro paragraph</p>\n\
         <div class=\"box\">\n\
         <p>body</p>\n\
         </div>"
    );
}

#[test]
fn block_without_body_keeps_following_paragraph() {
    assert_eq!(
        render("::: box\n\nSibling"),
        "<div class=\"box\"></div>\n<p>Sibling</p>"
    );
}

#[test]
fn unindented_line_ends_body() {
    assert_eq!(
        render("::: box\n    inside\noutside"),
        "<div class=\"box\">\n<p>inside</p>\n</div>\n<p>outside</p>"
    );
}

#[test]
fn body_spanning_blank_lines() {
    assert_eq!(
        render("::: box\n    one\n\n    two\n\nafter"),
        "<div class=\"box\">\n<p>one</p>\n<p>two</p>\n</div>\n<p>after</p>"
    );
}

#[test]
fn positional_values_and_attributes() {
    assert_eq!(
        render("::: box wide style=\"color: red\""),
        "<div class=\"box wide\" style=\"color: red\"></div>"
    );
}

#[test]
fn unclaimed_blocks_render_together() {
    let html = render("- a\n\n- b\n\n::: box\n\n- c");
    assert_eq!(html.matches("<ul>").count(), 2);
    assert!(html.contains("<div class=\"box\"></div>"));
}

#[test]
fn plain_markdown_passes_through() {
    assert_eq!(render("Hello *world*"), "<p>Hello <em>world</em></p>");
}

#[test]
fn text_is_escaped() {
    assert_eq!(
        render("::: note \"<b> & co\""),
        "<div class=\"admonition note\">\n\
         <div class=\"admonition-title\">&lt;b&gt; &amp; co</div>\n\
         </div>"
    );
}

#[test]
fn line_endings_and_tabs_are_normalized() {
    assert_eq!(
        render("::: box\r\n\tbody\r\n"),
        "<div class=\"box\">\n<p>body</p>\n</div>"
    );
}

// ---------------------------------------------------------------------------
// Diagnostics
// ---------------------------------------------------------------------------

#[test]
fn missing_attribute_still_renders() {
    let mut registry = Registry::new(container());
    registry.register(
        "strict",
        FnGenerator::new(
            Signature::new().context().param(Param::either("key")),
            |_ctx, call| {
                let key = call.text("key").unwrap_or("?");
                Ok(Element::new("span").with_text(format!("[{}]", key)).into())
            },
        ),
    );
    let conversion = convert_with(&Converter::new(registry), "::: strict");
    assert_eq!(conversion.html, "<span>[]</span>");
    assert_eq!(conversion.diagnostics.len(), 1);
    assert_eq!(
        conversion.diagnostics[0].to_string(),
        "In block 'strict', missing mandatory attribute 'key'"
    );
}

#[test]
fn extra_values_are_reported_per_block() {
    let conversion = convert_with(&converter(), "::: note \"T\" extra unexpected=1\n    x");
    let messages: Vec<String> = conversion.diagnostics.iter().map(|d| d.to_string()).collect();
    assert_eq!(
        messages,
        vec![
            "In block 'note', ignored extra attribute 'extra'",
            "In block 'note', ignoring unexpected parameter 'unexpected'",
        ]
    );
    assert!(conversion.html.contains("<p>x</p>"));
}

#[test]
fn duplicated_keyword_keeps_last() {
    let conversion = convert_with(&converter(), "::: box k=1 k=2");
    assert_eq!(conversion.html, "<div class=\"box\" k=\"2\"></div>");
    assert_eq!(
        conversion.diagnostics[0].kind,
        DiagnosticKind::DuplicateParameter("k".into())
    );
}

// ---------------------------------------------------------------------------
// Generator outputs
// ---------------------------------------------------------------------------

fn with_generator(
    block_type: &str,
    func: impl Fn(&mut BlockContext<'_>, AdaptedCall) -> Result<Output, ConvertError> + 'static,
) -> Converter {
    let mut registry = Registry::new(container());
    registry.register(block_type, FnGenerator::new(Signature::new().context(), func));
    Converter::new(registry)
}

#[test]
fn markup_output_is_spliced() {
    let converter = with_generator("raw", |_, _| Ok("<hr class=\"x\">".into()));
    assert_eq!(convert_with(&converter, "::: raw\n\nafter").html, "<hr class=\"x\">\n<p>after</p>");
}

#[test]
fn byte_output_is_decoded() {
    let converter = with_generator("bytes", |_, _| Ok(b"<i>caf\xc3\xa9</i>".to_vec().into()));
    assert_eq!(convert_with(&converter, "::: bytes").html, "<i>café</i>");
}

#[test]
fn generator_writing_through_context() {
    let converter = with_generator("direct", |ctx, _| {
        ctx.parent.push_element(Element::new("span").with_text("direct"));
        Ok(Output::Nothing)
    });
    let conversion = convert_with(&converter, "::: direct");
    assert_eq!(conversion.html, "<span>direct</span>");
    assert!(matches!(conversion.root.children.as_slice(), [Node::Element(e)] if e.tag == "span"));
}

#[test]
fn generator_errors_propagate() {
    let converter = with_generator("broken", |ctx, _| {
        Err(ConvertError::generator(ctx.block_type, "no luck"))
    });
    let err = converter.convert("::: broken").expect_err("should fail");
    assert_eq!(err.to_string(), "generator for 'broken' failed: no luck");
}

#[test]
fn runaway_nesting_is_stopped() {
    let converter = with_generator("again", |ctx, _| {
        let mut div = Element::new("div");
        ctx.parse_chunk(&mut div, "::: again")?;
        Ok(div.into())
    });
    let err = converter.convert("::: again").expect_err("should fail");
    assert!(matches!(err, ConvertError::NestingTooDeep(64)));
}

// ---------------------------------------------------------------------------
// Metadata and configuration
// ---------------------------------------------------------------------------

fn echo_setting() -> Converter {
    with_generator("echo", |ctx, _| {
        let title = ctx
            .metadata
            .and_then(|m| m.get("title"))
            .and_then(|v| v.as_str())
            .unwrap_or("untitled");
        let mode = ctx.config_str("mode").unwrap_or("none");
        Ok(Element::new("p").with_text(format!("{} {}", title, mode)).into())
    })
}

#[test]
fn front_matter_reaches_generators() {
    let conversion = convert_with(&echo_setting(), "---\ntitle = \"Doc\"\n---\n::: echo\n");
    assert_eq!(conversion.html, "<p>Doc none</p>");
    let metadata = conversion.metadata.expect("metadata");
    assert_eq!(metadata.get("title").and_then(|v| v.as_str()), Some("Doc"));
}

#[test]
fn invalid_front_matter_is_left_as_text() {
    let conversion = convert_with(&echo_setting(), "---\nnot = = toml\n---\n\n::: echo");
    assert!(conversion.metadata.is_none());
    assert!(matches!(
        conversion.diagnostics.as_slice(),
        [d] if matches!(d.kind, DiagnosticKind::FrontMatter(_))
    ));
    assert!(conversion.html.contains("<hr />"));
    assert!(conversion.html.ends_with("<p>untitled none</p>"));
}

#[test]
fn heading_between_rules_is_not_front_matter() {
    let conversion = convert_with(&echo_setting(), "---\n# Welcome\n---\n\nSome text\n");
    assert!(conversion.metadata.is_none());
    assert!(conversion.diagnostics.is_empty());
    assert!(conversion.html.starts_with("<hr />"));
    assert!(conversion.html.contains("<h1>Welcome</h1>"));
    assert!(conversion.html.ends_with("<p>Some text</p>"));
}

#[test]
fn empty_front_matter_is_consumed() {
    let conversion = convert_with(&echo_setting(), "---\n---\n::: echo");
    assert_eq!(conversion.metadata, Some(toml::Table::new()));
    assert_eq!(conversion.html, "<p>untitled none</p>");
}

#[test]
fn front_matter_can_be_disabled() {
    let converter = echo_setting().with_front_matter(false);
    let conversion = convert_with(&converter, "---\ntitle = \"Doc\"\n---\n\n::: echo");
    assert!(conversion.metadata.is_none());
    assert!(conversion.diagnostics.is_empty());
    assert!(conversion.html.ends_with("<p>untitled none</p>"));
}

#[test]
fn config_reaches_generators() {
    let mut config = toml::Table::new();
    config.insert("mode".into(), toml::Value::String("fast".into()));
    let converter = echo_setting().with_config(config);
    assert_eq!(convert_with(&converter, "::: echo").html, "<p>untitled fast</p>");
}
