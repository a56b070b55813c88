use std::rc::Rc;

use customblocks::generator::{
    FnGenerator, GeneratorRef, Module, ModuleMap, Output, Registry, Signature,
};
use customblocks::{ConvertError, Converter, ExtensionConfig, ResolveError};
use pretty_assertions::assert_eq;

/// A generator that renders its own name.
fn named(name: &'static str) -> FnGenerator {
    FnGenerator::new(Signature::new().context(), move |_, _| {
        Ok(Output::Markup(format!("<p>{}</p>", name)))
    })
}

fn modules() -> ModuleMap {
    ModuleMap::new().with_module(
        "site.blocks",
        Module::new()
            .generator("callout", named("callout"))
            .generator("section", named("section"))
            .value("VERSION", "1.0"),
    )
}

fn registry() -> Registry {
    let mut registry = Registry::new(named("fallback")).with_loader(modules());
    registry.register("note", named("builtin-note"));
    registry.register("tip", GeneratorRef::symbolic("site.blocks:callout"));
    registry
}

fn render(registry: Registry, source: &str) -> String {
    Converter::new(registry)
        .convert(source)
        .expect("conversion failed")
        .html
}

#[test]
fn builtins_then_fallback() {
    assert_eq!(render(registry(), "::: note"), "<p>builtin-note</p>");
    assert_eq!(render(registry(), "::: unknown"), "<p>fallback</p>");
}

#[test]
fn symbolic_builtin_resolves_lazily() {
    assert_eq!(render(registry(), "::: tip"), "<p>callout</p>");
}

#[test]
fn overrides_win_over_builtins() {
    let mut registry = registry();
    registry.override_type("note", Some(named("override").into()));
    assert_eq!(render(registry, "::: note"), "<p>override</p>");
}

#[test]
fn none_override_forces_fallback() {
    let mut registry = registry();
    registry.override_type("note", None);
    assert_eq!(render(registry, "::: note"), "<p>fallback</p>");
}

#[test]
fn symbolic_resolution_is_cached() {
    let registry = registry();
    let first = registry.resolve("tip").expect("resolves");
    let second = registry.resolve("tip").expect("resolves");
    assert!(Rc::ptr_eq(&first, &second));
}

#[test]
fn types_are_sorted_and_exclude_unbound() {
    let mut registry = registry();
    registry.override_type("alpha", Some(named("alpha").into()));
    registry.override_type("zeta", None);
    assert_eq!(registry.types(), vec!["alpha", "note", "tip"]);
}

fn resolve_error(reference: &str) -> ResolveError {
    let mut registry = registry();
    registry.override_type("bad", Some(GeneratorRef::symbolic(reference)));
    match registry.resolve("bad") {
        Ok(_) => panic!("'{}' should not resolve", reference),
        Err(err) => err,
    }
}

#[test]
fn reference_without_separator() {
    assert_eq!(
        resolve_error("site.blocks.callout"),
        ResolveError::MissingSeparator("site.blocks.callout".into())
    );
}

#[test]
fn reference_to_unknown_module() {
    assert_eq!(
        resolve_error("nowhere:thing"),
        ResolveError::ModuleNotFound("nowhere".into())
    );
}

#[test]
fn reference_to_unknown_attribute() {
    assert_eq!(
        resolve_error("site.blocks:missing"),
        ResolveError::AttributeNotFound {
            module: "site.blocks".into(),
            symbol: "missing".into(),
        }
    );
}

#[test]
fn reference_to_non_generator() {
    let err = resolve_error("site.blocks:VERSION");
    assert_eq!(err.to_string(), "'site.blocks:VERSION' is not a generator");
}

#[test]
fn resolution_errors_abort_conversion() {
    let mut registry = registry();
    registry.override_type("bad", Some(GeneratorRef::symbolic("nowhere:thing")));
    let err = Converter::new(registry)
        .convert("Fine paragraph\n\n::: bad")
        .expect_err("should fail");
    assert!(matches!(
        err,
        ConvertError::Resolve(ResolveError::ModuleNotFound(_))
    ));
}

#[test]
fn unused_bad_reference_is_harmless() {
    let mut registry = registry();
    registry.override_type("bad", Some(GeneratorRef::symbolic("nowhere:thing")));
    assert_eq!(render(registry, "::: note"), "<p>builtin-note</p>");
}

// ---------------------------------------------------------------------------
// Extension config
// ---------------------------------------------------------------------------

const CONFIG: &str = r#"
fallback = "site.blocks:section"

[generators]
note = ""
warning = "site.blocks:callout"

[config]
youtube_inline_fluid_style = true
"#;

#[test]
fn config_from_toml() {
    let config = ExtensionConfig::from_toml(CONFIG).expect("valid config");
    assert_eq!(config.fallback.as_deref(), Some("site.blocks:section"));
    assert_eq!(config.generators.len(), 2);
    assert_eq!(
        config.config.get("youtube_inline_fluid_style"),
        Some(&toml::Value::Boolean(true))
    );
}

#[test]
fn config_is_applied_to_registry() {
    let config = ExtensionConfig::from_toml(CONFIG).expect("valid config");
    let mut registry = registry();
    config.apply(&mut registry);

    let converter = Converter::new(registry);
    let render = |source: &str| converter.convert(source).expect("conversion failed").html;
    assert_eq!(render("::: note"), "<p>section</p>");
    assert_eq!(render("::: warning"), "<p>callout</p>");
    assert_eq!(render("::: other"), "<p>section</p>");
    assert_eq!(render("::: tip"), "<p>callout</p>");
}

#[test]
fn empty_config_is_default() {
    assert_eq!(
        ExtensionConfig::from_toml("").expect("valid config"),
        ExtensionConfig::default()
    );
}

#[test]
fn unknown_config_keys_are_rejected() {
    assert!(ExtensionConfig::from_toml("renderers = {}").is_err());
}
