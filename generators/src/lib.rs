//! Built-in generators for custom blocks, and the default wiring that binds
//! them to block types.

pub mod container;
pub mod embed;
pub mod figure;

use customblocks::generator::{Module, ModuleMap, Registry};
use customblocks::{Converter, ExtensionConfig};

pub use container::{Admonition, Container};
pub use embed::{Goteo, Verkami, Vimeo, YouTube};
pub use figure::Figure;

/// Module path under which the built-ins are addressable as
/// `customblocks.generators:<name>`.
pub const MODULE: &str = "customblocks.generators";

/// Block types rendered as admonitions.
pub const ADMONITION_TYPES: &[&str] = &["note", "notice", "info", "warning", "danger"];

/// The built-in generators as a module of named exports.
pub fn builtin_module() -> Module {
    Module::new()
        .generator("container", Container)
        .generator("admonition", Admonition)
        .generator("figure", Figure)
        .generator("youtube", YouTube)
        .generator("vimeo", Vimeo)
        .generator("verkami", Verkami)
        .generator("goteo", Goteo)
}

/// A loader that knows the built-in module.
pub fn module_map() -> ModuleMap {
    ModuleMap::new().with_module(MODULE, builtin_module())
}

/// The default registry: built-in types bound, `container` as fallback.
pub fn registry() -> Registry {
    registry_with(module_map())
}

/// Like [`registry`], resolving symbolic references through `modules`,
/// which should still carry the built-in module.
pub fn registry_with(modules: ModuleMap) -> Registry {
    let mut registry = Registry::new(Container).with_loader(modules);
    for block_type in ADMONITION_TYPES {
        registry.register(*block_type, Admonition);
    }
    registry.register("figure", Figure);
    registry.register("youtube", YouTube);
    registry.register("vimeo", Vimeo);
    registry.register("verkami", Verkami);
    registry.register("goteo", Goteo);
    registry
}

/// A converter over the default registry with `config` applied.
pub fn converter(config: &ExtensionConfig) -> Converter {
    let mut registry = registry();
    log::debug!(
        "applying extension config: {} override(s), fallback {:?}",
        config.generators.len(),
        config.fallback
    );
    config.apply(&mut registry);
    Converter::new(registry).with_config(config.config.clone())
}
