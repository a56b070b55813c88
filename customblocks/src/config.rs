use std::collections::BTreeMap;

use serde::Deserialize;

use crate::generator::{GeneratorRef, Registry};

/// Extension settings, as read from TOML.
///
/// ```toml
/// fallback = "mysite.blocks:section"
///
/// [generators]
/// note = "mysite.blocks:callout"
/// warning = ""            # use the fallback for this type
///
/// [config]
/// youtube_inline_fluid_style = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtensionConfig {
    /// `module:symbol` reference replacing the fallback generator.
    pub fallback: Option<String>,
    /// Per-type `module:symbol` overrides. An empty reference unbinds the type.
    pub generators: BTreeMap<String, String>,
    /// Settings handed to generators.
    pub config: toml::Table,
}

impl ExtensionConfig {
    pub fn from_toml(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }

    /// Install the configured bindings into `registry`.
    pub fn apply(&self, registry: &mut Registry) {
        if let Some(fallback) = &self.fallback {
            registry.set_fallback(GeneratorRef::symbolic(fallback.as_str()));
        }
        for (block_type, reference) in &self.generators {
            let generator = if reference.is_empty() {
                None
            } else {
                Some(GeneratorRef::symbolic(reference.as_str()))
            };
            registry.override_type(block_type.as_str(), generator);
        }
    }
}
