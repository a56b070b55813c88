//! The custom block processor: recognizes `::: type params` headers,
//! collects the indented body and dispatches to a generator.

pub mod collector;
pub mod header;

use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::error::ConvertError;
use crate::generator::{BlockContext, Registry, adapt, append_output};
use crate::html::Element;
use crate::params::parse_params;
use crate::parser::{BlockParser, BlockProcessor, BlockStream};

pub use collector::{collect_content, detab};
pub use header::{HeaderMatch, find_header};

/// Block processor for custom blocks, bound to one registry and one
/// generator configuration for the length of a conversion.
pub struct CustomBlockProcessor<'a> {
    registry: &'a Registry,
    config: &'a toml::Table,
}

impl<'a> CustomBlockProcessor<'a> {
    pub fn new(registry: &'a Registry, config: &'a toml::Table) -> Self {
        CustomBlockProcessor { registry, config }
    }
}

impl BlockProcessor for CustomBlockProcessor<'_> {
    fn test(&self, _parent: &Element, block: &str) -> bool {
        find_header(block).is_some()
    }

    fn run(
        &self,
        parser: &BlockParser<'_>,
        parent: &mut Element,
        blocks: &mut BlockStream,
    ) -> Result<(), ConvertError> {
        let Some(block) = blocks.take() else {
            return Ok(());
        };
        let header = find_header(&block).ok_or_else(|| ConvertError::HeaderMismatch(block.clone()))?;

        if !header.before.is_empty() {
            parser.parse_chunk(parent, header.before)?;
        }

        let block_type = header.block_type;
        let params = parse_params(header.params);
        blocks.putback(header.after.to_string());
        let content = collect_content(blocks, parser.tab_length());

        for key in &params.duplicates {
            parser.warn(Diagnostic::in_block(
                block_type,
                DiagnosticKind::DuplicateParameter(key.clone()),
            ));
        }

        let generator = self.registry.resolve(block_type)?;
        let (call, diagnostics) = adapt(&generator.signature(), block_type, params);
        for diagnostic in diagnostics {
            parser.warn(diagnostic);
        }

        log::debug!("rendering block '{}' ({} bytes of content)", block_type, content.len());
        let output = {
            let mut ctx = BlockContext::new(block_type, parent, content, parser, self.config);
            generator.generate(&mut ctx, call)?
        };
        append_output(parent, output);
        Ok(())
    }
}
