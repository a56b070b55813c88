//! The host block pipeline: splits text into blocks, offers each to the
//! registered block processors and renders whatever nobody claims as
//! CommonMark.

pub mod commonmark;
pub mod stream;

use std::cell::{Cell, RefCell};

pub use stream::BlockStream;

use crate::diagnostic::Diagnostic;
use crate::error::ConvertError;
use crate::html::Element;

/// Width of one indentation unit, in columns.
pub const TAB_LENGTH: usize = 4;

/// Deepest `parse_chunk` recursion allowed.
pub const MAX_NESTING: usize = 64;

/// A processor for one kind of block syntax.
pub trait BlockProcessor {
    /// Whether the head block is for this processor. Must not mutate anything.
    fn test(&self, parent: &Element, block: &str) -> bool;

    /// Consume the head block (and possibly more) from `blocks`, appending
    /// output to `parent`. Must make progress on the stream.
    fn run(
        &self,
        parser: &BlockParser<'_>,
        parent: &mut Element,
        blocks: &mut BlockStream,
    ) -> Result<(), ConvertError>;
}

/// Block-processing pipeline for one document conversion.
pub struct BlockParser<'a> {
    processors: Vec<Box<dyn BlockProcessor + 'a>>,
    metadata: Option<&'a toml::Table>,
    diagnostics: RefCell<Vec<Diagnostic>>,
    depth: Cell<usize>,
}

impl Default for BlockParser<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> BlockParser<'a> {
    pub fn new() -> Self {
        BlockParser {
            processors: Vec::new(),
            metadata: None,
            diagnostics: RefCell::new(Vec::new()),
            depth: Cell::new(0),
        }
    }

    /// Register a processor. Processors are tried in registration order.
    pub fn with_processor(mut self, processor: impl BlockProcessor + 'a) -> Self {
        self.processors.push(Box::new(processor));
        self
    }

    pub fn with_metadata(mut self, metadata: Option<&'a toml::Table>) -> Self {
        self.metadata = metadata;
        self
    }

    /// Document-level metadata (front matter), if any.
    pub fn metadata(&self) -> Option<&'a toml::Table> {
        self.metadata
    }

    pub fn tab_length(&self) -> usize {
        TAB_LENGTH
    }

    /// Record a non-fatal diagnostic.
    pub fn warn(&self, diagnostic: Diagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic);
    }

    pub fn take_diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.take()
    }

    /// Parse a piece of text into `parent`, as if it were a document of its own.
    pub fn parse_chunk(&self, parent: &mut Element, text: &str) -> Result<(), ConvertError> {
        let depth = self.depth.get();
        if depth >= MAX_NESTING {
            return Err(ConvertError::NestingTooDeep(MAX_NESTING));
        }

        self.depth.set(depth + 1);
        let result = self.parse_blocks(parent, &mut BlockStream::from_text(text));
        self.depth.set(depth);
        result
    }

    /// Drain `blocks`, dispatching each head block to the first processor
    /// that accepts it.
    pub fn parse_blocks(
        &self,
        parent: &mut Element,
        blocks: &mut BlockStream,
    ) -> Result<(), ConvertError> {
        while let Some(claimant) = blocks.peek().map(|head| self.claimant(parent, head)) {
            match claimant {
                Some(index) => self.processors[index].run(self, parent, blocks)?,
                None => self.render_unclaimed(parent, blocks),
            }
        }
        Ok(())
    }

    fn claimant(&self, parent: &Element, block: &str) -> Option<usize> {
        self.processors.iter().position(|p| p.test(parent, block))
    }

    /// Take the head block and every following block nobody claims,
    /// and render them together so multi-block Markdown survives.
    fn render_unclaimed(&self, parent: &mut Element, blocks: &mut BlockStream) {
        let mut pending = Vec::new();
        while let Some(block) = blocks.take() {
            pending.push(block);
            match blocks.peek() {
                Some(next) if self.claimant(parent, next).is_none() => {}
                _ => break,
            }
        }
        commonmark::render_into(parent, &pending.join("\n\n"));
    }
}
