use crate::error::ConvertError;
use crate::html::Element;
use crate::parser::BlockParser;

/// What a generator gets to know about the block it renders.
/// Built fresh for each block and dropped when the generator returns.
pub struct BlockContext<'a> {
    pub block_type: &'a str,
    /// Insertion point in the output tree.
    pub parent: &'a mut Element,
    /// The block body, dedented and not yet parsed.
    pub content: String,
    /// Document front matter, if any.
    pub metadata: Option<&'a toml::Table>,
    /// Extension-level settings for generators.
    pub config: &'a toml::Table,
    parser: &'a BlockParser<'a>,
}

impl<'a> BlockContext<'a> {
    pub fn new(
        block_type: &'a str,
        parent: &'a mut Element,
        content: String,
        parser: &'a BlockParser<'a>,
        config: &'a toml::Table,
    ) -> Self {
        BlockContext {
            block_type,
            parent,
            content,
            metadata: parser.metadata(),
            config,
            parser,
        }
    }

    /// Run `text` through the host's block pipeline into `target`.
    pub fn parse_chunk(&self, target: &mut Element, text: &str) -> Result<(), ConvertError> {
        self.parser.parse_chunk(target, text)
    }

    /// Parse the block body into `target`.
    pub fn parse_content(&self, target: &mut Element) -> Result<(), ConvertError> {
        self.parser.parse_chunk(target, &self.content)
    }

    /// A boolean setting from the extension config. Absent or non-boolean is false.
    pub fn config_flag(&self, key: &str) -> bool {
        self.config
            .get(key)
            .and_then(toml::Value::as_bool)
            .unwrap_or(false)
    }

    pub fn config_str(&self, key: &str) -> Option<&str> {
        self.config.get(key).and_then(toml::Value::as_str)
    }
}
