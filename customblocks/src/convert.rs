use crate::block::CustomBlockProcessor;
use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::error::ConvertError;
use crate::generator::Registry;
use crate::html::Element;
use crate::parser::{BlockParser, TAB_LENGTH};

/// The result of converting one document.
#[derive(Debug)]
pub struct Conversion {
    pub html: String,
    pub root: Element,
    pub metadata: Option<toml::Table>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Markdown-to-HTML conversion with custom blocks enabled.
///
/// Holds no per-document state; each `convert` call builds its own pipeline.
pub struct Converter {
    registry: Registry,
    config: toml::Table,
    front_matter: bool,
}

impl Converter {
    pub fn new(registry: Registry) -> Self {
        Converter {
            registry,
            config: toml::Table::new(),
            front_matter: true,
        }
    }

    /// Settings handed to every generator through its context.
    pub fn with_config(mut self, config: toml::Table) -> Self {
        self.config = config;
        self
    }

    pub fn with_front_matter(mut self, enabled: bool) -> Self {
        self.front_matter = enabled;
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn convert(&self, source: &str) -> Result<Conversion, ConvertError> {
        let text = normalize(source);
        let mut diagnostics = Vec::new();

        let (metadata, body) = if self.front_matter {
            match split_front_matter(&text) {
                Some((table_src, body)) => match table_src.parse::<toml::Table>() {
                    // Only comments between the rules: ordinary Markdown, such as a
                    // heading framed by thematic breaks.
                    Ok(table) if table.is_empty() && !table_src.trim().is_empty() => {
                        (None, text.as_str())
                    }
                    Ok(table) => (Some(table), body),
                    Err(err) => {
                        let reason = err.message().to_string();
                        diagnostics.push(Diagnostic::document(DiagnosticKind::FrontMatter(reason)));
                        (None, text.as_str())
                    }
                },
                None => (None, text.as_str()),
            }
        } else {
            (None, text.as_str())
        };

        let mut root = Element::new("root");
        {
            let parser = BlockParser::new()
                .with_processor(CustomBlockProcessor::new(&self.registry, &self.config))
                .with_metadata(metadata.as_ref());
            parser.parse_chunk(&mut root, body.trim_matches('\n'))?;
            diagnostics.extend(parser.take_diagnostics());
        }

        let html = root.inner_html().trim_end().to_string();
        Ok(Conversion {
            html,
            root,
            metadata,
            diagnostics,
        })
    }
}

/// Line endings to `\n`, tabs expanded to the indentation unit, and
/// whitespace-only lines emptied so blank lines split blocks.
fn normalize(source: &str) -> String {
    let source = source.trim_start_matches('\u{feff}').replace("\r\n", "\n").replace('\r', "\n");
    source
        .split('\n')
        .map(|line| {
            let line = expand_tabs(line);
            if line.trim().is_empty() { String::new() } else { line }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn expand_tabs(line: &str) -> String {
    if !line.contains('\t') {
        return line.to_string();
    }
    let mut out = String::with_capacity(line.len() + TAB_LENGTH);
    let mut column = 0;
    for c in line.chars() {
        if c == '\t' {
            let width = TAB_LENGTH - column % TAB_LENGTH;
            out.extend(std::iter::repeat_n(' ', width));
            column += width;
        } else {
            out.push(c);
            column += 1;
        }
    }
    out
}

/// Split a leading `---` delimited block off `text`, returning its contents
/// and the remaining body.
fn split_front_matter(text: &str) -> Option<(&str, &str)> {
    let after_open = text.strip_prefix("---\n")?;
    let (table, rest) = match after_open.strip_prefix("---") {
        Some(rest) => ("", rest),
        None => {
            let close = after_open.find("\n---")?;
            (&after_open[..close], &after_open[close + 4..])
        }
    };
    // the closing delimiter must be a whole line
    let body = if rest.is_empty() { rest } else { rest.strip_prefix('\n')? };
    Some((table, body))
}
