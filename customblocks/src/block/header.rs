use std::ops::Range;

use crate::params::lexer::is_name_char;

const FENCE: &str = ":::";

/// A block header located inside a text block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMatch<'a> {
    /// Byte span of the match. Includes the newline before the header line
    /// (when there is one) and the newline ending it.
    pub span: Range<usize>,
    pub block_type: &'a str,
    /// Everything after the type name up to the end of the line.
    pub params: &'a str,
    /// Text preceding the header, without the separating newline.
    pub before: &'a str,
    /// Text following the header line.
    pub after: &'a str,
}

/// Find the first line of `block` that is a block header.
pub fn find_header(block: &str) -> Option<HeaderMatch<'_>> {
    let mut line_start = 0;
    loop {
        let line_end = block[line_start..]
            .find('\n')
            .map_or(block.len(), |i| line_start + i);
        let line = &block[line_start..line_end];

        if let Some((block_type, params)) = match_header_line(line) {
            let start = line_start.saturating_sub(1);
            let end = (line_end + 1).min(block.len());
            return Some(HeaderMatch {
                span: start..end,
                block_type,
                params,
                before: &block[..start],
                after: &block[end..],
            });
        }

        if line_end >= block.len() {
            return None;
        }
        line_start = line_end + 1;
    }
}

/// Match `::: type params...` against a single line, returning the type name
/// and the raw parameter text.
fn match_header_line(line: &str) -> Option<(&str, &str)> {
    let rest = line.strip_prefix(FENCE)?;
    let rest = rest.trim_start_matches([' ', '\t']);

    let type_len = rest.find(|c: char| !is_name_char(c)).unwrap_or(rest.len());
    if type_len == 0 {
        return None;
    }

    let (block_type, params) = rest.split_at(type_len);
    // The type name must end at whitespace or end of line: `:::a.b` is not a header.
    if params.chars().next().is_some_and(|c| !c.is_whitespace()) {
        return None;
    }

    Some((block_type, params))
}

/// Whether `line` is an explicit end marker: exactly `:::`.
pub fn is_end_marker(line: &str) -> bool {
    line == FENCE
}
