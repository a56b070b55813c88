use super::header::is_end_marker;
use crate::parser::BlockStream;

/// Split `block` into its leading indented lines, dedented by one unit of
/// `indent` columns, and the rest starting at the first unindented line.
///
/// Blank lines count as indented and come out empty.
pub fn detab(block: &str, indent: usize) -> (String, String) {
    let prefix = " ".repeat(indent);
    let lines: Vec<&str> = block.split('\n').collect();

    let mut indented = Vec::new();
    for line in &lines {
        if let Some(stripped) = line.strip_prefix(prefix.as_str()) {
            indented.push(stripped);
        } else if line.trim().is_empty() {
            indented.push("");
        } else {
            break;
        }
    }

    let unindented = lines[indented.len()..].join("\n");
    (indented.join("\n"), unindented)
}

/// Drop a leading `:::` end marker line from `text`.
fn strip_end_marker(text: &str) -> &str {
    let (first, rest) = text.split_once('\n').unwrap_or((text, ""));
    if is_end_marker(first) { rest } else { text }
}

/// Collect the body of a custom block from the head of `blocks`.
///
/// Blocks are taken while they are indented; their dedented content is joined
/// with blank lines. The first unindented remainder ends the body and is put
/// back as the new head, minus a leading end marker. Nothing is put back when
/// the marker was all there was.
pub fn collect_content(blocks: &mut BlockStream, indent: usize) -> String {
    let mut content = Vec::new();

    while let Some(block) = blocks.take() {
        let (indented, unindented) = detab(&block, indent);
        if !indented.is_empty() {
            content.push(indented);
        }
        if !unindented.is_empty() {
            let remainder = strip_end_marker(&unindented);
            if !remainder.is_empty() {
                blocks.putback(remainder.to_string());
            }
            break;
        }
    }

    content.join("\n\n")
}
