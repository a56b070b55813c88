/// The pending text blocks of one chunk, consumed from the front.
///
/// A cursor over an indexed sequence: taking a block advances the cursor,
/// putting one back steps it back over the slot just vacated.
#[derive(Debug, Clone, Default)]
pub struct BlockStream {
    blocks: Vec<String>,
    cursor: usize,
}

impl BlockStream {
    pub fn new(blocks: Vec<String>) -> Self {
        BlockStream { blocks, cursor: 0 }
    }

    /// Split a chunk of text into blocks on blank lines.
    pub fn from_text(text: &str) -> Self {
        Self::new(text.split("\n\n").map(str::to_string).collect())
    }

    pub fn peek(&self) -> Option<&str> {
        self.blocks.get(self.cursor).map(String::as_str)
    }

    pub fn take(&mut self) -> Option<String> {
        let block = std::mem::take(self.blocks.get_mut(self.cursor)?);
        self.cursor += 1;
        log::trace!("took block {}: {:?}", self.cursor - 1, block);
        Some(block)
    }

    /// Make `block` the new head.
    pub fn putback(&mut self, block: String) {
        log::trace!("put back {:?}", block);
        if self.cursor > 0 {
            self.cursor -= 1;
            self.blocks[self.cursor] = block;
        } else {
            self.blocks.insert(0, block);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cursor >= self.blocks.len()
    }

    /// Number of blocks not yet taken.
    pub fn len(&self) -> usize {
        self.blocks.len().saturating_sub(self.cursor)
    }

    /// The blocks not yet taken, head first.
    pub fn remaining(&self) -> &[String] {
        &self.blocks[self.cursor.min(self.blocks.len())..]
    }
}
