/// One classified unit of renderable content, derived from a single source line.
///
/// The set is closed: article bodies only use this subset, and anything the
/// classifier does not recognise lands in `Paragraph`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Top-level heading (`# ` prefix).
    Heading1 { text: String },
    /// Second-level heading (`## ` prefix). Deeper headings are not part of
    /// the subset and render as paragraphs.
    Heading2 { text: String },
    /// List item with a bold lead-in label: `- **label**: detail`.
    LabeledItem { label: String, detail: String },
    /// Plain list item (`- ` prefix).
    ListItem { text: String },
    /// A blank source line. Kept as an explicit block so vertical rhythm
    /// survives the round trip to the view layer.
    Spacer,
    /// Fallback for any other line, text carried verbatim (no trimming).
    Paragraph { text: String },
}

/// Ordered output of a render pass, one entry per contributing source line.
///
/// Built fresh on every [`render`](super::render) call and owned by the
/// caller; never cached or mutated in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockSequence {
    pub blocks: Vec<Block>,
}

impl BlockSequence {
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }
}

impl From<Vec<Block>> for BlockSequence {
    fn from(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }
}

impl IntoIterator for BlockSequence {
    type Item = Block;
    type IntoIter = std::vec::IntoIter<Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.into_iter()
    }
}

impl<'a> IntoIterator for &'a BlockSequence {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}
