use std::sync::LazyLock;

use regex::Regex;

use super::types::Block;

/// `- **label**: detail`. Non-greedy label, unanchored search, matching the
/// pattern existing articles were written against.
static LABELED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"- \*\*(.+?)\*\*: (.+)").expect("labeled-item pattern is valid"));

/// Classifies a single line into at most one [`Block`].
///
/// Classification is line-local: each line is classified independently,
/// without reference to surrounding lines. Rules are tried top to bottom and
/// the first match wins; `Paragraph` is the universal fallback, so the only
/// way to get `None` is the malformed-labeled-item case below.
pub fn classify_line(line: &str) -> Option<Block> {
    if let Some(text) = line.strip_prefix("# ") {
        return Some(Block::Heading1 {
            text: text.to_string(),
        });
    }

    if let Some(text) = line.strip_prefix("## ") {
        return Some(Block::Heading2 {
            text: text.to_string(),
        });
    }

    if line.starts_with("- **") {
        // A `- **` line that doesn't complete the `- **label**: detail` shape
        // emits no block at all. Existing articles depend on the omission, so
        // such lines must not fall through to ListItem or Paragraph.
        return LABELED_ITEM.captures(line).map(|caps| Block::LabeledItem {
            label: caps[1].to_string(),
            detail: caps[2].to_string(),
        });
    }

    if let Some(text) = line.strip_prefix("- ") {
        return Some(Block::ListItem {
            text: text.to_string(),
        });
    }

    if line.trim().is_empty() {
        return Some(Block::Spacer);
    }

    Some(Block::Paragraph {
        text: line.to_string(),
    })
}
