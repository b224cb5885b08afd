//! # Markdown-Subset Rendering
//!
//! Converts a raw article body into an ordered sequence of typed content
//! blocks for display. The format is a deliberately small Markdown subset:
//! two heading levels, plain and labeled list items, blank-line spacers, and
//! paragraphs as the fallback.
//!
//! Rendering is a pure function over the input text. Each line is classified
//! on its own (`classify`), so no block's type depends on its neighbours, and
//! re-rendering the same body always yields the same sequence.

pub mod classify;
pub mod types;

pub use classify::classify_line;
pub use types::{Block, BlockSequence};

/// Renders a raw article body into display blocks, preserving source order.
///
/// Total over all inputs: there is no error path. The output holds one block
/// per source line, except for malformed labeled-item lines, which contribute
/// nothing (see [`classify_line`]).
pub fn render(doc: &str) -> BlockSequence {
    BlockSequence {
        blocks: doc.split('\n').filter_map(classify_line).collect(),
    }
}
