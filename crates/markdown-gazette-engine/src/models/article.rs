use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A blog article record as consumed by the display layer.
///
/// `content` is the raw article body handed to
/// [`rendering::render`](crate::rendering::render); everything else is
/// listing/header metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub header_image: Option<String>,
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
}

impl Article {
    /// Publish date formatted for listings, empty when the article has none.
    pub fn published_at_display(&self) -> String {
        self.published_at
            .map(|at| at.format("%-d %B %Y").to_string())
            .unwrap_or_default()
    }
}
