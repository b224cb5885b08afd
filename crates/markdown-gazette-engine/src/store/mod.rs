//! # Article Store
//!
//! Lookup and listing of article records. The store is an explicit handle
//! constructed by the caller and passed to whatever needs it; there is no
//! process-wide client.
//!
//! Not-found is not an error: an unknown slug, and an unpublished article
//! looked up for public display, both come back as `Ok(None)`. `StoreError`
//! is reserved for genuine failures (bad directory, IO, unparseable article
//! metadata).

pub mod fs;

use relative_path::RelativePathBuf;

use crate::models::Article;

pub use fs::FsArticleStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Invalid articles directory: {0}")]
    InvalidArticlesDir(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Article {path} has no front matter block")]
    MissingFrontMatter { path: RelativePathBuf },
    #[error("Failed to parse front matter in {path}: {source}")]
    FrontMatter {
        path: RelativePathBuf,
        source: toml::de::Error,
    },
}

/// Source of article records for display.
pub trait ArticleStore {
    /// Looks up a single article by slug.
    ///
    /// Returns `Ok(None)` for unknown slugs and for articles with
    /// `published = false`: unpublished records are invisible to readers.
    fn article_by_slug(&self, slug: &str) -> Result<Option<Article>, StoreError>;

    /// All published articles, newest publish time first. Articles without a
    /// publish time sort after all dated ones.
    fn published_articles(&self) -> Result<Vec<Article>, StoreError>;
}
