pub mod models;
pub mod rendering;
pub mod store;


// Re-export key types for easier usage
pub use models::Article;
pub use rendering::{Block, BlockSequence, render};
pub use store::{ArticleStore, FsArticleStore, StoreError};
