use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use relative_path::RelativePathBuf;
use serde::Deserialize;

use crate::models::Article;

use super::{ArticleStore, StoreError};

const FRONT_MATTER_DELIMITER: &str = "+++";

/// Filesystem-backed article store.
///
/// Articles live as `.md` files anywhere under the articles directory. Each
/// file opens with a TOML front matter block between `+++` delimiter lines;
/// the rest of the file is the raw article body.
#[derive(Debug, Clone)]
pub struct FsArticleStore {
    articles_root: PathBuf,
}

/// Article metadata as written in the front matter block.
///
/// `published_at` is an RFC 3339 string (e.g. `"2026-01-02T03:04:05Z"`).
/// `slug` is optional and defaults to the file's relative path with the `.md`
/// extension stripped.
#[derive(Debug, Deserialize)]
struct FrontMatter {
    title: String,
    slug: Option<String>,
    excerpt: Option<String>,
    header_image: Option<String>,
    #[serde(default)]
    published: bool,
    published_at: Option<DateTime<Utc>>,
}

impl FsArticleStore {
    /// Opens a store over an existing articles directory.
    pub fn open<P: Into<PathBuf>>(articles_root: P) -> Result<Self, StoreError> {
        let articles_root = articles_root.into();
        if !articles_root.exists() || !articles_root.is_dir() {
            return Err(StoreError::InvalidArticlesDir(
                articles_root.display().to_string(),
            ));
        }
        Ok(Self { articles_root })
    }

    pub fn articles_root(&self) -> &Path {
        &self.articles_root
    }

    /// Loads every article under the root, published or not, in path order.
    fn load_all(&self) -> Result<Vec<Article>, StoreError> {
        let mut files = Vec::new();
        scan_article_files(&self.articles_root, &mut files)?;
        files.sort();

        files
            .iter()
            .map(|path| self.load_article(path))
            .collect()
    }

    fn load_article(&self, path: &Path) -> Result<Article, StoreError> {
        let raw = fs::read_to_string(path).map_err(StoreError::Io)?;
        let relative = relative_to_root(path, &self.articles_root);

        let (matter, body) =
            split_front_matter(&raw).ok_or_else(|| StoreError::MissingFrontMatter {
                path: relative.clone(),
            })?;

        let matter: FrontMatter =
            toml::from_str(matter).map_err(|source| StoreError::FrontMatter {
                path: relative.clone(),
                source,
            })?;

        let slug = matter.slug.unwrap_or_else(|| slug_from_path(&relative));
        let content = if body.is_empty() {
            None
        } else {
            Some(body.to_string())
        };

        Ok(Article {
            title: matter.title,
            slug,
            excerpt: matter.excerpt,
            content,
            header_image: matter.header_image,
            published: matter.published,
            published_at: matter.published_at,
        })
    }
}

impl ArticleStore for FsArticleStore {
    fn article_by_slug(&self, slug: &str) -> Result<Option<Article>, StoreError> {
        let article = self
            .load_all()?
            .into_iter()
            .find(|a| a.slug == slug && a.published);
        Ok(article)
    }

    fn published_articles(&self) -> Result<Vec<Article>, StoreError> {
        let mut articles: Vec<Article> = self
            .load_all()?
            .into_iter()
            .filter(|a| a.published)
            .collect();

        // Descending by publish time; None orders below Some, so undated
        // articles land at the end.
        articles.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        Ok(articles)
    }
}

/// Splits a raw article file into (front matter TOML, body).
///
/// The file must start with a `+++` delimiter line and contain a closing one;
/// the body is everything after the closing delimiter's line break.
fn split_front_matter(raw: &str) -> Option<(&str, &str)> {
    let rest = raw.strip_prefix("+++\n")?;
    let end = rest.find("\n+++")?;
    let matter = &rest[..end];
    let after = &rest[end + 1 + FRONT_MATTER_DELIMITER.len()..];
    let body = after.strip_prefix('\n').unwrap_or(after);
    Some((matter, body))
}

fn slug_from_path(relative: &RelativePathBuf) -> String {
    let path = relative.as_str();
    path.strip_suffix(".md").unwrap_or(path).to_string()
}

fn relative_to_root(path: &Path, root: &Path) -> RelativePathBuf {
    let stripped = path.strip_prefix(root).unwrap_or(path);
    RelativePathBuf::from_path(stripped)
        .unwrap_or_else(|_| RelativePathBuf::from(stripped.to_string_lossy().replace('\\', "/")))
}

fn scan_article_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), StoreError> {
    for entry in fs::read_dir(dir).map_err(StoreError::Io)? {
        let path = entry.map_err(StoreError::Io)?.path();
        if path.is_dir() {
            scan_article_files(&path, files)?;
        } else if let Some(ext) = path.extension()
            && ext == "md"
        {
            files.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::tests::{create_test_article, create_test_articles_dir};

    use super::*;

    #[test]
    fn open_rejects_missing_directory() {
        let result = FsArticleStore::open("/this/path/does/not/exist");
        assert!(matches!(result, Err(StoreError::InvalidArticlesDir(_))));
    }

    #[test]
    fn loads_article_with_full_front_matter() {
        let dir = create_test_articles_dir();
        create_test_article(
            &dir,
            "hello.md",
            "+++\n\
             title = \"Hello\"\n\
             excerpt = \"First post\"\n\
             header_image = \"https://example.com/h.png\"\n\
             published = true\n\
             published_at = \"2026-01-02T03:04:05Z\"\n\
             +++\n\
             # Hello\n\
             body",
        );

        let store = FsArticleStore::open(dir.path()).unwrap();
        let article = store.article_by_slug("hello").unwrap().unwrap();

        assert_eq!(article.title, "Hello");
        assert_eq!(article.slug, "hello");
        assert_eq!(article.excerpt.as_deref(), Some("First post"));
        assert_eq!(
            article.header_image.as_deref(),
            Some("https://example.com/h.png")
        );
        assert!(article.published);
        assert_eq!(
            article.published_at.unwrap().to_rfc3339(),
            "2026-01-02T03:04:05+00:00"
        );
        assert_eq!(article.content.as_deref(), Some("# Hello\nbody"));
    }

    #[test]
    fn slug_defaults_to_relative_path_stem() {
        let dir = create_test_articles_dir();
        create_test_article(
            &dir,
            "notes/first.md",
            "+++\ntitle = \"Nested\"\npublished = true\n+++\nbody",
        );

        let store = FsArticleStore::open(dir.path()).unwrap();
        let article = store.article_by_slug("notes/first").unwrap().unwrap();
        assert_eq!(article.title, "Nested");
    }

    #[test]
    fn explicit_slug_wins_over_path() {
        let dir = create_test_articles_dir();
        create_test_article(
            &dir,
            "2026-01-whatever.md",
            "+++\ntitle = \"Custom\"\nslug = \"launch\"\npublished = true\n+++\nbody",
        );

        let store = FsArticleStore::open(dir.path()).unwrap();
        assert!(store.article_by_slug("launch").unwrap().is_some());
        assert!(store.article_by_slug("2026-01-whatever").unwrap().is_none());
    }

    #[test]
    fn unpublished_article_is_not_found_by_slug() {
        let dir = create_test_articles_dir();
        create_test_article(
            &dir,
            "draft.md",
            "+++\ntitle = \"Draft\"\npublished = false\n+++\nwip",
        );

        let store = FsArticleStore::open(dir.path()).unwrap();
        assert_eq!(store.article_by_slug("draft").unwrap(), None);
    }

    #[test]
    fn published_defaults_to_false() {
        let dir = create_test_articles_dir();
        create_test_article(&dir, "implicit.md", "+++\ntitle = \"Implicit\"\n+++\nbody");

        let store = FsArticleStore::open(dir.path()).unwrap();
        assert_eq!(store.article_by_slug("implicit").unwrap(), None);
        assert!(store.published_articles().unwrap().is_empty());
    }

    #[test]
    fn unknown_slug_is_not_found() {
        let dir = create_test_articles_dir();
        let store = FsArticleStore::open(dir.path()).unwrap();
        assert_eq!(store.article_by_slug("nope").unwrap(), None);
    }

    #[test]
    fn listing_excludes_drafts_and_orders_newest_first() {
        let dir = create_test_articles_dir();
        create_test_article(
            &dir,
            "older.md",
            "+++\ntitle = \"Older\"\npublished = true\npublished_at = \"2025-06-01T00:00:00Z\"\n+++\nbody",
        );
        create_test_article(
            &dir,
            "newer.md",
            "+++\ntitle = \"Newer\"\npublished = true\npublished_at = \"2026-02-01T00:00:00Z\"\n+++\nbody",
        );
        create_test_article(
            &dir,
            "undated.md",
            "+++\ntitle = \"Undated\"\npublished = true\n+++\nbody",
        );
        create_test_article(
            &dir,
            "draft.md",
            "+++\ntitle = \"Draft\"\npublished = false\n+++\nbody",
        );

        let store = FsArticleStore::open(dir.path()).unwrap();
        let titles: Vec<String> = store
            .published_articles()
            .unwrap()
            .into_iter()
            .map(|a| a.title)
            .collect();

        assert_eq!(titles, vec!["Newer", "Older", "Undated"]);
    }

    #[test]
    fn empty_body_yields_no_content() {
        let dir = create_test_articles_dir();
        create_test_article(&dir, "bare.md", "+++\ntitle = \"Bare\"\npublished = true\n+++");

        let store = FsArticleStore::open(dir.path()).unwrap();
        let article = store.article_by_slug("bare").unwrap().unwrap();
        assert_eq!(article.content, None);
    }

    #[test]
    fn missing_front_matter_is_an_error() {
        let dir = create_test_articles_dir();
        create_test_article(&dir, "plain.md", "# Just markdown\n\nno front matter");

        let store = FsArticleStore::open(dir.path()).unwrap();
        let result = store.published_articles();
        assert!(matches!(
            result,
            Err(StoreError::MissingFrontMatter { path }) if path.as_str() == "plain.md"
        ));
    }

    #[test]
    fn invalid_front_matter_reports_the_file() {
        let dir = create_test_articles_dir();
        create_test_article(&dir, "bad.md", "+++\ntitle = [not a string\n+++\nbody");

        let store = FsArticleStore::open(dir.path()).unwrap();
        let result = store.published_articles();
        assert!(matches!(
            result,
            Err(StoreError::FrontMatter { path, .. }) if path.as_str() == "bad.md"
        ));
    }

    #[test]
    fn non_markdown_files_are_ignored() {
        let dir = create_test_articles_dir();
        create_test_article(
            &dir,
            "real.md",
            "+++\ntitle = \"Real\"\npublished = true\n+++\nbody",
        );
        create_test_article(&dir, "image.png", "fake image data");
        create_test_article(&dir, "notes.txt", "scratch");

        let store = FsArticleStore::open(dir.path()).unwrap();
        assert_eq!(store.published_articles().unwrap().len(), 1);
    }

    #[test]
    fn split_front_matter_requires_opening_delimiter() {
        assert_eq!(split_front_matter("title = \"x\"\n+++\nbody"), None);
    }

    #[test]
    fn split_front_matter_requires_closing_delimiter() {
        assert_eq!(split_front_matter("+++\ntitle = \"x\"\nbody"), None);
    }

    #[test]
    fn split_front_matter_separates_matter_and_body() {
        let (matter, body) = split_front_matter("+++\ntitle = \"x\"\n+++\nline one\n").unwrap();
        assert_eq!(matter, "title = \"x\"");
        assert_eq!(body, "line one\n");
    }
}
