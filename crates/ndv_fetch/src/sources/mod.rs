use async_trait::async_trait;
use ndv_core::{FetchQuery, RawArticle, Result};

pub mod file;
pub mod http;

pub use file::FileSource;
pub use http::HttpSource;

/// Provides the article collection, optionally narrowed by a query.
#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Short label used in log lines.
    fn name(&self) -> &str;

    /// Fetch the collection. `keyword` and `subject` are resolved by the
    /// source, not by the caller.
    async fn fetch(&self, query: &FetchQuery) -> Result<Vec<RawArticle>>;
}

/// Pick a source from a location: `http(s)://` URLs are fetched over HTTP,
/// anything else is read as a JSON file.
pub fn create_source(location: &str) -> Result<Box<dyn ArticleSource>> {
    let location = location.trim();
    if location.starts_with("http://") || location.starts_with("https://") {
        Ok(Box::new(HttpSource::new(location)?))
    } else {
        Ok(Box::new(FileSource::new(location)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_source() {
        assert_eq!(create_source("http://localhost:5000/articles").unwrap().name(), "http");
        assert_eq!(create_source("articles.json").unwrap().name(), "file");
        assert!(create_source("https://").is_err());
    }
}
