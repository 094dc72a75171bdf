use std::path::{Path, PathBuf};

use async_trait::async_trait;
use ndv_core::filter::{keyword_matches, FacetField, FacetFilter};
use ndv_core::{Article, FetchQuery, RawArticle, Result};

use super::ArticleSource;

/// A JSON export of the collection on disk.
///
/// Queries are answered the way the backend answers them, so a local export
/// behaves like the live endpoint.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ArticleSource for FileSource {
    fn name(&self) -> &str {
        "file"
    }

    async fn fetch(&self, query: &FetchQuery) -> Result<Vec<RawArticle>> {
        let json = tokio::fs::read_to_string(&self.path).await?;
        let articles: Option<Vec<RawArticle>> = serde_json::from_str(&json)?;
        Ok(answer_query(articles.unwrap_or_default(), query))
    }
}

fn answer_query(articles: Vec<RawArticle>, query: &FetchQuery) -> Vec<RawArticle> {
    let subject = query
        .subject
        .as_deref()
        .map(|s| FacetFilter::new(FacetField::Category, s));
    let keyword = query.keyword.as_deref().filter(|_| query.is_search());
    if subject.is_none() && keyword.is_none() {
        return articles;
    }

    articles
        .into_iter()
        .filter(|raw| {
            let article = Article::from_raw(raw.clone());
            subject.as_ref().map_or(true, |f| f.matches(&article))
                && keyword.map_or(true, |k| keyword_matches(&article, k))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const EXPORT: &str = r#"[
        {"title": "Coral bleaching records", "Subject": "Ecology", "date": "2024-02-01"},
        {"title": "Cortical recordings", "Subject": "Neuroscience", "tags": ["electrophysiology"]},
        {"title": "Reef fish counts", "Subject": "Ecology", "abstract": "Coral reef survey"}
    ]"#;

    fn export(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_reads_whole_collection() {
        let file = export(EXPORT);
        let source = FileSource::new(file.path());
        let articles = source.fetch(&FetchQuery::unfiltered()).await.unwrap();
        assert_eq!(articles.len(), 3);
    }

    #[tokio::test]
    async fn test_answers_keyword_and_subject() {
        let file = export(EXPORT);
        let source = FileSource::new(file.path());

        let found = source.fetch(&FetchQuery::search("coral")).await.unwrap();
        assert_eq!(found.len(), 2);

        let found = source.fetch(&FetchQuery::search("ELECTRO")).await.unwrap();
        assert_eq!(found[0].title.as_deref(), Some("Cortical recordings"));

        let query = FetchQuery::unfiltered().with_subject("Neuroscience");
        assert_eq!(source.fetch(&query).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_null_export_is_empty() {
        let file = export("null");
        let source = FileSource::new(file.path());
        assert!(source.fetch(&FetchQuery::unfiltered()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_and_malformed_files_fail() {
        let source = FileSource::new("/definitely/not/here.json");
        assert!(matches!(
            source.fetch(&FetchQuery::unfiltered()).await,
            Err(ndv_core::Error::Io(_))
        ));

        let file = export("{ not json");
        let source = FileSource::new(file.path());
        assert!(matches!(
            source.fetch(&FetchQuery::unfiltered()).await,
            Err(ndv_core::Error::Serialization(_))
        ));
    }
}
