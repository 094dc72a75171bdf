use serde::{Deserialize, Serialize};
use url::Url;

use crate::filter::is_all;
use crate::Result;

/// Parameters sent along with a collection fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchQuery {
    /// Exact category match, resolved by the backend.
    pub subject: Option<String>,
    /// Free-text search, resolved by the backend.
    pub keyword: Option<String>,
}

impl FetchQuery {
    pub fn unfiltered() -> Self {
        Self::default()
    }

    pub fn search(keyword: impl Into<String>) -> Self {
        Self {
            subject: None,
            keyword: Some(keyword.into()),
        }
    }

    /// Carries `category` as `subject` unless it is `ALL`.
    pub fn with_subject(mut self, category: &str) -> Self {
        self.subject = (!is_all(category)).then(|| category.trim().to_string());
        self
    }

    pub fn is_search(&self) -> bool {
        self.keyword.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    /// `base` with `subject` and `keyword` appended as query parameters.
    pub fn apply_to(&self, base: &str) -> Result<Url> {
        let mut url = Url::parse(base)?;
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(subject) = &self.subject {
                pairs.append_pair("subject", subject);
            }
            if let Some(keyword) = self.keyword.as_deref().filter(|k| !k.trim().is_empty()) {
                pairs.append_pair("keyword", keyword);
            }
        }
        if url.query() == Some("") {
            url.set_query(None);
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_to_adds_parameters() {
        let url = FetchQuery::search("coral reef")
            .with_subject("Ecology")
            .apply_to("http://localhost:5000/articles")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:5000/articles?subject=Ecology&keyword=coral+reef"
        );
    }

    #[test]
    fn test_unfiltered_has_no_query() {
        let url = FetchQuery::unfiltered()
            .with_subject("ALL")
            .apply_to("http://localhost:5000/articles")
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/articles");
    }

    #[test]
    fn test_invalid_base() {
        assert!(matches!(
            FetchQuery::unfiltered().apply_to("not a url"),
            Err(crate::Error::InvalidUrl(_))
        ));
    }
}
