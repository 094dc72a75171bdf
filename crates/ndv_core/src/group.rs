use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::date;
use crate::index::newest_first;
use crate::types::Article;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "date", rename_all = "lowercase")]
pub enum BucketKey {
    Date(String),
    Unknown,
}

impl BucketKey {
    fn for_article(article: &Article) -> Self {
        if article.has_known_date() {
            BucketKey::Date(article.normalized_date.clone())
        } else {
            BucketKey::Unknown
        }
    }

    fn sort_value(&self) -> &str {
        match self {
            BucketKey::Date(d) => d,
            BucketKey::Unknown => date::UNKNOWN_DATE,
        }
    }

    /// Header text, e.g. `2024/03/01`.
    pub fn label(&self) -> String {
        match self {
            BucketKey::Date(d) => date::format_for_display(d),
            BucketKey::Unknown => date::UNKNOWN_DATE_LABEL.to_string(),
        }
    }
}

/// Articles sharing one publication date.
#[derive(Debug, Clone, Serialize)]
pub struct DateBucket<'a> {
    pub key: BucketKey,
    pub articles: Vec<&'a Article>,
}

/// Bucket `articles` by normalized date.
///
/// Buckets come newest first with the unknown bucket last. Inside a bucket
/// articles are ordered by their most recent update, newest first, which may
/// differ from their order in `articles`.
pub fn group<'a>(articles: &[&'a Article]) -> Vec<DateBucket<'a>> {
    let mut positions: HashMap<BucketKey, usize> = HashMap::new();
    let mut buckets: Vec<DateBucket<'a>> = Vec::new();

    for &article in articles {
        let key = BucketKey::for_article(article);
        let slot = *positions.entry(key.clone()).or_insert_with(|| {
            buckets.push(DateBucket {
                key,
                articles: Vec::new(),
            });
            buckets.len() - 1
        });
        buckets[slot].articles.push(article);
    }

    buckets.sort_by(|a, b| newest_first(a.key.sort_value(), b.key.sort_value()));
    for bucket in &mut buckets {
        bucket
            .articles
            .sort_by_key(|a| std::cmp::Reverse(recency(a)));
    }
    buckets
}

/// `updatedAt`, then `updated`, then the publication date. `None` sorts
/// below every timestamp.
pub fn recency(article: &Article) -> Option<DateTime<Utc>> {
    [article.updated_at.as_deref(), article.updated.as_deref()]
        .into_iter()
        .flatten()
        .find_map(date::parse_timestamp)
        .or_else(|| date::parse_timestamp(&article.normalized_date))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RawArticle;

    fn article(title: &str, date: &str, updated_at: Option<&str>) -> Article {
        Article::from_raw(RawArticle {
            title: Some(title.to_string()),
            date: Some(date.to_string()),
            updated_at: updated_at.map(str::to_string),
            ..Default::default()
        })
    }

    fn revised(title: &str, date: &str, updated_at: &str, updated: &str) -> Article {
        Article::from_raw(RawArticle {
            title: Some(title.to_string()),
            date: Some(date.to_string()),
            updated_at: Some(updated_at.to_string()),
            updated: Some(updated.to_string()),
            ..Default::default()
        })
    }

    #[test]
    fn test_buckets_descending_with_unknown_last() {
        let articles = vec![
            article("u", "bad", None),
            article("a", "2023-05-01", None),
            article("b", "2024-01-01", None),
            article("c", "2023-05-01", None),
        ];
        let refs: Vec<&Article> = articles.iter().collect();
        let buckets = group(&refs);

        let keys: Vec<BucketKey> = buckets.iter().map(|b| b.key.clone()).collect();
        assert_eq!(
            keys,
            vec![
                BucketKey::Date("2024-01-01".to_string()),
                BucketKey::Date("2023-05-01".to_string()),
                BucketKey::Unknown,
            ]
        );
        assert_eq!(buckets[1].articles.len(), 2);
        assert_eq!(buckets[2].key.label(), date::UNKNOWN_DATE_LABEL);
    }

    #[test]
    fn test_bucket_reordered_by_update_time() {
        let articles = vec![
            article("stale", "2024-03-01", Some("2024-03-02T08:00:00Z")),
            article("fresh", "2024-03-01", Some("2024-03-05T08:00:00Z")),
            article("never-updated", "2024-03-01", None),
        ];
        let refs: Vec<&Article> = articles.iter().collect();
        let buckets = group(&refs);

        assert_eq!(buckets.len(), 1);
        let titles: Vec<&str> = buckets[0].articles.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["fresh", "stale", "never-updated"]);
    }

    #[test]
    fn test_recency_falls_back_to_publication_date() {
        let a = article("a", "2024-03-01", Some("garbage"));
        assert_eq!(recency(&a), date::parse_timestamp("2024-03-01"));
    }

    #[test]
    fn test_unparseable_updated_at_falls_back_to_updated() {
        let articles = vec![
            article("b", "2024-03-01", Some("2024-03-05T00:00:00Z")),
            revised("a", "2024-03-01", "garbage", "2024-03-09T00:00:00Z"),
        ];
        let refs: Vec<&Article> = articles.iter().collect();
        let buckets = group(&refs);

        let titles: Vec<&str> = buckets[0].articles.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b"]);
        assert_eq!(recency(&articles[1]), date::parse_timestamp("2024-03-09T00:00:00Z"));
    }
}
