use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::types::{Article, RawArticle};

/// The fetched collection, resolved and ordered newest first.
#[derive(Debug, Clone, Default)]
pub struct ArticleIndex {
    articles: Vec<Article>,
}

impl ArticleIndex {
    /// Resolve every raw record and sort by normalized date, newest first.
    ///
    /// The sort is stable: records with equal dates, and all records with an
    /// unknown date, keep their input order. Unknown dates go last.
    pub fn build(raw: Vec<RawArticle>) -> Self {
        let mut articles: Vec<Article> = raw.into_iter().map(Article::from_raw).collect();
        articles.sort_by(|a, b| newest_first(&a.normalized_date, &b.normalized_date));
        Self { articles }
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// Distinct trimmed categories, skipping empty ones, in lexicographic order.
    pub fn unique_categories(&self) -> BTreeSet<String> {
        self.articles
            .iter()
            .filter_map(Article::trimmed_category)
            .map(str::to_string)
            .collect()
    }

    /// Distinct trimmed tags across the collection.
    pub fn unique_tags(&self) -> BTreeSet<String> {
        self.articles.iter().flat_map(Article::tag_chips).collect()
    }
}

/// Descending order over normalized dates with the unknown sentinel last.
pub(crate) fn newest_first(a: &str, b: &str) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.cmp(a),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(title: &str, date: &str, subject: Option<&str>) -> RawArticle {
        RawArticle {
            title: Some(title.to_string()),
            date: Some(date.to_string()),
            subject_label: subject.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_build_sorts_newest_first_and_unknown_last() {
        let index = ArticleIndex::build(vec![
            raw("old", "2023-01-01", None),
            raw("unknown-a", "bad", None),
            raw("new", "2024-06-01", None),
            raw("unknown-b", "", None),
        ]);
        let titles: Vec<&str> = index.articles().iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["new", "old", "unknown-a", "unknown-b"]);
    }

    #[test]
    fn test_build_is_stable_for_equal_dates() {
        let index = ArticleIndex::build(vec![
            raw("first", "2024-03-01", None),
            raw("second", "2024/3/1", None),
            raw("third", "1/3/2024", None),
        ]);
        let titles: Vec<&str> = index.articles().iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_unique_categories() {
        let index = ArticleIndex::build(vec![
            raw("a", "2024-01-01", Some(" Neuroscience")),
            raw("b", "2024-01-02", Some("Ecology")),
            raw("c", "2024-01-03", Some("Neuroscience ")),
            raw("d", "2024-01-04", Some("   ")),
            raw("e", "2024-01-05", None),
        ]);
        let categories: Vec<String> = index.unique_categories().into_iter().collect();
        assert_eq!(categories, vec!["Ecology", "Neuroscience"]);
    }
}
