use serde::{Deserialize, Serialize};

use crate::types::{Article, Tags};

/// Facet value meaning "no facet filter".
pub const ALL: &str = "ALL";

/// Which article field a facet filter reads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacetField {
    #[default]
    Category,
    Tag,
}

impl std::str::FromStr for FacetField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "category" | "subject" => Ok(Self::Category),
            "tag" | "tags" => Ok(Self::Tag),
            other => Err(format!("Unknown facet field: {}", other)),
        }
    }
}

pub fn is_all(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value == ALL
}

/// A single predicate over one facet field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetFilter {
    pub field: FacetField,
    pub value: String,
}

impl FacetFilter {
    pub fn new(field: FacetField, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }

    pub fn matches(&self, article: &Article) -> bool {
        if is_all(&self.value) {
            return true;
        }
        let wanted = self.value.trim();
        match self.field {
            FacetField::Category => article.trimmed_category() == Some(wanted),
            FacetField::Tag => article.tags.as_ref().is_some_and(|tags| tags.contains(wanted)),
        }
    }

    pub fn apply<'a>(&self, articles: &'a [Article]) -> Vec<&'a Article> {
        articles.iter().filter(|a| self.matches(a)).collect()
    }
}

/// Articles whose category equals `category` after trimming. `ALL` or an
/// empty value keeps everything in order.
pub fn by_category<'a>(articles: &'a [Article], category: &str) -> Vec<&'a Article> {
    FacetFilter::new(FacetField::Category, category).apply(articles)
}

/// Articles carrying `tag` among their tags.
pub fn by_tag<'a>(articles: &'a [Article], tag: &str) -> Vec<&'a Article> {
    FacetFilter::new(FacetField::Tag, tag).apply(articles)
}

/// Articles matching a free-text keyword, as a search backend answers a
/// `keyword` query. The view controller never calls this on results that
/// were already searched.
pub fn by_keyword<'a>(articles: &'a [Article], keyword: &str) -> Vec<&'a Article> {
    articles.iter().filter(|a| keyword_matches(a, keyword)).collect()
}

/// Case-insensitive substring match over titles, summaries and tags.
pub fn keyword_matches(article: &Article, keyword: &str) -> bool {
    let needle = keyword.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    let in_text = [
        Some(article.title.as_str()),
        article.translated_title.as_deref(),
        article.abstract_text.as_deref(),
        article.interpretation.as_deref(),
    ]
    .into_iter()
    .flatten()
    .any(|text| text.to_lowercase().contains(&needle));

    in_text
        || match &article.tags {
            Some(Tags::Joined(joined)) => joined.to_lowercase().contains(&needle),
            Some(Tags::List(items)) => items.iter().any(|t| t.to_lowercase().contains(&needle)),
            None => false,
        }
}
