//! Display projections handed to whatever draws the cards and the detail
//! view. Every fallback is resolved here so the drawing side only lays out
//! strings.

use serde::Serialize;

use crate::date;
use crate::types::Article;

pub const NO_SUMMARY: &str = "No summary available";
pub const UNKNOWN_AUTHOR: &str = "Unknown author";
pub const NO_DATASET_LINKS: &str = "No dataset links";
pub const MISSING_LINK: &str = "#";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleCard {
    pub title: String,
    pub translated_title: String,
    pub date: String,
    pub category_badge: String,
    pub journal_badge: String,
    pub doi_badge: String,
    pub tags: Vec<String>,
    pub summary: String,
    pub link: String,
}

impl ArticleCard {
    pub fn from_article(article: &Article) -> Self {
        Self {
            title: article.title.clone(),
            translated_title: article
                .translated_title
                .clone()
                .unwrap_or_else(|| article.title.clone()),
            date: date::format_for_display(&article.normalized_date),
            category_badge: article.trimmed_category().unwrap_or_default().to_string(),
            journal_badge: article.journal.clone().unwrap_or_default(),
            doi_badge: article.doi.clone().unwrap_or_default(),
            tags: article.tag_chips(),
            summary: article.summary.clone().unwrap_or_else(|| NO_SUMMARY.to_string()),
            link: article.source_url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleDetail {
    pub title: String,
    pub authors: String,
    pub published: String,
    pub summary: String,
    pub doi: Option<String>,
    pub dataset_links: Vec<String>,
    /// Shown in place of the dataset list when it is empty.
    pub dataset_placeholder: Option<String>,
    pub link: String,
    pub article: Article,
}

impl ArticleDetail {
    pub fn from_article(article: &Article) -> Self {
        let published = if article.published_at_raw.trim().is_empty() {
            date::UNKNOWN_DATE_LABEL.to_string()
        } else {
            article.published_at_raw.clone()
        };

        Self {
            title: article
                .translated_title
                .clone()
                .unwrap_or_else(|| article.title.clone()),
            authors: article.authors.clone().unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
            published,
            summary: article.summary.clone().unwrap_or_else(|| NO_SUMMARY.to_string()),
            doi: article.doi.clone(),
            dataset_links: article.dataset_links.clone(),
            dataset_placeholder: article
                .dataset_links
                .is_empty()
                .then(|| NO_DATASET_LINKS.to_string()),
            link: if article.source_url.trim().is_empty() {
                MISSING_LINK.to_string()
            } else {
                article.source_url.clone()
            },
            article: article.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RawArticle, Tags};

    #[test]
    fn test_card_fallbacks() {
        let article = Article::from_raw(RawArticle {
            title: Some("Soil microbiome survey".to_string()),
            date: Some("2024/3/1".to_string()),
            tags: Some(Tags::Joined("soil, microbes".to_string())),
            url: Some("https://example.org/a".to_string()),
            ..Default::default()
        });
        let card = ArticleCard::from_article(&article);

        assert_eq!(card.translated_title, "Soil microbiome survey");
        assert_eq!(card.date, "2024/03/01");
        assert_eq!(card.category_badge, "");
        assert_eq!(card.journal_badge, "");
        assert_eq!(card.tags, vec!["soil", "microbes"]);
        assert_eq!(card.summary, NO_SUMMARY);
        assert_eq!(card.link, "https://example.org/a");
    }

    #[test]
    fn test_detail_fallbacks() {
        let article = Article::from_raw(RawArticle {
            title: Some("Reef census".to_string()),
            title_cn: Some("珊瑚礁普查".to_string()),
            abstract_text: Some("Counts.".to_string()),
            ..Default::default()
        });
        let detail = ArticleDetail::from_article(&article);

        assert_eq!(detail.title, "珊瑚礁普查");
        assert_eq!(detail.authors, UNKNOWN_AUTHOR);
        assert_eq!(detail.published, date::UNKNOWN_DATE_LABEL);
        assert_eq!(detail.summary, "Counts.");
        assert_eq!(detail.dataset_placeholder.as_deref(), Some(NO_DATASET_LINKS));
        assert_eq!(detail.link, MISSING_LINK);
    }
}
