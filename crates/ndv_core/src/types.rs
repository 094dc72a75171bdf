use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A record exactly as the backend serves it.
///
/// Every field is optional and tolerates loose shapes (numbers where strings
/// are expected, a lone string where a list is expected) so that one odd
/// record never fails the whole collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawArticle {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(rename = "titleCn", default, deserialize_with = "lenient_string")]
    pub title_cn: Option<String>,
    #[serde(default, deserialize_with = "lenient_authors")]
    pub authors: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub date: Option<String>,
    #[serde(rename = "publishDate", default, deserialize_with = "lenient_string")]
    pub publish_date: Option<String>,
    #[serde(rename = "updatedAt", default, deserialize_with = "lenient_string")]
    pub updated_at: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub updated: Option<String>,
    #[serde(rename = "Subject", default, deserialize_with = "lenient_string")]
    pub subject_label: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub subject: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub journal: Option<String>,
    #[serde(default, deserialize_with = "lenient_tags")]
    pub tags: Option<Tags>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub doi: Option<String>,
    #[serde(rename = "interpretationCn", default, deserialize_with = "lenient_string")]
    pub interpretation_cn: Option<String>,
    #[serde(rename = "abstract", default, deserialize_with = "lenient_string")]
    pub abstract_text: Option<String>,
    #[serde(default, deserialize_with = "lenient_links")]
    pub dataset_links: Vec<String>,
}

/// Tags arrive either as one comma separated string or as a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Tags {
    Joined(String),
    List(Vec<String>),
}

impl Tags {
    /// Trimmed, non-empty tag labels in their stored order.
    pub fn chips(&self) -> Vec<String> {
        let raw: Vec<&str> = match self {
            Tags::Joined(s) => s.split(',').collect(),
            Tags::List(items) => items.iter().map(String::as_str).collect(),
        };
        raw.into_iter()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn contains(&self, tag: &str) -> bool {
        let wanted = tag.trim();
        self.chips().iter().any(|t| t == wanted)
    }
}

/// An article after field fallbacks have been resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub translated_title: Option<String>,
    pub authors: Option<String>,
    pub published_at_raw: String,
    pub updated_at: Option<String>,
    pub updated: Option<String>,
    pub category: Option<String>,
    pub journal: Option<String>,
    pub tags: Option<Tags>,
    pub source_url: String,
    pub doi: Option<String>,
    pub summary: Option<String>,
    pub abstract_text: Option<String>,
    pub interpretation: Option<String>,
    pub dataset_links: Vec<String>,
    /// `YYYY-MM-DD`, or empty when the publication date is unknown.
    pub normalized_date: String,
}

impl Article {
    pub fn from_raw(raw: RawArticle) -> Self {
        let published_at_raw = first_present([raw.date, raw.publish_date]).unwrap_or_default();
        let normalized_date = crate::date::normalize(&published_at_raw);
        let summary = first_present([raw.interpretation_cn.clone(), raw.abstract_text.clone()]);

        Self {
            title: raw.title.unwrap_or_default(),
            translated_title: present(raw.title_cn),
            authors: present(raw.authors),
            published_at_raw,
            updated_at: present(raw.updated_at),
            updated: present(raw.updated),
            category: first_present([raw.subject_label, raw.subject, raw.category]),
            journal: present(raw.journal),
            tags: raw.tags,
            source_url: raw.url.unwrap_or_default(),
            doi: present(raw.doi),
            summary,
            abstract_text: present(raw.abstract_text),
            interpretation: present(raw.interpretation_cn),
            dataset_links: raw.dataset_links,
            normalized_date,
        }
    }

    pub fn tag_chips(&self) -> Vec<String> {
        self.tags.as_ref().map(Tags::chips).unwrap_or_default()
    }

    pub fn trimmed_category(&self) -> Option<&str> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }

    pub fn has_known_date(&self) -> bool {
        !self.normalized_date.is_empty()
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn first_present<const N: usize>(candidates: [Option<String>; N]) -> Option<String> {
    candidates.into_iter().find_map(present)
}

fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_to_string(Option::<Value>::deserialize(deserializer)?))
}

fn lenient_authors<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => {
            let names: Vec<String> = items
                .into_iter()
                .filter_map(|v| scalar_to_string(Some(v)))
                .collect();
            if names.is_empty() {
                None
            } else {
                Some(names.join(", "))
            }
        }
        other => scalar_to_string(other),
    })
}

fn lenient_tags<'de, D>(deserializer: D) -> std::result::Result<Option<Tags>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(Tags::Joined(s)),
        Some(Value::Array(items)) => Some(Tags::List(
            items.into_iter().filter_map(|v| scalar_to_string(Some(v))).collect(),
        )),
        _ => None,
    })
}

fn lenient_links<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|v| scalar_to_string(Some(v)))
            .filter(|link| !link.trim().is_empty())
            .collect(),
        Some(Value::String(s)) if !s.trim().is_empty() => vec![s],
        _ => Vec::new(),
    })
}

fn scalar_to_string(value: Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    }
}
