use ndv_core::view::StatusMessage;
use ndv_core::{ArticleDetail, DerivedView, PageIndexEntry, StatusLevel, ViewState};

pub fn render_view(state: &ViewState, view: &DerivedView<'_>) -> String {
    let keyword = if state.active_keyword.is_empty() {
        "-"
    } else {
        state.active_keyword.as_str()
    };
    let mut out = format!(
        "category: {} | keyword: {} | page {}/{} | {} articles\n",
        state.active_category,
        keyword,
        view.page,
        view.total_pages.max(1),
        view.filtered.len()
    );

    if let Some(empty) = &view.empty_state {
        out.push_str(&format!("\n{}\n", empty.message()));
        return out;
    }

    for section in &view.sections {
        out.push_str(&format!("\n== {} ==\n", section.header));
        for card in &section.cards {
            out.push_str(&format!("* {}\n", card.title));
            if card.translated_title != card.title {
                out.push_str(&format!("  【{}】\n", card.translated_title));
            }
            let badges: Vec<&str> = [&card.journal_badge, &card.doi_badge, &card.category_badge]
                .into_iter()
                .map(String::as_str)
                .filter(|b| !b.is_empty())
                .collect();
            if !badges.is_empty() {
                out.push_str(&format!("  {}\n", badges.join(" | ")));
            }
            out.push_str(&format!("  {}\n", card.summary));
            if !card.tags.is_empty() {
                out.push_str(&format!("  #{}\n", card.tags.join(" #")));
            }
            if !card.link.is_empty() {
                out.push_str(&format!("  {}\n", card.link));
            }
        }
    }

    if !view.page_index.is_empty() {
        out.push_str(&format!("\n{}\n", render_page_index(&view.page_index)));
    }
    out
}

pub fn render_page_index(entries: &[PageIndexEntry]) -> String {
    entries
        .iter()
        .map(|e| {
            if e.is_active {
                format!("[{}]", e.label)
            } else {
                e.label.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn render_detail(detail: &ArticleDetail) -> String {
    let mut out = format!(
        "{}\nAuthors: {}\nPublished: {}\n",
        detail.title, detail.authors, detail.published
    );
    if let Some(doi) = &detail.doi {
        out.push_str(&format!("DOI: {}\n", doi));
    }
    out.push_str(&format!("\n{}\n\nDatasets:\n", detail.summary));
    match &detail.dataset_placeholder {
        Some(placeholder) => out.push_str(&format!("  {}\n", placeholder)),
        None => {
            for link in &detail.dataset_links {
                out.push_str(&format!("  - {}\n", link));
            }
        }
    }
    out.push_str(&format!("\n{}\n", detail.link));
    out
}

pub fn render_status(status: &StatusMessage) -> String {
    let level = match status.level {
        StatusLevel::Info => "info",
        StatusLevel::Danger => "error",
    };
    format!("[{}] {}", level, status.text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndv_core::paginate::build_page_index;
    use ndv_core::{Article, PaginationPolicy, RawArticle};

    #[test]
    fn test_render_page_index() {
        let entries = build_page_index(200, 10, 10, PaginationPolicy::default());
        assert_eq!(render_page_index(&entries), "1 ... 8 9 [10] 11 12 ... 20");
    }

    #[test]
    fn test_render_detail_lines() {
        let article = Article::from_raw(RawArticle {
            title: Some("Reef survey".to_string()),
            doi: Some("10.1000/reef".to_string()),
            ..Default::default()
        });
        let text = render_detail(&ArticleDetail::from_article(&article));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Reef survey");
        assert_eq!(lines[2], "Published: Unknown date");
        assert_eq!(lines[3], "DOI: 10.1000/reef");
        assert!(lines.contains(&"Datasets:"));
        assert!(lines.contains(&"  No dataset links"));
        assert_eq!(lines.last(), Some(&"#"));
    }
}
