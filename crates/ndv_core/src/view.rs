//! View state, its transitions and the controller that derives what to draw.

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::ViewConfig;
use crate::display::{ArticleCard, ArticleDetail};
use crate::filter::{is_all, FacetField, FacetFilter, ALL};
use crate::group::{group, DateBucket};
use crate::index::ArticleIndex;
use crate::paginate::{build_page_index, paginate, total_pages, PageIndexEntry};
use crate::query::FetchQuery;
use crate::types::{Article, RawArticle};
use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewState {
    pub active_category: String,
    pub active_keyword: String,
    pub active_page: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            active_category: ALL.to_string(),
            active_keyword: String::new(),
            active_page: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    FetchCompleted,
    CategorySelected(String),
    KeywordSubmitted(String),
    SearchCleared,
    PageSelected(usize),
}

impl Event {
    /// The click on a page index entry. Ellipses are not clickable.
    pub fn from_entry(entry: &PageIndexEntry) -> Option<Self> {
        entry.target_page.map(Event::PageSelected)
    }
}

/// What the caller has to do after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Recompute,
    Refetch(FetchQuery),
    Ignore,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: ViewState,
    pub effect: Effect,
}

impl Transition {
    fn ignore(state: &ViewState) -> Self {
        Self {
            state: state.clone(),
            effect: Effect::Ignore,
        }
    }
}

impl ViewState {
    pub fn is_searching(&self) -> bool {
        !self.active_keyword.is_empty()
    }

    /// Next state for `event`. `total_pages` bounds page selection.
    pub fn apply(&self, event: &Event, total_pages: usize) -> Transition {
        match event {
            Event::FetchCompleted => Transition {
                state: ViewState {
                    active_page: 1,
                    ..self.clone()
                },
                effect: Effect::Recompute,
            },
            Event::CategorySelected(category) => {
                let category = if is_all(category) {
                    ALL.to_string()
                } else {
                    category.trim().to_string()
                };
                if category == self.active_category && !self.is_searching() {
                    return Transition::ignore(self);
                }
                // Search results came from the backend, so leaving a search
                // needs the full collection back before filtering locally.
                let effect = if self.is_searching() {
                    Effect::Refetch(FetchQuery::unfiltered())
                } else {
                    Effect::Recompute
                };
                Transition {
                    state: ViewState {
                        active_category: category,
                        active_keyword: String::new(),
                        active_page: 1,
                    },
                    effect,
                }
            }
            Event::KeywordSubmitted(keyword) => {
                let keyword = keyword.trim();
                if keyword.is_empty() {
                    return Transition::ignore(self);
                }
                Transition {
                    state: ViewState {
                        active_category: ALL.to_string(),
                        active_keyword: keyword.to_string(),
                        active_page: 1,
                    },
                    effect: Effect::Refetch(FetchQuery::search(keyword)),
                }
            }
            Event::SearchCleared => {
                if !self.is_searching() {
                    return Transition::ignore(self);
                }
                Transition {
                    state: ViewState {
                        active_keyword: String::new(),
                        ..self.clone()
                    },
                    effect: Effect::Refetch(
                        FetchQuery::unfiltered().with_subject(&self.active_category),
                    ),
                }
            }
            Event::PageSelected(page) => {
                if *page == 0 || *page > total_pages {
                    return Transition::ignore(self);
                }
                Transition {
                    state: ViewState {
                        active_page: *page,
                        ..self.clone()
                    },
                    effect: Effect::Recompute,
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusLevel {
    Info,
    Danger,
}

/// A message that hides itself after a fixed time.
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
    shown_at: Instant,
    ttl: Duration,
}

impl StatusMessage {
    pub fn new(text: impl Into<String>, level: StatusLevel, ttl: Duration) -> Self {
        Self {
            text: text.into(),
            level,
            shown_at: Instant::now(),
            ttl,
        }
    }

    pub fn is_visible_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) < self.ttl
    }
}

/// Why a derived page has nothing to show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum EmptyState {
    NoArticles,
    NoResultsInCategory(String),
    NoResultsForKeyword(String),
}

impl EmptyState {
    pub fn message(&self) -> String {
        match self {
            EmptyState::NoArticles => "No articles available".to_string(),
            EmptyState::NoResultsInCategory(category) => format!(
                "No articles found in \"{}\". Try another category or \"{}\".",
                category, ALL
            ),
            EmptyState::NoResultsForKeyword(keyword) => format!("No results for \"{}\"", keyword),
        }
    }
}

/// A date header and the cards below it.
#[derive(Debug, Clone, Serialize)]
pub struct CardSection {
    pub header: String,
    pub cards: Vec<ArticleCard>,
}

/// Everything needed to draw one state of the view.
#[derive(Debug, Clone, Serialize)]
pub struct DerivedView<'a> {
    pub filtered: Vec<&'a Article>,
    pub page: usize,
    pub total_pages: usize,
    pub groups: Vec<DateBucket<'a>>,
    pub sections: Vec<CardSection>,
    pub page_index: Vec<PageIndexEntry>,
    pub empty_state: Option<EmptyState>,
}

/// Identifies one fetch. Only the newest ticket may complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub query: FetchQuery,
    /// State matching the collection on screen when the fetch began.
    rollback: ViewState,
}

pub struct ViewController {
    config: ViewConfig,
    state: ViewState,
    /// Last state that agrees with `index`.
    settled: ViewState,
    index: ArticleIndex,
    facets: BTreeSet<String>,
    generation: u64,
    loading: bool,
    status: Option<StatusMessage>,
}

impl ViewController {
    pub fn new(config: ViewConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            state: ViewState::default(),
            settled: ViewState::default(),
            index: ArticleIndex::default(),
            facets: BTreeSet::new(),
            generation: 0,
            loading: false,
            status: None,
        })
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn index(&self) -> &ArticleIndex {
        &self.index
    }

    /// Facet values for the configured field, in display order.
    pub fn facets(&self) -> &BTreeSet<String> {
        &self.facets
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn status_at(&self, now: Instant) -> Option<&StatusMessage> {
        self.status.as_ref().filter(|s| s.is_visible_at(now))
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status_at(Instant::now())
    }

    /// Query for the first load of a session.
    pub fn initial_query(&self) -> FetchQuery {
        FetchQuery::unfiltered().with_subject(&self.state.active_category)
    }

    /// Apply a UI event and report what the caller must do next.
    pub fn dispatch(&mut self, event: Event) -> Effect {
        let total = self.total_pages();
        let Transition { state, effect } = self.state.apply(&event, total);
        if effect == Effect::Ignore {
            return effect;
        }
        debug!(?event, ?state, "view state changed");
        if effect == Effect::Recompute && !self.loading {
            self.settled = state.clone();
        }
        self.state = state;
        effect
    }

    pub fn select_category(&mut self, category: impl Into<String>) -> Effect {
        self.dispatch(Event::CategorySelected(category.into()))
    }

    pub fn submit_keyword(&mut self, keyword: impl Into<String>) -> Effect {
        self.dispatch(Event::KeywordSubmitted(keyword.into()))
    }

    pub fn clear_search(&mut self) -> Effect {
        self.dispatch(Event::SearchCleared)
    }

    pub fn select_page(&mut self, page: usize) -> Effect {
        self.dispatch(Event::PageSelected(page))
    }

    /// Start a fetch. Any fetch begun earlier becomes stale.
    pub fn begin_fetch(&mut self, query: FetchQuery) -> FetchTicket {
        self.generation += 1;
        self.loading = true;
        debug!(generation = self.generation, ?query, "fetch started");
        FetchTicket {
            generation: self.generation,
            query,
            rollback: self.settled.clone(),
        }
    }

    /// Finish the fetch identified by `ticket`.
    ///
    /// Returns `false`, changing nothing, when a newer fetch has started since.
    /// A failed fetch keeps the current collection, restores the state that
    /// matched it and shows a status message.
    pub fn complete_fetch(&mut self, ticket: FetchTicket, result: Result<Vec<RawArticle>>) -> bool {
        if ticket.generation != self.generation {
            debug!(
                stale = ticket.generation,
                current = self.generation,
                "dropping stale fetch result"
            );
            return false;
        }
        self.loading = false;

        match result {
            Ok(raw) => {
                self.index = ArticleIndex::build(raw);
                self.facets = match self.config.facet {
                    FacetField::Category => self.index.unique_categories(),
                    FacetField::Tag => self.index.unique_tags(),
                };
                self.dispatch(Event::FetchCompleted);
                info!(
                    articles = self.index.len(),
                    facets = self.facets.len(),
                    "collection loaded"
                );

                let keyword = ticket.query.keyword.as_deref();
                if let Some(keyword) = keyword.filter(|_| ticket.query.is_search()) {
                    self.set_status(
                        format!("Found {} results for \"{}\"", self.index.len(), keyword),
                        StatusLevel::Info,
                    );
                }
            }
            Err(e) => {
                warn!("fetch failed: {}", e);
                self.state = ticket.rollback;
                self.set_status(format!("Failed to load articles: {}", e), StatusLevel::Danger);
            }
        }
        true
    }

    fn set_status(&mut self, text: String, level: StatusLevel) {
        self.status = Some(StatusMessage::new(text, level, self.config.status_ttl()));
    }

    fn filtered(&self) -> Vec<&Article> {
        let articles = self.index.articles();
        if self.state.is_searching() {
            // The backend already applied the keyword; category filtering is
            // off while a search is active.
            return articles.iter().collect();
        }
        FacetFilter::new(self.config.facet, self.state.active_category.clone()).apply(articles)
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.filtered().len(), self.config.page_size)
    }

    /// Filter, paginate and group the collection for the current state.
    pub fn derive(&self) -> DerivedView<'_> {
        let filtered = self.filtered();
        let page = self.state.active_page;
        let page_size = self.config.page_size;

        let page_items = paginate(&filtered, page, page_size);
        let groups = group(page_items);
        let sections = groups
            .iter()
            .map(|bucket| CardSection {
                header: bucket.key.label(),
                cards: bucket.articles.iter().map(|a| ArticleCard::from_article(a)).collect(),
            })
            .collect();

        let empty_state = page_items.is_empty().then(|| {
            if self.state.is_searching() {
                EmptyState::NoResultsForKeyword(self.state.active_keyword.clone())
            } else if !is_all(&self.state.active_category) {
                EmptyState::NoResultsInCategory(self.state.active_category.clone())
            } else {
                EmptyState::NoArticles
            }
        });

        let page_index = build_page_index(filtered.len(), page_size, page, self.config.pagination);
        debug!(
            filtered = filtered.len(),
            page,
            buckets = groups.len(),
            "view derived"
        );

        DerivedView {
            total_pages: total_pages(filtered.len(), page_size),
            filtered,
            page,
            groups,
            sections,
            page_index,
            empty_state,
        }
    }

    /// Detail view for the article at position `n` of the filtered sequence.
    pub fn detail(&self, n: usize) -> Result<ArticleDetail> {
        self.filtered()
            .get(n)
            .map(|article| ArticleDetail::from_article(article))
            .ok_or_else(|| Error::NotFound(format!("No article at index {}", n)))
    }
}
