pub mod config;
pub mod date;
pub mod display;
pub mod error;
pub mod filter;
pub mod group;
pub mod index;
pub mod paginate;
pub mod query;
pub mod types;
pub mod view;

pub use config::ViewConfig;
pub use display::{ArticleCard, ArticleDetail};
pub use error::{Error, Result};
pub use filter::{FacetField, FacetFilter, ALL};
pub use group::{BucketKey, DateBucket};
pub use index::ArticleIndex;
pub use paginate::{PageIndexEntry, PaginationPolicy};
pub use query::FetchQuery;
pub use types::{Article, RawArticle, Tags};
pub use view::{
    DerivedView, Effect, EmptyState, Event, FetchTicket, StatusLevel, ViewController, ViewState,
};

pub mod prelude {
    pub use crate::{Article, Error, FetchQuery, RawArticle, Result, ViewConfig, ViewController};
}
