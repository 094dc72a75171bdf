pub mod driver;
pub mod logging;
pub mod sources;

pub use driver::{apply_effect, refresh, refresh_shared};
pub use logging::{init_logging, Logger};
pub use sources::{create_source, ArticleSource, FileSource, HttpSource};

pub mod prelude {
    pub use super::sources::ArticleSource;
    pub use ndv_core::{Error, FetchQuery, RawArticle, Result};
}
