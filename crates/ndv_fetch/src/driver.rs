//! Runs fetches against a source and feeds the results to a controller.

use std::sync::Arc;

use ndv_core::{Effect, FetchQuery, ViewController};
use tokio::sync::Mutex;

use crate::logging::Logger;
use crate::sources::ArticleSource;

/// Fetch with `query` and hand the result to `controller`.
///
/// Returns whether the result was applied.
pub async fn refresh(
    controller: &mut ViewController,
    source: &dyn ArticleSource,
    query: FetchQuery,
) -> bool {
    let logger = Logger::new().with_prefix(format!("[{}]", source.name()));
    let ticket = controller.begin_fetch(query);
    logger.debug(&format!("fetch #{} started", ticket.generation));

    let result = source.fetch(&ticket.query).await;
    if let Err(e) = &result {
        logger.error(&format!("fetch #{} failed: {}", ticket.generation, e));
    }
    controller.complete_fetch(ticket, result)
}

/// Like [`refresh`], for a controller shared between tasks.
///
/// The lock is released while the source is being awaited, so a newer fetch
/// can start in the meantime; the older result is then dropped.
pub async fn refresh_shared(
    controller: &Arc<Mutex<ViewController>>,
    source: Arc<dyn ArticleSource>,
    query: FetchQuery,
) -> bool {
    let logger = Logger::new().with_prefix(format!("[{}]", source.name()));
    let ticket = controller.lock().await.begin_fetch(query);
    let generation = ticket.generation;

    let result = source.fetch(&ticket.query).await;
    let applied = controller.lock().await.complete_fetch(ticket, result);
    if !applied {
        logger.debug(&format!("fetch #{} superseded", generation));
    }
    applied
}

/// Carry out what a state transition asked for. Returns whether the view
/// needs to be drawn again.
pub async fn apply_effect(
    controller: &mut ViewController,
    source: &dyn ArticleSource,
    effect: Effect,
) -> bool {
    match effect {
        Effect::Recompute => true,
        Effect::Refetch(query) => refresh(controller, source, query).await,
        Effect::Ignore => false,
    }
}
