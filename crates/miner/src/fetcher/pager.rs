use std::future::Future;

use anyhow::Result;
use futures::stream::{self, Stream, TryStreamExt};
use serde_json::Value;
use tracing::debug;

/// Flattens numbered pages into one lazy stream of items.
///
/// Pages are requested starting at 1, one at a time, and only once the
/// consumer has drained the previous page. A page holding fewer than
/// `per_page` items is the last one.
pub fn paginate<'a, F, Fut>(per_page: u32, fetch_page: F) -> impl Stream<Item = Result<Value>> + 'a
where
    F: FnMut(u32) -> Fut + 'a,
    Fut: Future<Output = Result<Vec<Value>>> + 'a,
{
    let per_page = per_page.max(1);
    stream::try_unfold(
        (fetch_page, Some(1u32)),
        move |(mut fetch_page, next)| async move {
            let Some(page) = next else {
                return Ok(None);
            };
            let items = fetch_page(page).await?;
            debug!(page, items = items.len(), "fetched page");
            let next = if items.len() >= per_page as usize {
                Some(page + 1)
            } else {
                None
            };
            let items = stream::iter(items.into_iter().map(Ok::<Value, anyhow::Error>));
            Ok::<_, anyhow::Error>(Some((items, (fetch_page, next))))
        },
    )
    .try_flatten()
}
