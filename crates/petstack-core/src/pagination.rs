//! Lazy table scan pagination.

use futures::stream::{self, Stream, TryStreamExt};

use petstack_model::attribute_value::Item;

use crate::store::{OwnerStore, StoreError};

enum Cursor {
    Start,
    After(Item),
    Done,
}

/// Stream every page of the table, following continuation keys.
///
/// Nothing is read until the stream is polled. The stream ends after the
/// first page without a continuation key or at the first error. Calling
/// this again starts a fresh scan.
pub fn scan_pages<S: OwnerStore + ?Sized>(
    store: &S,
) -> impl Stream<Item = Result<Vec<Item>, StoreError>> + Send + '_ {
    stream::try_unfold(Cursor::Start, move |cursor| async move {
        let start_key = match cursor {
            Cursor::Done => return Ok(None),
            Cursor::Start => None,
            Cursor::After(key) => Some(key),
        };

        let page = store.scan(start_key).await?;
        let next = page.last_evaluated_key.map_or(Cursor::Done, Cursor::After);
        Ok(Some((page.items, next)))
    })
}

/// Scan the whole table into one list.
pub async fn scan_all<S: OwnerStore + ?Sized>(store: &S) -> Result<Vec<Item>, StoreError> {
    scan_pages(store).try_concat().await
}
