//! Key-value store collaborator.

use async_trait::async_trait;

use petstack_model::attribute_value::{AttributeValue, Item};
use petstack_model::error::OwnerError;

/// Errors reported by an [`OwnerStore`].
///
/// The display text is what the client sees.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The request was rejected as invalid.
    #[error("{0}")]
    Validation(String),

    /// The table does not exist.
    #[error("Requested resource not found")]
    ResourceNotFound,

    /// Any other backend failure, with the backend's message.
    #[error("{0}")]
    Backend(String),
}

impl From<StoreError> for OwnerError {
    fn from(err: StoreError) -> Self {
        OwnerError::store(err.to_string()).with_source(err)
    }
}

/// One page of a table scan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanPage {
    /// Items in this page, in store order.
    pub items: Vec<Item>,
    /// Continuation key; `None` once the scan is complete.
    pub last_evaluated_key: Option<Item>,
}

/// The owner table.
///
/// Keys are the value of the `ownerid` attribute.
#[async_trait]
pub trait OwnerStore: Send + Sync + 'static {
    /// Point lookup.
    async fn get_item(&self, key: &AttributeValue) -> Result<Option<Item>, StoreError>;

    /// Read one page, starting after `exclusive_start_key` when given.
    async fn scan(&self, exclusive_start_key: Option<Item>) -> Result<ScanPage, StoreError>;

    /// Unconditional put; replaces any record with the same key.
    async fn put_item(&self, item: Item) -> Result<(), StoreError>;

    /// `SET <attribute> = :value` with no existence check.
    ///
    /// Returns the updated attribute (`UPDATED_NEW`).
    async fn update_item(
        &self,
        key: &AttributeValue,
        attribute: &str,
        value: AttributeValue,
    ) -> Result<Option<Item>, StoreError>;

    /// Delete by key, returning the prior record (`ALL_OLD`).
    async fn delete_item(&self, key: &AttributeValue) -> Result<Option<Item>, StoreError>;
}
