//! In-memory owner table.
//!
//! Backs the local server and the test suites. It keeps the same contract as
//! the managed store: string keys only, paged scans in key order, overwrite
//! puts, upserting single-attribute updates, and `ALL_OLD` deletes.

use std::collections::BTreeMap;
use std::ops::Bound;

use async_trait::async_trait;
use parking_lot::RwLock;

use petstack_model::attribute_value::{AttributeValue, Item};
use petstack_model::input::OWNER_KEY_ATTRIBUTE;

use crate::store::{OwnerStore, ScanPage, StoreError};

/// Default number of items per scan page.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Owner table held in process memory.
#[derive(Debug)]
pub struct InMemoryOwnerStore {
    table: RwLock<BTreeMap<String, Item>>,
    page_size: usize,
}

impl InMemoryOwnerStore {
    /// Create an empty table with the default page size.
    #[must_use]
    pub fn new() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }

    /// Create an empty table returning at most `page_size` items per scan.
    #[must_use]
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            table: RwLock::new(BTreeMap::new()),
            page_size: page_size.max(1),
        }
    }

    /// Number of stored owners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.read().len()
    }

    /// Returns `true` if no owners are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.read().is_empty()
    }
}

impl Default for InMemoryOwnerStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract the string key, rejecting other types and empty strings.
fn string_key(key: &AttributeValue) -> Result<&str, StoreError> {
    match key {
        AttributeValue::S(s) if s.is_empty() => Err(StoreError::Validation(format!(
            "One or more parameter values are not valid. The AttributeValue for a key \
             attribute cannot contain an empty string value. Key: {OWNER_KEY_ATTRIBUTE}"
        ))),
        AttributeValue::S(s) => Ok(s),
        other => Err(StoreError::Validation(format!(
            "One or more parameter values were invalid: Type mismatch for key \
             {OWNER_KEY_ATTRIBUTE} expected: S actual: {}",
            other.type_descriptor()
        ))),
    }
}

fn item_key(item: &Item) -> Result<&str, StoreError> {
    let key = item.get(OWNER_KEY_ATTRIBUTE).ok_or_else(|| {
        StoreError::Validation(format!(
            "One or more parameter values were invalid: Missing the key {OWNER_KEY_ATTRIBUTE} in the item"
        ))
    })?;
    string_key(key)
}

/// Attribute names accepted in a `SET` clause: a letter followed by letters,
/// digits, or underscores.
fn validate_attribute_name(name: &str) -> Result<(), StoreError> {
    let mut chars = name.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StoreError::Validation(format!(
            "Invalid UpdateExpression: Syntax error; token: \"{name}\""
        )))
    }
}

#[async_trait]
impl OwnerStore for InMemoryOwnerStore {
    async fn get_item(&self, key: &AttributeValue) -> Result<Option<Item>, StoreError> {
        let key = string_key(key)?;
        Ok(self.table.read().get(key).cloned())
    }

    async fn scan(&self, exclusive_start_key: Option<Item>) -> Result<ScanPage, StoreError> {
        let start = exclusive_start_key
            .as_ref()
            .map(item_key)
            .transpose()?
            .map_or(Bound::Unbounded, |k| Bound::Excluded(k.to_owned()));

        let table = self.table.read();
        let mut remaining = table.range::<String, _>((start, Bound::Unbounded));
        let items: Vec<Item> = remaining
            .by_ref()
            .take(self.page_size)
            .map(|(_, item)| item.clone())
            .collect();

        let more = remaining.next().is_some();
        let last_evaluated_key = if more {
            items.last().and_then(|item| {
                item.get(OWNER_KEY_ATTRIBUTE)
                    .map(|key| [(OWNER_KEY_ATTRIBUTE.to_owned(), key.clone())].into_iter().collect())
            })
        } else {
            None
        };

        Ok(ScanPage {
            items,
            last_evaluated_key,
        })
    }

    async fn put_item(&self, item: Item) -> Result<(), StoreError> {
        let key = item_key(&item)?.to_owned();
        self.table.write().insert(key, item);
        Ok(())
    }

    async fn update_item(
        &self,
        key: &AttributeValue,
        attribute: &str,
        value: AttributeValue,
    ) -> Result<Option<Item>, StoreError> {
        let key_str = string_key(key)?;
        validate_attribute_name(attribute)?;
        if attribute == OWNER_KEY_ATTRIBUTE {
            return Err(StoreError::Validation(format!(
                "One or more parameter values were invalid: Cannot update attribute \
                 {OWNER_KEY_ATTRIBUTE}. This attribute is part of the key"
            )));
        }

        let mut table = self.table.write();
        let record = table.entry(key_str.to_owned()).or_insert_with(|| {
            [(OWNER_KEY_ATTRIBUTE.to_owned(), key.clone())]
                .into_iter()
                .collect()
        });
        record.insert(attribute.to_owned(), value.clone());

        Ok(Some([(attribute.to_owned(), value)].into_iter().collect()))
    }

    async fn delete_item(&self, key: &AttributeValue) -> Result<Option<Item>, StoreError> {
        let key = string_key(key)?;
        Ok(self.table.write().remove(key))
    }
}
