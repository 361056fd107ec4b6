//! DynamoDB-backed owner table.

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_dynamodb::types::ReturnValue;
use tracing::debug;

use petstack_core::store::{OwnerStore, ScanPage, StoreError};
use petstack_model::attribute_value::{AttributeValue, Item};
use petstack_model::input::OWNER_KEY_ATTRIBUTE;

use crate::convert::{SdkItem, item_from_sdk, item_to_sdk, to_sdk};

/// Owner table stored in a DynamoDB table keyed by `ownerid`.
#[derive(Debug, Clone)]
pub struct DynamoDbOwnerStore {
    client: Client,
    table_name: String,
}

impl DynamoDbOwnerStore {
    /// Create a store over `table_name`.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }
}

/// Map an SDK failure onto a [`StoreError`], keeping the service message.
fn store_error<E>(err: &E) -> StoreError
where
    E: ProvideErrorMetadata + std::error::Error,
{
    let message = err
        .message()
        .map_or_else(|| DisplayErrorContext(err).to_string(), ToOwned::to_owned);
    match err.code() {
        Some("ValidationException") => StoreError::Validation(message),
        Some("ResourceNotFoundException") => StoreError::ResourceNotFound,
        _ => StoreError::Backend(message),
    }
}

fn optional_item(item: Option<&SdkItem>) -> Result<Option<Item>, StoreError> {
    item.map(item_from_sdk).transpose()
}

#[async_trait]
impl OwnerStore for DynamoDbOwnerStore {
    async fn get_item(&self, key: &AttributeValue) -> Result<Option<Item>, StoreError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(OWNER_KEY_ATTRIBUTE, to_sdk(key))
            .send()
            .await
            .map_err(|e| store_error(&e))?;
        optional_item(output.item())
    }

    async fn scan(&self, exclusive_start_key: Option<Item>) -> Result<ScanPage, StoreError> {
        let output = self
            .client
            .scan()
            .table_name(&self.table_name)
            .set_exclusive_start_key(exclusive_start_key.as_ref().map(item_to_sdk))
            .send()
            .await
            .map_err(|e| store_error(&e))?;

        let items = output
            .items()
            .iter()
            .map(item_from_sdk)
            .collect::<Result<Vec<_>, _>>()?;
        debug!(count = items.len(), "scanned owner page");

        Ok(ScanPage {
            items,
            last_evaluated_key: optional_item(output.last_evaluated_key())?,
        })
    }

    async fn put_item(&self, item: Item) -> Result<(), StoreError> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item_to_sdk(&item)))
            .send()
            .await
            .map_err(|e| store_error(&e))?;
        Ok(())
    }

    async fn update_item(
        &self,
        key: &AttributeValue,
        attribute: &str,
        value: AttributeValue,
    ) -> Result<Option<Item>, StoreError> {
        let output = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key(OWNER_KEY_ATTRIBUTE, to_sdk(key))
            .update_expression(format!("SET {attribute} = :value"))
            .expression_attribute_values(":value", to_sdk(&value))
            .return_values(ReturnValue::UpdatedNew)
            .send()
            .await
            .map_err(|e| store_error(&e))?;
        optional_item(output.attributes())
    }

    async fn delete_item(&self, key: &AttributeValue) -> Result<Option<Item>, StoreError> {
        let output = self
            .client
            .delete_item()
            .table_name(&self.table_name)
            .key(OWNER_KEY_ATTRIBUTE, to_sdk(key))
            .return_values(ReturnValue::AllOld)
            .send()
            .await
            .map_err(|e| store_error(&e))?;
        optional_item(output.attributes())
    }
}
