//! Owner operation response bodies.

use serde::{Deserialize, Serialize};

use crate::attribute_value::Item;

/// Body of `GET /status`.
pub const HEALTH_CHECK_MESSAGE: &str = "Service is operational";

/// Body of unmatched routes.
pub const NOT_FOUND_MESSAGE: &str = "404 Not Found";

/// Attributes returned by a store write (`UPDATED_NEW` or `ALL_OLD`).
///
/// Serializes as `{}` when the store returned nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReturnedAttributes {
    /// The returned attributes, if any.
    #[serde(rename = "Attributes", skip_serializing_if = "Option::is_none", default)]
    pub attributes: Option<Item>,
}

impl ReturnedAttributes {
    /// Wrap the store's returned attributes.
    #[must_use]
    pub fn new(attributes: Option<Item>) -> Self {
        Self { attributes }
    }
}

/// Body of `GET /owners`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListOwnersOutput {
    /// Every stored owner, in store order.
    pub owners: Vec<Item>,
}

/// Body of `POST /owner`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveOwnerOutput {
    /// Always `SAVE`.
    #[serde(rename = "Operation")]
    pub operation: String,
    /// Always `SUCCESS`.
    #[serde(rename = "Message")]
    pub message: String,
    /// The persisted record.
    #[serde(rename = "Item")]
    pub item: Item,
    /// Signed PUT URL for the upload.
    #[serde(rename = "uploadUrl")]
    pub upload_url: String,
    /// Signed GET URL for the uploaded file.
    #[serde(rename = "fileUrl")]
    pub file_url: String,
}

impl SaveOwnerOutput {
    /// Successful save of `item`.
    #[must_use]
    pub fn new(item: Item, upload_url: String, file_url: String) -> Self {
        Self {
            operation: "SAVE".to_owned(),
            message: "SUCCESS".to_owned(),
            item,
            upload_url,
            file_url,
        }
    }
}

/// Body of `PATCH /owner`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifyOwnerOutput {
    /// Always `UPDATE`.
    #[serde(rename = "Operation")]
    pub operation: String,
    /// Always `SUCCESS`.
    #[serde(rename = "Message")]
    pub message: String,
    /// New values of the updated attributes.
    #[serde(rename = "UpdatedAttributes")]
    pub updated_attributes: ReturnedAttributes,
}

impl ModifyOwnerOutput {
    /// Successful update returning `updated`.
    #[must_use]
    pub fn new(updated: Option<Item>) -> Self {
        Self {
            operation: "UPDATE".to_owned(),
            message: "SUCCESS".to_owned(),
            updated_attributes: ReturnedAttributes::new(updated),
        }
    }
}

/// Body of `DELETE /owner`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteOwnerOutput {
    /// Always `DELETE`.
    #[serde(rename = "Operation")]
    pub operation: String,
    /// Always `SUCCESS`.
    #[serde(rename = "Message")]
    pub message: String,
    /// The record as it was before deletion.
    #[serde(rename = "Item")]
    pub item: ReturnedAttributes,
}

impl DeleteOwnerOutput {
    /// Successful delete; `prior` is `None` when nothing existed.
    #[must_use]
    pub fn new(prior: Option<Item>) -> Self {
        Self {
            operation: "DELETE".to_owned(),
            message: "SUCCESS".to_owned(),
            item: ReturnedAttributes::new(prior),
        }
    }
}
