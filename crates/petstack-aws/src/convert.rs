//! Conversion between SDK attribute values and the owner model.

use std::collections::HashMap;

use aws_sdk_dynamodb::primitives::Blob;
use aws_sdk_dynamodb::types::AttributeValue as SdkValue;
use bytes::Bytes;

use petstack_core::store::StoreError;
use petstack_model::attribute_value::{AttributeValue, Item};

/// Attribute map in SDK form.
pub type SdkItem = HashMap<String, SdkValue>;

/// Convert a model value into its SDK form.
#[must_use]
pub fn to_sdk(value: &AttributeValue) -> SdkValue {
    match value {
        AttributeValue::S(s) => SdkValue::S(s.clone()),
        AttributeValue::N(n) => SdkValue::N(n.clone()),
        AttributeValue::B(b) => SdkValue::B(Blob::new(b.to_vec())),
        AttributeValue::Ss(v) => SdkValue::Ss(v.clone()),
        AttributeValue::Ns(v) => SdkValue::Ns(v.clone()),
        AttributeValue::Bs(v) => SdkValue::Bs(v.iter().map(|b| Blob::new(b.to_vec())).collect()),
        AttributeValue::Bool(b) => SdkValue::Bool(*b),
        AttributeValue::Null(b) => SdkValue::Null(*b),
        AttributeValue::L(v) => SdkValue::L(v.iter().map(to_sdk).collect()),
        AttributeValue::M(m) => SdkValue::M(item_to_sdk(m)),
    }
}

/// Convert an SDK value into the model.
///
/// Fails on variants added to the SDK after this crate was written.
pub fn from_sdk(value: &SdkValue) -> Result<AttributeValue, StoreError> {
    let converted = match value {
        SdkValue::S(s) => AttributeValue::S(s.clone()),
        SdkValue::N(n) => AttributeValue::N(n.clone()),
        SdkValue::B(b) => AttributeValue::B(Bytes::copy_from_slice(b.as_ref())),
        SdkValue::Ss(v) => AttributeValue::Ss(v.clone()),
        SdkValue::Ns(v) => AttributeValue::Ns(v.clone()),
        SdkValue::Bs(v) => {
            AttributeValue::Bs(v.iter().map(|b| Bytes::copy_from_slice(b.as_ref())).collect())
        }
        SdkValue::Bool(b) => AttributeValue::Bool(*b),
        SdkValue::Null(b) => AttributeValue::Null(*b),
        SdkValue::L(v) => AttributeValue::L(v.iter().map(from_sdk).collect::<Result<_, _>>()?),
        SdkValue::M(m) => AttributeValue::M(item_from_sdk(m)?),
        other => {
            return Err(StoreError::Backend(format!(
                "Unsupported attribute value: {other:?}"
            )));
        }
    };
    Ok(converted)
}

/// Convert a model item into an SDK attribute map.
#[must_use]
pub fn item_to_sdk(item: &Item) -> SdkItem {
    item.iter().map(|(k, v)| (k.clone(), to_sdk(v))).collect()
}

/// Convert an SDK attribute map into a model item.
pub fn item_from_sdk(item: &SdkItem) -> Result<Item, StoreError> {
    item.iter()
        .map(|(k, v)| Ok((k.clone(), from_sdk(v)?)))
        .collect()
}
