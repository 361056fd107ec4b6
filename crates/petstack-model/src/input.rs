//! Validated owner operation inputs.
//!
//! Each input is built from the parsed client JSON. Presence checks follow
//! JSON truthiness: `null`, `false`, `0`, `""`, `[]` and `{}` count as
//! missing.

use serde_json::Value;

use crate::attribute_value::{AttributeValue, Item};
use crate::error::OwnerError;

/// Primary key attribute of the owner table.
pub const OWNER_KEY_ATTRIBUTE: &str = "ownerid";

/// Fields a create request must carry, in validation order.
pub const SAVE_REQUIRED_FIELDS: [&str; 6] = [
    "ownerid",
    "ownername",
    "petname",
    "age",
    "fileName",
    "fileType",
];

/// Fields persisted by a create request.
pub const OWNER_RECORD_FIELDS: [&str; 4] = ["ownerid", "ownername", "petname", "age"];

/// Returns `true` if `value` is truthy.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn truthy_field<'a>(body: &'a Value, name: &str) -> Option<&'a Value> {
    body.get(name).filter(|v| is_truthy(v))
}

/// Input for `GET /owner`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetOwnerInput {
    /// Owner id from the `ownerid` query parameter.
    pub owner_id: String,
}

impl GetOwnerInput {
    /// Build from the query parameter; empty or absent is rejected.
    pub fn from_query(owner_id: Option<&str>) -> Result<Self, OwnerError> {
        match owner_id {
            Some(id) if !id.is_empty() => Ok(Self {
                owner_id: id.to_owned(),
            }),
            _ => Err(OwnerError::invalid_input("Missing ownerid parameter")),
        }
    }

    /// The store key for this owner.
    #[must_use]
    pub fn key(&self) -> AttributeValue {
        AttributeValue::S(self.owner_id.clone())
    }
}

/// File the client intends to upload alongside a new owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadDescriptor {
    /// Object key.
    pub file_name: String,
    /// MIME type the upload will be sent with.
    pub file_type: String,
}

/// Input for `POST /owner`.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveOwnerInput {
    /// The four persisted owner fields.
    pub record: Item,
    /// Upload descriptor, not persisted.
    pub upload: UploadDescriptor,
}

impl SaveOwnerInput {
    /// Validate the six required fields in order.
    ///
    /// The first missing, falsy, or mistyped field is reported.
    pub fn from_json(body: &Value) -> Result<Self, OwnerError> {
        for field in SAVE_REQUIRED_FIELDS {
            if truthy_field(body, field).is_none() {
                return Err(OwnerError::invalid_field(field));
            }
        }

        let string_field = |name: &str| {
            body.get(name)
                .and_then(Value::as_str)
                .map(str::to_owned)
                .ok_or_else(|| OwnerError::invalid_field(name))
        };
        let upload = UploadDescriptor {
            file_name: string_field("fileName")?,
            file_type: string_field("fileType")?,
        };

        let record = OWNER_RECORD_FIELDS
            .iter()
            .filter_map(|name| {
                body.get(*name)
                    .map(|v| ((*name).to_owned(), AttributeValue::from_json(v)))
            })
            .collect();

        Ok(Self { record, upload })
    }
}

/// Input for `PATCH /owner`.
#[derive(Debug, Clone, PartialEq)]
pub struct ModifyOwnerInput {
    /// Key of the record to update.
    pub owner_id: AttributeValue,
    /// Attribute name, used verbatim in the update expression.
    pub update_key: String,
    /// New value for the attribute.
    pub update_value: AttributeValue,
}

impl ModifyOwnerInput {
    /// Build from a JSON object carrying `ownerId`, `updateKey`, `updateValue`.
    ///
    /// A body that is not a JSON object is an internal fault.
    pub fn from_json(body: &Value) -> Result<Self, OwnerError> {
        if !body.is_object() {
            return Err(OwnerError::internal("update body is not a JSON object"));
        }

        let (Some(owner_id), Some(update_key), Some(update_value)) = (
            truthy_field(body, "ownerId"),
            truthy_field(body, "updateKey"),
            truthy_field(body, "updateValue"),
        ) else {
            return Err(OwnerError::invalid_input(
                "Missing ownerId, updateKey, or updateValue",
            ));
        };

        let update_key = match update_key {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };

        Ok(Self {
            owner_id: AttributeValue::from_json(owner_id),
            update_key,
            update_value: AttributeValue::from_json(update_value),
        })
    }
}

/// Input for `DELETE /owner`.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteOwnerInput {
    /// Key of the record to delete.
    pub owner_id: AttributeValue,
}

impl DeleteOwnerInput {
    /// Build from a JSON object carrying `ownerId`.
    ///
    /// Any present value is passed on as the key, falsy ones included, so the
    /// store reports what is wrong with it. An absent key is an internal error.
    pub fn from_json(body: &Value) -> Result<Self, OwnerError> {
        if !body.is_object() {
            return Err(OwnerError::internal("delete body is not a JSON object"));
        }
        let owner_id = body
            .get("ownerId")
            .ok_or_else(|| OwnerError::internal("delete body has no ownerId"))?;
        Ok(Self {
            owner_id: AttributeValue::from_json(owner_id),
        })
    }
}
