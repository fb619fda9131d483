//! Equipment model

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Equipment record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Equipment {
    /// Primary key, client-supplied on creation and immutable afterwards
    pub id: String,
    /// Display label
    pub name: String,
    /// Free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    pub price: f64,
    /// Stock count; reservations decrement it, cancellations restore it
    pub quantity: i64,
}

/// Create equipment request. The client-generated `_id` field becomes the
/// record's primary key; posting an existing id overwrites the record.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEquipment {
    #[serde(rename = "_id")]
    #[validate(length(min = 1, message = "id must not be empty"))]
    pub id: String,
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    pub desc: Option<String>,
    pub price: f64,
    pub quantity: i64,
}

impl CreateEquipment {
    /// Build the record keyed by the client-supplied id
    pub fn into_equipment(self) -> Equipment {
        Equipment {
            id: self.id,
            name: self.name,
            desc: self.desc,
            price: self.price,
            quantity: self.quantity,
        }
    }
}

/// Update equipment request; the full field set is overwritten
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateEquipment {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    pub desc: Option<String>,
    pub price: f64,
    pub quantity: i64,
}
