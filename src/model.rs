//! Wire types for the items API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored item. `id` and `created_at` are always assigned by the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub created_at: DateTime<Utc>,
}

/// Client payload for `POST /items` and `PUT /items/{id}`.
///
/// Any `id` or `created_at` keys in the request body are dropped during
/// deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewItem {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
}

impl NewItem {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            description: None,
            price,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Item {
    /// Builds a stored record from client fields plus server-owned identity.
    pub fn stamp(id: u64, created_at: DateTime<Utc>, fields: NewItem) -> Self {
        Self {
            id,
            name: fields.name,
            description: fields.description,
            price: fields.price,
            created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RootInfo {
    pub message: String,
    pub version: String,
    pub docs: String,
    pub health: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheck {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeploymentInfo {
    pub app_name: String,
    pub environment: String,
    pub deployment_time: String,
    pub build_number: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteConfirmation {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn client_identity_fields_are_ignored() {
        let payload: NewItem = serde_json::from_value(json!({
            "id": 77,
            "name": "Widget",
            "price": 3.5,
            "created_at": "2001-01-01T00:00:00Z"
        }))
        .unwrap();

        assert_eq!(payload, NewItem::new("Widget", 3.5));
    }

    #[test]
    fn missing_price_is_rejected() {
        let result = serde_json::from_value::<NewItem>(json!({ "name": "Widget" }));
        assert!(result.is_err());
    }

    #[test]
    fn absent_description_serializes_as_null() {
        let item = Item::stamp(1, Utc::now(), NewItem::new("Widget", 1.0));
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["description"], serde_json::Value::Null);
        assert_eq!(value["id"], 1);
    }
}
