//! Typed Shopify order payload.
//!
//! The webhook body is decoded into these records once at the boundary.
//! Decode or shape failures surface as an explicit error branch instead of
//! interpolating undefined fields into the partner XML.

use serde::Deserialize;
use thiserror::Error;

/// Order payload decode failure.
#[derive(Debug, Error)]
#[error("malformed order payload: {0}")]
pub struct OrderParseError(#[from] serde_json::Error);

/// A Shopify order as delivered by the orders/create webhook.
///
/// Only the fields this bridge forwards are modeled; everything else in the
/// webhook payload is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Order {
    /// Shopify order id, used as the partner OrderNumber
    pub id: i64,
    /// True for orders placed through Shopify's test mode
    #[serde(default)]
    pub test: bool,
    /// Destination address
    pub shipping_address: ShippingAddress,
    /// Ordered line items
    pub line_items: Vec<LineItem>,
}

/// Shipping destination.
///
/// Shopify omits address fields it has no value for; an absent field renders
/// as an empty tag downstream, never as a decode failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShippingAddress {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub address1: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub province: String,
    #[serde(default)]
    pub zip: String,
    #[serde(default)]
    pub country_code: String,
}

/// A single order line.
#[derive(Debug, Clone, Deserialize)]
pub struct LineItem {
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub quantity: u32,
    /// Tag naming the service responsible for shipping this item
    #[serde(default)]
    pub fulfillment_service: String,
}

impl Order {
    /// Decode an order from the raw webhook body.
    pub fn from_json(body: &str) -> Result<Self, OrderParseError> {
        Ok(serde_json::from_str(body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_ORDER: &str = r#"{
        "id": 450789469,
        "test": false,
        "shipping_address": {
            "first_name": "Bob",
            "last_name": "Norman",
            "address1": "Chestnut Street 92",
            "city": "Louisville",
            "province": "Kentucky",
            "zip": "40202",
            "country_code": "US"
        },
        "line_items": [
            {"sku": "IPOD2008PINK", "quantity": 1, "fulfillment_service": "manual"}
        ]
    }"#;

    #[test]
    fn test_decode_full_order() {
        let order = Order::from_json(FULL_ORDER).unwrap();
        assert_eq!(order.id, 450789469);
        assert!(!order.test);
        assert_eq!(order.shipping_address.country_code, "US");
        assert_eq!(order.line_items.len(), 1);
        assert_eq!(order.line_items[0].sku, "IPOD2008PINK");
    }

    #[test]
    fn test_decode_ignores_extra_fields() {
        let body = r#"{
            "id": 1,
            "email": "bob@example.com",
            "currency": "USD",
            "shipping_address": {"country_code": "DE"},
            "line_items": []
        }"#;
        let order = Order::from_json(body).unwrap();
        assert_eq!(order.id, 1);
        assert_eq!(order.shipping_address.country_code, "DE");
        assert!(order.line_items.is_empty());
    }

    #[test]
    fn test_decode_missing_address_fields_default_empty() {
        let body = r#"{
            "id": 2,
            "shipping_address": {"country_code": "US"},
            "line_items": [{"sku": "A1"}]
        }"#;
        let order = Order::from_json(body).unwrap();
        assert_eq!(order.shipping_address.first_name, "");
        assert_eq!(order.shipping_address.zip, "");
        assert_eq!(order.line_items[0].quantity, 0);
        assert_eq!(order.line_items[0].fulfillment_service, "");
    }

    #[test]
    fn test_decode_rejects_malformed_json() {
        assert!(Order::from_json("not json").is_err());
        assert!(Order::from_json("{}").is_err());
        assert!(Order::from_json(r#"{"id": "not-a-number", "shipping_address": {}, "line_items": []}"#).is_err());
    }
}
