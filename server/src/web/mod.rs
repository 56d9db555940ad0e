//! Web server module for handling the inbound order webhook.
//!
//! This module provides the handler pipeline that:
//! - Receives Shopify orders/create webhooks
//! - Verifies the HMAC signature
//! - Filters and transforms the order into EFS XML
//! - Forwards it synchronously and relays the partner's response

pub mod handlers;
pub mod signature;

pub use handlers::{
    health, order_webhook, AppState, HealthResponse, NO_ITEMS_BODY, UNAUTHORIZED_BODY,
};
pub use signature::{verify_shopify_signature, SHOPIFY_HMAC_HEADER};
