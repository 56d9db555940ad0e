//! EFS Bridge - Shopify order webhook to eFulfillment Service relay.
//!
//! A single stateless web server that authenticates Shopify orders/create
//! webhooks, converts eligible orders into the EFS XML order format, and
//! submits them synchronously.
//!
//! ## Architecture
//!
//! ```text
//! Shopify webhook → verify HMAC → filter line items → render XML → POST to EFS
//! ```

pub mod config;
pub mod forward;
pub mod order;
pub mod transform;
pub mod web;
pub mod xml;

// Re-export commonly used types
pub use config::{Config, ConfigError};
pub use forward::{ForwardError, ForwardOutcome, Forwarder};
pub use order::{LineItem, Order, OrderParseError, ShippingAddress};
pub use web::AppState;
