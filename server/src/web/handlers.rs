//! Webhook endpoint handlers.
//!
//! The order webhook runs the whole pipeline inline:
//! 1. Verify the Shopify HMAC signature
//! 2. Decode and filter the order
//! 3. Render the EFS XML document
//! 4. Forward it and relay the partner's verdict
//!
//! There is no queue and no retry; every outcome is terminal for the
//! delivery, and a redelivered webhook runs the pipeline again from scratch.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::forward::{ForwardOutcome, Forwarder};
use crate::order::Order;
use crate::transform::{filter_fulfillable, render_order_xml};
use crate::web::signature::verify_shopify_signature;
use crate::Config;

/// Response body for an unauthenticated delivery.
pub const UNAUTHORIZED_BODY: &str = "Unauthorized - Invalid Shopify Webhook Signature";

/// Response body when filtering leaves nothing to forward.
pub const NO_ITEMS_BODY: &str = "No efulfillment items";

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub forwarder: Forwarder,
}

impl AppState {
    pub fn new(config: Config, forwarder: Forwarder) -> Self {
        Self {
            config: Arc::new(config),
            forwarder,
        }
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// =============================================================================
// Shopify Order Webhook
// =============================================================================

/// Shopify orders/create webhook endpoint.
///
/// The body is taken raw because signature verification depends on the exact
/// bytes Shopify sent; decoding happens only after authentication.
pub async fn order_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    info!(body_length = body.len(), "order_webhook_received");

    if !verify_shopify_signature(&headers, &body, &state.config.webhook_secret) {
        warn!("order_webhook_unauthorized");
        return (StatusCode::UNAUTHORIZED, UNAUTHORIZED_BODY.to_string());
    }

    // Authenticated; safe to decode
    let order = match Order::from_json(&body) {
        Ok(order) => order,
        Err(e) => {
            error!(error = %e, "order_webhook_malformed_payload");
            return (StatusCode::BAD_REQUEST, format!("Bad Request - {}", e));
        }
    };

    info!(
        order_id = order.id,
        test = order.test,
        line_items = order.line_items.len(),
        "order_verified"
    );

    let order = match filter_fulfillable(order) {
        Some(order) => order,
        None => {
            info!("no_efulfillment_items");
            return (StatusCode::OK, NO_ITEMS_BODY.to_string());
        }
    };

    let xml = render_order_xml(&order, &state.config);

    match state.forwarder.forward(order.id, &xml).await {
        Ok(ForwardOutcome::Accepted { body }) => (StatusCode::OK, body),
        Ok(ForwardOutcome::Rejected { status, body }) => {
            // Relay the partner's verdict to Shopify unchanged
            let status = StatusCode::from_u16(status)
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, body)
        }
        Err(e) => {
            error!(order_id = order.id, error = %e, "order_forward_failed");
            (StatusCode::BAD_GATEWAY, format!("Bad Gateway - {}", e))
        }
    }
}
