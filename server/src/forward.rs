//! Outbound order submission to the EFS intake endpoint.
//!
//! One HTTPS POST per order, single attempt. A non-200 answer from the
//! partner is an outcome the handler relays back to Shopify, not an error;
//! only transport-level failures (DNS, TLS, reset, timeout) are errors.

use std::time::Duration;

use reqwest::Client;
use thiserror::Error;
use tracing::{error, info};

/// Forward failure taxonomy.
#[derive(Debug, Error)]
pub enum ForwardError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("transport error submitting order: {0}")]
    Transport(#[source] reqwest::Error),
}

/// Partner verdict on a submitted order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForwardOutcome {
    /// HTTP 200, body is the partner's raw response
    Accepted { body: String },
    /// Any other status, relayed to the caller as-is
    Rejected { status: u16, body: String },
}

/// Client for the EFS order intake endpoint.
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: Client,
    endpoint: String,
}

impl Forwarder {
    /// Build a forwarder for the given endpoint with a request timeout.
    pub fn new(endpoint: String, timeout: Duration) -> Result<Self, ForwardError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ForwardError::Client)?;

        Ok(Self { client, endpoint })
    }

    /// Submit one order document. Exactly one attempt; a redelivered webhook
    /// produces an independent second submission.
    pub async fn forward(&self, order_id: i64, xml: &str) -> Result<ForwardOutcome, ForwardError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "text/xml")
            .body(xml.to_string())
            .send()
            .await
            .map_err(|e| {
                error!(order_id = order_id, error = %e, "order_submit_transport_error");
                ForwardError::Transport(e)
            })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(ForwardError::Transport)?;

        info!(
            order_id = order_id,
            status_code = status,
            body_length = body.len(),
            "efs_response_received"
        );

        if status == 200 {
            info!(order_id = order_id, "order_submitted");
            Ok(ForwardOutcome::Accepted { body })
        } else {
            error!(order_id = order_id, status_code = status, "order_submit_rejected");
            Ok(ForwardOutcome::Rejected { status, body })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{routing::post, Router};
    use tokio::net::TcpListener;

    /// Spawn a mock partner endpoint returning a fixed status and body.
    async fn spawn_partner(status: u16, body: &'static str) -> String {
        let app = Router::new().route(
            "/xml/orders/",
            post(move || async move {
                (axum::http::StatusCode::from_u16(status).unwrap(), body)
            }),
        );
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/xml/orders/", addr)
    }

    #[tokio::test]
    async fn test_forward_accepted_on_200() {
        let endpoint = spawn_partner(200, "OK").await;
        let forwarder = Forwarder::new(endpoint, Duration::from_secs(5)).unwrap();

        let outcome = forwarder.forward(1, "<OrderSubmitRequest/>").await.unwrap();
        assert_eq!(
            outcome,
            ForwardOutcome::Accepted {
                body: "OK".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_forward_rejected_on_500() {
        let endpoint = spawn_partner(500, "error").await;
        let forwarder = Forwarder::new(endpoint, Duration::from_secs(5)).unwrap();

        let outcome = forwarder.forward(1, "<OrderSubmitRequest/>").await.unwrap();
        assert_eq!(
            outcome,
            ForwardOutcome::Rejected {
                status: 500,
                body: "error".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_forward_transport_error_on_unreachable_endpoint() {
        // Bind then drop a listener so the port is closed
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let endpoint = format!("http://{}/xml/orders/", addr);
        let forwarder = Forwarder::new(endpoint, Duration::from_secs(5)).unwrap();

        let result = forwarder.forward(1, "<OrderSubmitRequest/>").await;
        assert!(matches!(result, Err(ForwardError::Transport(_))));
    }
}
