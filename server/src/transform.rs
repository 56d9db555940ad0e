//! Order filtering and XML rendering.
//!
//! ## Transformation flow
//!
//! ```text
//! Order → filter_fulfillable() → render_order_xml() → OrderSubmitRequest XML
//! ```
//!
//! Items fulfilled by Printful are routed through Printful's own Shopify
//! integration and are excluded here; only the remaining items are submitted
//! to EFS. An order with nothing left after filtering is a valid no-op.

use tracing::info;

use crate::config::Config;
use crate::order::Order;
use crate::xml::XmlWriter;

/// Fulfillment service tag excluded from EFS routing. Exact, case-sensitive
/// match; Shopify normalizes the tag itself.
pub const PRINTFUL_SERVICE: &str = "printful";

/// EFS order schema version submitted for live orders.
const SCHEMA_VERSION: &str = "0.6";

/// Drop line items handled outside EFS, preserving the relative order of the
/// survivors. Returns `None` when nothing is left to forward.
pub fn filter_fulfillable(mut order: Order) -> Option<Order> {
    let before = order.line_items.len();
    order
        .line_items
        .retain(|item| item.fulfillment_service != PRINTFUL_SERVICE);

    info!(
        order_id = order.id,
        total_items = before,
        eligible_items = order.line_items.len(),
        "line_items_filtered"
    );

    if order.line_items.is_empty() {
        None
    } else {
        Some(order)
    }
}

/// Shipping method for the destination country. Domestic orders ship USPS
/// Media Mail; every other destination uses the ePacket international method.
fn shipping_method(country_code: &str) -> &'static str {
    if country_code == "US" {
        "USPS_MEDIA"
    } else {
        "EPGEPACKT"
    }
}

/// Schema version field. Test orders are flagged so EFS does not ship them.
fn schema_version(test: bool) -> &'static str {
    if test {
        "TEST"
    } else {
        SCHEMA_VERSION
    }
}

/// Render an order into the EFS OrderSubmitRequest document.
///
/// Element order is part of the partner contract and must not change.
pub fn render_order_xml(order: &Order, config: &Config) -> String {
    let address = &order.shipping_address;

    let mut w = XmlWriter::new();
    w.open("OrderSubmitRequest");
    w.leaf("Version", schema_version(order.test));
    w.leaf("MerchantId", &config.merchant_id);
    w.leaf("MerchantName", &config.merchant_name);
    w.leaf("MerchantToken", &config.merchant_token);
    w.open("OrderList");
    w.open("Order");
    w.leaf("OrderNumber", &order.id.to_string());
    w.leaf("ShippingMethod", shipping_method(&address.country_code));
    w.open("ShippingAddress");
    w.leaf("FirstName", &address.first_name);
    w.leaf("LastName", &address.last_name);
    w.leaf("Address1", &address.address1);
    w.leaf("City", &address.city);
    w.leaf("State", &address.province);
    w.leaf("PostalCode", &address.zip);
    w.leaf("Country", &address.country_code);
    w.close("ShippingAddress");
    w.open("ItemList");
    for item in &order.line_items {
        w.open("Item");
        w.leaf("Sku", &item.sku);
        w.leaf("Quantity", &item.quantity.to_string());
        w.close("Item");
    }
    w.close("ItemList");
    w.close("Order");
    w.close("OrderList");
    w.close("OrderSubmitRequest");
    w.into_string()
}
