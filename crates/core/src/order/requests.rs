//! Request types for order operations.
//!
//! These mirror what an upstream adapter can hand over: every field a caller
//! may forget is optional here, and the validation functions decide which
//! omissions are fatal.

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// Request payload for creating a new order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub customer_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_tax_amount: Option<BigDecimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_tax_amount: Option<BigDecimal>,
}

impl CreateOrderRequest {
    /// Create a fully populated request.
    pub fn new(
        customer_id: impl Into<String>,
        pre_tax_amount: BigDecimal,
        post_tax_amount: BigDecimal,
    ) -> Self {
        Self {
            customer_id: customer_id.into(),
            pre_tax_amount: Some(pre_tax_amount),
            post_tax_amount: Some(post_tax_amount),
        }
    }
}

/// Request payload for updating an order; the order id travels separately.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderRequest {
    #[serde(default)]
    pub customer_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_tax_amount: Option<BigDecimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_tax_amount: Option<BigDecimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
}

impl UpdateOrderRequest {
    /// Attach the order id taken from the request path.
    pub fn into_update(self, order_id: impl Into<String>) -> OrderUpdate {
        OrderUpdate {
            order_id: order_id.into(),
            customer_id: self.customer_id,
            pre_tax_amount: self.pre_tax_amount,
            post_tax_amount: self.post_tax_amount,
            version: self.version,
        }
    }
}

/// A full replacement of an order's mutable fields.
///
/// `version` is the version the caller last saw; the update only applies if
/// it still matches the stored one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderUpdate {
    #[serde(default)]
    pub order_id: String,
    #[serde(default)]
    pub customer_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_tax_amount: Option<BigDecimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_tax_amount: Option<BigDecimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
}

impl OrderUpdate {
    /// Create a fully populated update.
    pub fn new(
        order_id: impl Into<String>,
        customer_id: impl Into<String>,
        pre_tax_amount: BigDecimal,
        post_tax_amount: BigDecimal,
        version: i64,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            customer_id: customer_id.into(),
            pre_tax_amount: Some(pre_tax_amount),
            post_tax_amount: Some(post_tax_amount),
            version: Some(version),
        }
    }
}

/// Query parameters for listing orders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListOrdersQuery {
    /// Resume strictly after this order id. Empty is treated as absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclusive_start_key: Option<String>,
    /// Overrides the store's configured page size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl ListOrdersQuery {
    /// Query for the first page with the default page size.
    pub fn first_page() -> Self {
        Self::default()
    }

    /// Query for the page that follows the given cursor.
    pub fn after(exclusive_start_key: impl Into<String>) -> Self {
        Self {
            exclusive_start_key: Some(exclusive_start_key.into()),
            limit: None,
        }
    }

    /// Set an explicit page size.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(value: &str) -> bigdecimal::BigDecimal {
        value.parse().unwrap()
    }

    #[test]
    fn test_create_request_missing_fields_deserialize_as_absent() {
        let request: CreateOrderRequest =
            serde_json::from_str(r#"{"preTaxAmount": 3}"#).unwrap();

        assert_eq!(request.customer_id, "");
        assert_eq!(request.pre_tax_amount, Some(dec("3")));
        assert_eq!(request.post_tax_amount, None);
    }

    #[test]
    fn test_long_amounts_are_not_rounded() {
        let request: CreateOrderRequest = serde_json::from_str(
            r#"{"customerId": "foo", "preTaxAmount": "0.123456789012345678901234567891", "postTaxAmount": "123456789012345678901234567890.5"}"#,
        )
        .unwrap();

        assert_eq!(
            request.pre_tax_amount.unwrap().to_plain_string(),
            "0.123456789012345678901234567891"
        );
        assert_eq!(
            request.post_tax_amount.unwrap().to_plain_string(),
            "123456789012345678901234567890.5"
        );
    }

    #[test]
    fn test_update_request_accepts_string_amounts() {
        let request: UpdateOrderRequest = serde_json::from_str(
            r#"{"customerId": "foo", "preTaxAmount": "4.10", "postTaxAmount": "10", "version": 1}"#,
        )
        .unwrap();

        assert_eq!(request.pre_tax_amount, Some(dec("4.10")));
        assert_eq!(request.version, Some(1));
    }

    #[test]
    fn test_into_update_carries_path_id() {
        let update = UpdateOrderRequest {
            customer_id: "foo".to_string(),
            pre_tax_amount: Some(dec("4")),
            post_tax_amount: Some(dec("10")),
            version: Some(2),
        }
        .into_update("order-1");

        assert_eq!(
            update,
            OrderUpdate::new("order-1", "foo", dec("4"), dec("10"), 2)
        );
    }

    #[test]
    fn test_list_query_builders() {
        assert_eq!(ListOrdersQuery::first_page().exclusive_start_key, None);

        let query = ListOrdersQuery::after("abc").with_limit(5);
        assert_eq!(query.exclusive_start_key.as_deref(), Some("abc"));
        assert_eq!(query.limit, Some(5));
    }
}
