//! Argument validation for create and update.
//!
//! Checks run in a fixed order so the caller always hears about the first
//! actionable omission.

use bigdecimal::BigDecimal;

use crate::storage::{OrderStoreError, Result};

use super::requests::{CreateOrderRequest, ListOrdersQuery, OrderUpdate};

/// A create request whose required fields are known to be present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedCreate {
    pub customer_id: String,
    pub pre_tax_amount: BigDecimal,
    pub post_tax_amount: BigDecimal,
}

/// An update whose required fields are known to be present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedUpdate {
    pub order_id: String,
    pub customer_id: String,
    pub pre_tax_amount: BigDecimal,
    pub post_tax_amount: BigDecimal,
    pub version: i64,
}

/// Validates a create request: customerId, then preTaxAmount, then postTaxAmount.
pub fn validate_create_request(request: &CreateOrderRequest) -> Result<ValidatedCreate> {
    Ok(ValidatedCreate {
        customer_id: require_customer_id(&request.customer_id)?,
        pre_tax_amount: request
            .pre_tax_amount
            .clone()
            .ok_or_else(|| invalid("preTaxAmount was null"))?,
        post_tax_amount: request
            .post_tax_amount
            .clone()
            .ok_or_else(|| invalid("postTaxAmount was null"))?,
    })
}

/// Validates an update: orderId, customerId, preTaxAmount, postTaxAmount, version.
pub fn validate_update(update: &OrderUpdate) -> Result<ValidatedUpdate> {
    if update.order_id.is_empty() {
        return Err(invalid("orderId was null or empty"));
    }

    Ok(ValidatedUpdate {
        order_id: update.order_id.clone(),
        customer_id: require_customer_id(&update.customer_id)?,
        pre_tax_amount: update
            .pre_tax_amount
            .clone()
            .ok_or_else(|| invalid("preTaxAmount was null"))?,
        post_tax_amount: update
            .post_tax_amount
            .clone()
            .ok_or_else(|| invalid("postTaxAmount was null"))?,
        version: update.version.ok_or_else(|| invalid("version was null"))?,
    })
}

/// Resolves the page size for a list query, rejecting a zero limit.
pub fn validate_list_query(query: &ListOrdersQuery, default_page_size: u32) -> Result<u32> {
    match query.limit {
        Some(0) => Err(invalid("limit must be at least 1")),
        Some(limit) => Ok(limit),
        None => Ok(default_page_size),
    }
}

fn require_customer_id(customer_id: &str) -> Result<String> {
    if customer_id.is_empty() {
        return Err(invalid("customerId was null or empty"));
    }
    Ok(customer_id.to_string())
}

fn invalid(message: &str) -> OrderStoreError {
    OrderStoreError::InvalidArgument(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(value: &str) -> bigdecimal::BigDecimal {
        value.parse().unwrap()
    }

    fn full_update() -> OrderUpdate {
        OrderUpdate::new("order-1", "foo", dec("4"), dec("10"), 1)
    }

    fn message(err: OrderStoreError) -> String {
        match err {
            OrderStoreError::InvalidArgument(message) => message,
            other => panic!("expected InvalidArgument, got {other:?}"),
        }
    }

    #[test]
    fn test_create_request_valid() {
        let validated =
            validate_create_request(&CreateOrderRequest::new("foo", dec("3"), dec("10"))).unwrap();

        assert_eq!(validated.customer_id, "foo");
        assert_eq!(validated.pre_tax_amount, dec("3"));
        assert_eq!(validated.post_tax_amount, dec("10"));
    }

    #[test]
    fn test_create_request_reports_customer_id_first() {
        let err = validate_create_request(&CreateOrderRequest::default()).unwrap_err();
        assert_eq!(message(err), "customerId was null or empty");
    }

    #[test]
    fn test_create_request_missing_amounts() {
        let mut request = CreateOrderRequest::new("foo", dec("3"), dec("10"));
        request.pre_tax_amount = None;
        request.post_tax_amount = None;
        assert_eq!(
            message(validate_create_request(&request).unwrap_err()),
            "preTaxAmount was null"
        );

        request.pre_tax_amount = Some(dec("3"));
        assert_eq!(
            message(validate_create_request(&request).unwrap_err()),
            "postTaxAmount was null"
        );
    }

    #[test]
    fn test_update_valid() {
        let validated = validate_update(&full_update()).unwrap();
        assert_eq!(validated.order_id, "order-1");
        assert_eq!(validated.version, 1);
    }

    #[test]
    fn test_update_checks_fields_in_order() {
        let mut update = OrderUpdate::default();
        assert_eq!(
            message(validate_update(&update).unwrap_err()),
            "orderId was null or empty"
        );

        update.order_id = "order-1".to_string();
        assert_eq!(
            message(validate_update(&update).unwrap_err()),
            "customerId was null or empty"
        );

        update.customer_id = "foo".to_string();
        assert_eq!(
            message(validate_update(&update).unwrap_err()),
            "preTaxAmount was null"
        );

        update.pre_tax_amount = Some(dec("4"));
        assert_eq!(
            message(validate_update(&update).unwrap_err()),
            "postTaxAmount was null"
        );

        update.post_tax_amount = Some(dec("10"));
        assert_eq!(
            message(validate_update(&update).unwrap_err()),
            "version was null"
        );
    }

    #[test]
    fn test_list_query_page_size() {
        assert_eq!(validate_list_query(&ListOrdersQuery::first_page(), 10).unwrap(), 10);
        assert_eq!(
            validate_list_query(&ListOrdersQuery::first_page().with_limit(3), 10).unwrap(),
            3
        );
        assert!(validate_list_query(&ListOrdersQuery::first_page().with_limit(0), 10).is_err());
    }
}
