use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// A stored order.
///
/// Every field is always populated once the order exists. `version` starts at
/// 1 and grows by exactly one on each successful update; it is the only
/// optimistic-concurrency token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: String,
    pub customer_id: String,
    pub pre_tax_amount: BigDecimal,
    pub post_tax_amount: BigDecimal,
    pub version: i64,
}

/// One page of a forward-only scan over all orders.
///
/// `last_evaluated_key` is the cursor for the next page: the id of the last
/// scanned order, or `None` once the scan reached the end of the table.
/// Orders appear in the store's scan order, which is not creation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPage {
    pub orders: Vec<Order>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_evaluated_key: Option<String>,
}

impl OrderPage {
    /// Returns true if no further page follows this one.
    pub fn is_last(&self) -> bool {
        self.last_evaluated_key.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(value: &str) -> bigdecimal::BigDecimal {
        value.parse().unwrap()
    }

    fn sample_order() -> Order {
        Order {
            order_id: "4a1f7a2e-3a4b-4f5e-9c2d-1b2c3d4e5f60".to_string(),
            customer_id: "foo".to_string(),
            pre_tax_amount: dec("3"),
            post_tax_amount: dec("10.25"),
            version: 1,
        }
    }

    #[test]
    fn test_order_serializes_with_camel_case_names() {
        let json = serde_json::to_value(sample_order()).unwrap();

        assert_eq!(json["orderId"], "4a1f7a2e-3a4b-4f5e-9c2d-1b2c3d4e5f60");
        assert_eq!(json["customerId"], "foo");
        assert_eq!(json["preTaxAmount"], "3");
        assert_eq!(json["postTaxAmount"], "10.25");
        assert_eq!(json["version"], 1);
    }

    #[test]
    fn test_page_omits_absent_cursor() {
        let page = OrderPage {
            orders: vec![sample_order()],
            last_evaluated_key: None,
        };
        let json = serde_json::to_value(&page).unwrap();

        assert!(json.get("lastEvaluatedKey").is_none());
        assert!(page.is_last());
    }

    #[test]
    fn test_page_with_cursor_is_not_last() {
        let page = OrderPage {
            orders: Vec::new(),
            last_evaluated_key: Some("abc".to_string()),
        };
        assert!(!page.is_last());
    }
}
