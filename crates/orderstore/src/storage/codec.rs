//! Conversion between stored items and orders.
//!
//! Pure functions, testable without a store. Decoding is strict: a stored
//! order must carry every attribute with the expected type, because only the
//! order store writes these items. Anything else is a corrupt record.

use std::collections::HashMap;
use std::str::FromStr;

use aws_sdk_dynamodb::types::AttributeValue;
use bigdecimal::BigDecimal;
use orderstore_core::order::{Order, ValidatedCreate};
use orderstore_core::storage::{OrderStoreError, Result};

use super::item_store::Item;
use super::schema::{CUSTOMER_ID, ORDER_ID, POST_TAX_AMOUNT, PRE_TAX_AMOUNT, VERSION};

/// Version every new order starts at.
pub const INITIAL_VERSION: i64 = 1;

// ============================================================================
// Encoding
// ============================================================================

/// Builds the primary key of an order.
pub fn order_key(order_id: &str) -> Item {
    HashMap::from([(ORDER_ID.to_string(), AttributeValue::S(order_id.to_string()))])
}

/// Builds the item for a brand new order at version 1.
pub fn new_order_item(order_id: &str, create: &ValidatedCreate) -> Item {
    order_to_item(&Order {
        order_id: order_id.to_string(),
        customer_id: create.customer_id.clone(),
        pre_tax_amount: create.pre_tax_amount.clone(),
        post_tax_amount: create.post_tax_amount.clone(),
        version: INITIAL_VERSION,
    })
}

/// Converts an order to an item.
pub fn order_to_item(order: &Order) -> Item {
    let mut item = order_key(&order.order_id);
    item.insert(
        CUSTOMER_ID.to_string(),
        AttributeValue::S(order.customer_id.clone()),
    );
    item.insert(
        PRE_TAX_AMOUNT.to_string(),
        decimal_value(&order.pre_tax_amount),
    );
    item.insert(
        POST_TAX_AMOUNT.to_string(),
        decimal_value(&order.post_tax_amount),
    );
    item.insert(VERSION.to_string(), integer_value(order.version));
    item
}

/// Numeric attribute holding the exact text of a decimal (no rounding).
pub fn decimal_value(value: &BigDecimal) -> AttributeValue {
    AttributeValue::N(value.to_plain_string())
}

/// Numeric attribute holding an integer.
pub fn integer_value(value: i64) -> AttributeValue {
    AttributeValue::N(value.to_string())
}

/// Turns a caller's cursor into a scan start key. An empty cursor means
/// "start from the beginning".
pub fn cursor_to_start_key(cursor: Option<&str>) -> Option<Item> {
    cursor.filter(|id| !id.is_empty()).map(order_key)
}

// ============================================================================
// Decoding
// ============================================================================

/// Decodes an optional item. An absent or empty item is `None`, not an error.
pub fn decode_item(item: Option<&Item>) -> Result<Option<Order>> {
    match item {
        Some(item) if !item.is_empty() => item_to_order(item).map(Some),
        _ => Ok(None),
    }
}

/// Converts an item to an order, failing on any missing or mistyped attribute.
pub fn item_to_order(item: &Item) -> Result<Order> {
    Ok(Order {
        order_id: get_string(item, ORDER_ID)?,
        customer_id: get_string(item, CUSTOMER_ID)?,
        pre_tax_amount: get_decimal(item, PRE_TAX_AMOUNT)?,
        post_tax_amount: get_decimal(item, POST_TAX_AMOUNT)?,
        version: get_integer(item, VERSION)?,
    })
}

/// Decodes the cursor from a scan's last evaluated key.
///
/// No key (or an empty one) means the scan is finished. A key that is present
/// but lacks a non-empty `orderId` string fails, so a listing never silently
/// stops early or resumes from a bad position.
pub fn decode_cursor(last_evaluated_key: Option<&Item>) -> Result<Option<String>> {
    match last_evaluated_key {
        Some(key) if !key.is_empty() => get_string(key, ORDER_ID)
            .map(Some)
            .map_err(|_| {
                OrderStoreError::CorruptRecord(format!(
                    "{ORDER_ID} did not exist or was not a non-empty string in the lastEvaluatedKey"
                ))
            }),
        _ => Ok(None),
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Get a required, non-empty string attribute.
fn get_string(item: &Item, key: &str) -> Result<String> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .filter(|s| !s.is_empty())
        .cloned()
        .ok_or_else(|| corrupt(key, "a non-empty String"))
}

/// Get a required number attribute as an exact decimal. Any number of
/// digits and scientific notation are accepted.
fn get_decimal(item: &Item, key: &str) -> Result<BigDecimal> {
    let text = get_number_text(item, key)?;
    BigDecimal::from_str(text).map_err(|_| corrupt(key, "a Number"))
}

/// Get a required number attribute as a 64-bit integer.
fn get_integer(item: &Item, key: &str) -> Result<i64> {
    let text = get_number_text(item, key)?;
    i64::from_str(text).map_err(|_| corrupt(key, "a 64-bit integer Number"))
}

fn get_number_text<'a>(item: &'a Item, key: &str) -> Result<&'a str> {
    item.get(key)
        .and_then(|v| v.as_n().ok())
        .map(String::as_str)
        .ok_or_else(|| corrupt(key, "a Number"))
}

fn corrupt(key: &str, expected: &str) -> OrderStoreError {
    OrderStoreError::CorruptRecord(format!(
        "item did not have a {key} attribute or it was not {expected}"
    ))
}
