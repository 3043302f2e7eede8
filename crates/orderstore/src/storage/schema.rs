//! Orders table layout (pure data, no I/O).

use super::item_store::{KeyAttribute, ScalarType, TableSpec};

pub const ORDER_ID: &str = "orderId";
pub const CUSTOMER_ID: &str = "customerId";
pub const PRE_TAX_AMOUNT: &str = "preTaxAmount";
pub const POST_TAX_AMOUNT: &str = "postTaxAmount";
pub const VERSION: &str = "version";

/// Returns the canonical orders table definition: hash key `orderId` (S)
/// with 5 read and 5 write capacity units.
pub fn orders_table_spec() -> TableSpec {
    TableSpec {
        partition_key: KeyAttribute {
            name: ORDER_ID.to_string(),
            scalar_type: ScalarType::String,
        },
        read_capacity_units: 5,
        write_capacity_units: 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orders_table_is_keyed_by_order_id() {
        let spec = orders_table_spec();
        assert_eq!(spec.partition_key.name, "orderId");
        assert_eq!(spec.partition_key.scalar_type, ScalarType::String);
        assert_eq!(spec.read_capacity_units, 5);
        assert_eq!(spec.write_capacity_units, 5);
    }
}
