use std::env;

use crate::storage::OrderStoreConfig;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Orders table name (default: "order_table")
    pub table_name: String,
    /// DynamoDB endpoint override, e.g. a local DynamoDB (default: unset)
    pub endpoint_url: Option<String>,
    /// AWS region for the SDK client (default: "us-east-1")
    pub region: String,
    /// Orders per list page (default: 10)
    pub page_size: u32,
    /// Create attempts before giving up on id collisions (default: 10)
    pub max_create_attempts: u32,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `TABLE_NAME` - Orders table name (default: "order_table")
    /// - `ENDPOINT_OVERRIDE` - DynamoDB endpoint URL (default: unset)
    /// - `AWS_REGION` - AWS region (default: "us-east-1")
    /// - `ORDER_PAGE_SIZE` - Orders per list page (default: 10)
    /// - `ORDER_CREATE_ATTEMPTS` - Id collision retry bound (default: 10)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Unparseable numbers fall back to their defaults; empty strings count
    /// as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| lookup(name).filter(|v| !v.is_empty());

        Self {
            table_name: var("TABLE_NAME").unwrap_or_else(|| "order_table".to_string()),
            endpoint_url: var("ENDPOINT_OVERRIDE"),
            region: var("AWS_REGION").unwrap_or_else(|| "us-east-1".to_string()),
            page_size: var("ORDER_PAGE_SIZE")
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            max_create_attempts: var("ORDER_CREATE_ATTEMPTS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        }
    }

    /// Settings for the order store.
    pub fn order_store_config(&self) -> OrderStoreConfig {
        OrderStoreConfig {
            page_size: self.page_size,
            max_create_attempts: self.max_create_attempts,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
