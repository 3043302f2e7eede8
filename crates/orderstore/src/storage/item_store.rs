//! The key-value store the order store sits on.
//!
//! [`ItemStore`] is a single-table view of a DynamoDB-like store: keyed
//! items of loosely typed attributes, writes guarded by simple conditions,
//! and a bounded unordered scan. Conditions and updates are described as data
//! so each backend can render or evaluate them in its own way.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use thiserror::Error;

/// A stored item: attribute name to value.
pub type Item = HashMap<String, AttributeValue>;

/// Faults surfaced by an item store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ItemStoreError {
    /// The table does not exist.
    #[error("Requested resource not found")]
    ResourceNotFound,
    /// The write's condition did not hold; nothing was written.
    #[error("The conditional request failed")]
    ConditionalCheckFailed,
    /// The table is already being created or already exists.
    #[error("Resource in use")]
    ResourceInUse,
    /// Anything else: throttling, connectivity, malformed requests.
    #[error("{0}")]
    Service(String),
}

/// A predicate over an item's current state.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// The item exists and carries this attribute.
    AttributeExists(String),
    /// The item is absent or lacks this attribute.
    AttributeNotExists(String),
    /// The attribute is present and equal to the value.
    Equals(String, AttributeValue),
    /// Every inner condition holds.
    All(Vec<Condition>),
}

/// Field-level changes applied by an update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateSpec {
    /// Attributes replaced outright.
    pub set: Vec<(String, AttributeValue)>,
    /// Numeric attributes incremented in place (missing counts as zero).
    pub add: Vec<(String, i64)>,
}

impl UpdateSpec {
    /// Replace an attribute.
    pub fn set(mut self, name: impl Into<String>, value: AttributeValue) -> Self {
        self.set.push((name.into(), value));
        self
    }

    /// Increment a numeric attribute.
    pub fn add(mut self, name: impl Into<String>, delta: i64) -> Self {
        self.add.push((name.into(), delta));
        self
    }
}

/// One bounded scan result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanPage {
    pub items: Vec<Item>,
    /// Key to resume after; absent once the scan reached the end.
    pub last_evaluated_key: Option<Item>,
}

/// Scalar type of a key attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    String,
}

/// A key attribute definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyAttribute {
    pub name: String,
    pub scalar_type: ScalarType,
}

/// Definition of a single-key table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSpec {
    pub partition_key: KeyAttribute,
    pub read_capacity_units: i64,
    pub write_capacity_units: i64,
}

/// Lifecycle state of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStatus {
    Creating,
    Active,
    Updating,
    Deleting,
    Unknown,
}

/// A single table in a key-value store.
///
/// Every method is one request to the store. Writes that carry a
/// [`Condition`] either apply atomically or fail with
/// [`ItemStoreError::ConditionalCheckFailed`] and change nothing.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Name of the table this store operates on.
    fn table_name(&self) -> &str;

    /// Gets an item by its key.
    async fn get_item(&self, key: Item) -> Result<Option<Item>, ItemStoreError>;

    /// Writes a whole item, replacing any item with the same key.
    async fn put_item(
        &self,
        item: Item,
        condition: Option<Condition>,
    ) -> Result<(), ItemStoreError>;

    /// Applies field-level changes and returns the item as it is afterwards.
    async fn update_item(
        &self,
        key: Item,
        update: UpdateSpec,
        condition: Option<Condition>,
    ) -> Result<Option<Item>, ItemStoreError>;

    /// Removes an item and returns it as it was before.
    async fn delete_item(
        &self,
        key: Item,
        condition: Option<Condition>,
    ) -> Result<Option<Item>, ItemStoreError>;

    /// Reads up to `limit` items in store order, strictly after
    /// `exclusive_start_key` when given.
    async fn scan(
        &self,
        limit: u32,
        exclusive_start_key: Option<Item>,
    ) -> Result<ScanPage, ItemStoreError>;

    /// Creates the table.
    async fn create_table(&self, spec: &TableSpec) -> Result<(), ItemStoreError>;

    /// Returns the table status, or `None` if the table does not exist.
    async fn describe_table(&self) -> Result<Option<TableStatus>, ItemStoreError>;
}
