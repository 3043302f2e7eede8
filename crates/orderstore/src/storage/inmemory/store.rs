//! In-memory item store implementation.

use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::Arc;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use tokio::sync::RwLock;

use crate::storage::schema::orders_table_spec;
use crate::storage::{
    Condition, Item, ItemStore, ItemStoreError, ScanPage, TableSpec, TableStatus, UpdateSpec,
};

/// A table held in memory, ordered by key.
#[derive(Debug, Default)]
struct Table {
    key_attribute: String,
    items: BTreeMap<String, Item>,
}

/// In-memory storage backend for testing.
///
/// `None` in the table slot means the table does not exist, so missing-table
/// behavior can be tested too. Data is lost when the store is dropped.
#[derive(Debug, Clone)]
pub struct InMemoryItemStore {
    table_name: String,
    table: Arc<RwLock<Option<Table>>>,
}

impl InMemoryItemStore {
    /// Creates a store whose table does not exist yet.
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            table: Arc::new(RwLock::new(None)),
        }
    }

    /// Creates a store with an empty orders table already in place.
    pub fn with_orders_table(table_name: impl Into<String>) -> Self {
        let spec = orders_table_spec();
        Self {
            table_name: table_name.into(),
            table: Arc::new(RwLock::new(Some(Table {
                key_attribute: spec.partition_key.name,
                items: BTreeMap::new(),
            }))),
        }
    }

    /// Writes an item as-is, skipping every check. Used to plant records the
    /// order store would never write.
    pub async fn insert_raw(&self, key: impl Into<String>, item: Item) {
        if let Some(table) = self.table.write().await.as_mut() {
            table.items.insert(key.into(), item);
        }
    }

    /// Number of items currently stored.
    pub async fn len(&self) -> usize {
        self.table
            .read()
            .await
            .as_ref()
            .map_or(0, |table| table.items.len())
    }

    /// Returns true if the table is missing or holds no items.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Table {
    fn key_of(&self, item: &Item) -> Result<String, ItemStoreError> {
        item.get(&self.key_attribute)
            .and_then(|value| value.as_s().ok())
            .filter(|key| !key.is_empty())
            .cloned()
            .ok_or_else(|| {
                ItemStoreError::Service(format!(
                    "ValidationException: missing or invalid key attribute {}",
                    self.key_attribute
                ))
            })
    }

    fn key_item(&self, key: &str) -> Item {
        Item::from([(self.key_attribute.clone(), AttributeValue::S(key.to_string()))])
    }
}

/// Evaluates a condition against the current item (if any).
fn evaluate(condition: &Condition, current: Option<&Item>) -> bool {
    match condition {
        Condition::AttributeExists(name) => current.is_some_and(|item| item.contains_key(name)),
        Condition::AttributeNotExists(name) => !current.is_some_and(|item| item.contains_key(name)),
        Condition::Equals(name, expected) => {
            current.and_then(|item| item.get(name)) == Some(expected)
        }
        Condition::All(conditions) => conditions.iter().all(|inner| evaluate(inner, current)),
    }
}

fn check(condition: Option<&Condition>, current: Option<&Item>) -> Result<(), ItemStoreError> {
    match condition {
        Some(condition) if !evaluate(condition, current) => {
            Err(ItemStoreError::ConditionalCheckFailed)
        }
        _ => Ok(()),
    }
}

fn add_to_number(
    current: Option<&AttributeValue>,
    name: &str,
    delta: i64,
) -> Result<AttributeValue, ItemStoreError> {
    let base = match current {
        None => 0,
        Some(AttributeValue::N(text)) => text.parse::<i64>().map_err(|_| {
            ItemStoreError::Service(format!("ValidationException: {name} is not an integer"))
        })?,
        Some(_) => {
            return Err(ItemStoreError::Service(format!(
                "ValidationException: ADD requires {name} to be a number"
            )))
        }
    };
    let sum = base.checked_add(delta).ok_or_else(|| {
        ItemStoreError::Service(format!("ValidationException: {name} overflowed"))
    })?;
    Ok(AttributeValue::N(sum.to_string()))
}

#[async_trait]
impl ItemStore for InMemoryItemStore {
    fn table_name(&self) -> &str {
        &self.table_name
    }

    async fn get_item(&self, key: Item) -> Result<Option<Item>, ItemStoreError> {
        let guard = self.table.read().await;
        let table = guard.as_ref().ok_or(ItemStoreError::ResourceNotFound)?;
        let key = table.key_of(&key)?;
        Ok(table.items.get(&key).cloned())
    }

    async fn put_item(
        &self,
        item: Item,
        condition: Option<Condition>,
    ) -> Result<(), ItemStoreError> {
        let mut guard = self.table.write().await;
        let table = guard.as_mut().ok_or(ItemStoreError::ResourceNotFound)?;
        let key = table.key_of(&item)?;

        check(condition.as_ref(), table.items.get(&key))?;
        table.items.insert(key, item);
        Ok(())
    }

    async fn update_item(
        &self,
        key: Item,
        update: UpdateSpec,
        condition: Option<Condition>,
    ) -> Result<Option<Item>, ItemStoreError> {
        let mut guard = self.table.write().await;
        let table = guard.as_mut().ok_or(ItemStoreError::ResourceNotFound)?;
        let key = table.key_of(&key)?;

        check(condition.as_ref(), table.items.get(&key))?;

        // Updating a missing item creates it, as DynamoDB does.
        let mut item = table
            .items
            .get(&key)
            .cloned()
            .unwrap_or_else(|| table.key_item(&key));
        for (name, value) in update.set {
            item.insert(name, value);
        }
        for (name, delta) in update.add {
            let value = add_to_number(item.get(&name), &name, delta)?;
            item.insert(name, value);
        }

        table.items.insert(key, item.clone());
        Ok(Some(item))
    }

    async fn delete_item(
        &self,
        key: Item,
        condition: Option<Condition>,
    ) -> Result<Option<Item>, ItemStoreError> {
        let mut guard = self.table.write().await;
        let table = guard.as_mut().ok_or(ItemStoreError::ResourceNotFound)?;
        let key = table.key_of(&key)?;

        check(condition.as_ref(), table.items.get(&key))?;
        Ok(table.items.remove(&key))
    }

    async fn scan(
        &self,
        limit: u32,
        exclusive_start_key: Option<Item>,
    ) -> Result<ScanPage, ItemStoreError> {
        if limit == 0 {
            return Err(ItemStoreError::Service(
                "ValidationException: limit must be at least 1".to_string(),
            ));
        }

        let guard = self.table.read().await;
        let table = guard.as_ref().ok_or(ItemStoreError::ResourceNotFound)?;
        let lower = match &exclusive_start_key {
            Some(start) => Bound::Excluded(table.key_of(start)?),
            None => Bound::Unbounded,
        };

        let page: Vec<(&String, &Item)> = table
            .items
            .range((lower, Bound::Unbounded))
            .take(limit as usize)
            .collect();

        // Like DynamoDB, a scan that stopped because it hit the limit reports
        // a last key even when nothing follows it.
        let last_evaluated_key = if page.len() == limit as usize {
            page.last().map(|(key, _)| table.key_item(key))
        } else {
            None
        };

        Ok(ScanPage {
            items: page.into_iter().map(|(_, item)| item.clone()).collect(),
            last_evaluated_key,
        })
    }

    async fn create_table(&self, spec: &TableSpec) -> Result<(), ItemStoreError> {
        let mut guard = self.table.write().await;
        if guard.is_some() {
            return Err(ItemStoreError::ResourceInUse);
        }
        *guard = Some(Table {
            key_attribute: spec.partition_key.name.clone(),
            items: BTreeMap::new(),
        });
        Ok(())
    }

    async fn describe_table(&self) -> Result<Option<TableStatus>, ItemStoreError> {
        Ok(self
            .table
            .read()
            .await
            .as_ref()
            .map(|_| TableStatus::Active))
    }
}
