//! The order store: orders on top of an [`ItemStore`].
//!
//! Concurrency is optimistic. Every operation is one conditional request and
//! the store arbitrates between competing callers, so an `OrderStore` holds
//! nothing but its configuration and can be shared freely.

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use orderstore_core::order::{
    validate_create_request, validate_list_query, validate_update, CreateOrderRequest,
    ListOrdersQuery, Order, OrderPage, OrderUpdate,
};
use orderstore_core::storage::{OrderRepository, OrderStoreError, Result};

use super::codec::{
    cursor_to_start_key, decode_cursor, decode_item, decimal_value, integer_value, item_to_order,
    new_order_item, order_key,
};
use super::ids::{IdGenerator, UuidGenerator};
use super::item_store::{Condition, ItemStore, ItemStoreError, TableStatus, UpdateSpec};
use super::schema::{
    orders_table_spec, CUSTOMER_ID, ORDER_ID, POST_TAX_AMOUNT, PRE_TAX_AMOUNT, VERSION,
};

/// Default number of orders per page.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Default bound on create attempts when generated ids collide.
pub const DEFAULT_MAX_CREATE_ATTEMPTS: u32 = 10;

/// Immutable settings of an [`OrderStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderStoreConfig {
    /// Orders returned per list call when the query sets no limit.
    pub page_size: u32,
    /// Ids tried by create before giving up.
    pub max_create_attempts: u32,
}

impl Default for OrderStoreConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            max_create_attempts: DEFAULT_MAX_CREATE_ATTEMPTS,
        }
    }
}

impl OrderStoreConfig {
    fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(OrderStoreError::InvalidArgument(
                "page size must be at least 1".to_string(),
            ));
        }
        if self.max_create_attempts == 0 {
            return Err(OrderStoreError::InvalidArgument(
                "create attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Order repository backed by any [`ItemStore`].
pub struct OrderStore<S> {
    store: S,
    config: OrderStoreConfig,
    ids: Box<dyn IdGenerator>,
}

impl<S: ItemStore> OrderStore<S> {
    /// Creates an order store generating UUID v4 order ids.
    pub fn new(store: S, config: OrderStoreConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            store,
            config,
            ids: Box::new(UuidGenerator),
        })
    }

    /// Replaces the order id source.
    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    /// Name of the backing table.
    pub fn table_name(&self) -> &str {
        self.store.table_name()
    }

    /// The store configuration.
    pub fn config(&self) -> &OrderStoreConfig {
        &self.config
    }

    /// Status of the backing table, or `None` if it does not exist.
    pub async fn table_status(&self) -> Result<Option<TableStatus>> {
        self.store
            .describe_table()
            .await
            .map_err(|e| self.map_store_error(e))
    }

    /// Polls the table status until it is active.
    ///
    /// Returns `Ok(false)` if the table is still not active after
    /// `max_attempts` polls.
    pub async fn wait_for_table_active(&self, max_attempts: u32, delay: Duration) -> Result<bool> {
        for attempt in 1..=max_attempts {
            match self.table_status().await? {
                Some(TableStatus::Active) => return Ok(true),
                status => {
                    tracing::debug!(
                        table = self.table_name(),
                        attempt,
                        ?status,
                        "Waiting for table to become active"
                    );
                }
            }
            if attempt < max_attempts {
                tokio::time::sleep(delay).await;
            }
        }
        Ok(false)
    }

    /// Classifies faults every operation shares.
    fn map_store_error(&self, error: ItemStoreError) -> OrderStoreError {
        match error {
            ItemStoreError::ResourceNotFound => OrderStoreError::TableNotFound {
                table_name: self.table_name().to_string(),
            },
            other => OrderStoreError::StoreFailure(other.to_string()),
        }
    }
}

impl<S> std::fmt::Debug for OrderStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderStore")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<S: ItemStore> OrderRepository for OrderStore<S> {
    async fn create_orders_table(&self) -> Result<()> {
        tracing::debug!(table = self.table_name(), "Creating orders table");

        self.store
            .create_table(&orders_table_spec())
            .await
            .map_err(|e| match e {
                ItemStoreError::ResourceInUse => OrderStoreError::TableAlreadyExists {
                    table_name: self.table_name().to_string(),
                },
                other => self.map_store_error(other),
            })
    }

    async fn create_order(&self, request: &CreateOrderRequest) -> Result<Order> {
        let create = validate_create_request(request)?;
        let attempts = self.config.max_create_attempts;

        for attempt in 1..=attempts {
            let order_id = self.ids.next_id();
            let item = new_order_item(&order_id, &create);

            match self
                .store
                .put_item(item.clone(), Some(Condition::AttributeNotExists(ORDER_ID.into())))
                .await
            {
                Ok(()) => {
                    tracing::debug!(%order_id, attempt, "Created order");
                    return item_to_order(&item);
                }
                Err(ItemStoreError::ConditionalCheckFailed) => {
                    tracing::warn!(%order_id, attempt, "Generated order id collided, retrying");
                }
                Err(e) => return Err(self.map_store_error(e)),
            }
        }

        Err(OrderStoreError::IdAllocationExhausted { attempts })
    }

    async fn get_order(&self, order_id: &str) -> Result<Order> {
        if order_id.is_empty() {
            return Err(OrderStoreError::InvalidArgument(
                "orderId was null or empty".to_string(),
            ));
        }
        tracing::debug!(%order_id, "Getting order");

        let item = self
            .store
            .get_item(order_key(order_id))
            .await
            .map_err(|e| self.map_store_error(e))?;

        decode_item(item.as_ref())?.ok_or_else(|| OrderStoreError::OrderNotFound {
            order_id: order_id.to_string(),
        })
    }

    async fn get_orders(&self, query: &ListOrdersQuery) -> Result<OrderPage> {
        let limit = validate_list_query(query, self.config.page_size)?;
        let start_key = cursor_to_start_key(query.exclusive_start_key.as_deref());
        tracing::debug!(limit, start = ?query.exclusive_start_key, "Scanning orders");

        let page = self
            .store
            .scan(limit, start_key)
            .await
            .map_err(|e| self.map_store_error(e))?;

        let orders = page
            .items
            .iter()
            .map(item_to_order)
            .collect::<Result<Vec<_>>>()?;
        let last_evaluated_key = decode_cursor(page.last_evaluated_key.as_ref())?;

        Ok(OrderPage {
            orders,
            last_evaluated_key,
        })
    }

    async fn update_order(&self, update: &OrderUpdate) -> Result<Order> {
        let update = validate_update(update)?;
        tracing::debug!(order_id = %update.order_id, version = update.version, "Updating order");

        let changes = UpdateSpec::default()
            .set(CUSTOMER_ID, AttributeValue::S(update.customer_id.clone()))
            .set(PRE_TAX_AMOUNT, decimal_value(&update.pre_tax_amount))
            .set(POST_TAX_AMOUNT, decimal_value(&update.post_tax_amount))
            .add(VERSION, 1);
        let condition = Condition::All(vec![
            Condition::AttributeExists(ORDER_ID.into()),
            Condition::Equals(VERSION.into(), integer_value(update.version)),
        ]);

        let updated = self
            .store
            .update_item(order_key(&update.order_id), changes, Some(condition))
            .await
            .map_err(|e| match e {
                ItemStoreError::ConditionalCheckFailed => OrderStoreError::StaleVersion {
                    order_id: update.order_id.clone(),
                },
                other => self.map_store_error(other),
            })?;

        decode_item(updated.as_ref())?.ok_or_else(|| {
            OrderStoreError::CorruptRecord("updated item was unexpectedly empty".to_string())
        })
    }

    async fn delete_order(&self, order_id: &str) -> Result<Order> {
        if order_id.is_empty() {
            return Err(OrderStoreError::InvalidArgument(
                "orderId was null or empty".to_string(),
            ));
        }
        tracing::debug!(%order_id, "Deleting order");

        let deleted = self
            .store
            .delete_item(
                order_key(order_id),
                Some(Condition::AttributeExists(ORDER_ID.into())),
            )
            .await
            .map_err(|e| match e {
                ItemStoreError::ConditionalCheckFailed => OrderStoreError::ConcurrentDelete {
                    order_id: order_id.to_string(),
                },
                other => self.map_store_error(other),
            })?;

        decode_item(deleted.as_ref())?.ok_or_else(|| {
            OrderStoreError::CorruptRecord("deleted item was unexpectedly empty".to_string())
        })
    }
}
