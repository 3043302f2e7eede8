use async_trait::async_trait;

use crate::order::{CreateOrderRequest, ListOrdersQuery, Order, OrderPage, OrderUpdate};

use super::Result;

/// Typed access to stored orders.
///
/// Every call is a single round trip to the backing store. Implementations
/// hold no mutable shared state, so one instance can serve many concurrent
/// callers; coordination happens through the store's conditional writes.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Creates the orders table. Fails with `TableAlreadyExists` if it is
    /// already there.
    async fn create_orders_table(&self) -> Result<()>;

    /// Creates an order with a freshly generated id and version 1.
    async fn create_order(&self, request: &CreateOrderRequest) -> Result<Order>;

    /// Gets an order by its id.
    async fn get_order(&self, order_id: &str) -> Result<Order>;

    /// Gets one page of orders in the store's scan order.
    async fn get_orders(&self, query: &ListOrdersQuery) -> Result<OrderPage>;

    /// Replaces the customer and amounts of an order whose stored version
    /// still equals `update.version`, returning the order at the next version.
    async fn update_order(&self, update: &OrderUpdate) -> Result<Order>;

    /// Deletes an order, returning its last stored state.
    async fn delete_order(&self, order_id: &str) -> Result<Order>;
}
