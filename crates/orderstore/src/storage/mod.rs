//! Storage for orders.
//!
//! [`OrderStore`] implements [`orderstore_core::storage::OrderRepository`] on
//! top of any [`ItemStore`]. Two item stores are provided:
//!
//! - `dynamodb`: the production backend using `aws-sdk-dynamodb`
//! - `inmemory` (feature `inmemory`, on by default): an in-process table
//!   with the same conditional-write semantics, for tests

pub mod codec;
pub mod dynamodb;
mod ids;
#[cfg(feature = "inmemory")]
pub mod inmemory;
mod item_store;
mod repository;
#[cfg(all(test, feature = "inmemory"))]
mod scenarios;
pub mod schema;

pub use ids::{IdGenerator, UuidGenerator};
pub use item_store::{
    Condition, Item, ItemStore, ItemStoreError, KeyAttribute, ScalarType, ScanPage, TableSpec,
    TableStatus, UpdateSpec,
};
pub use repository::{OrderStore, OrderStoreConfig};
