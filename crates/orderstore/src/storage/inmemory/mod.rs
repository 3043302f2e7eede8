//! In-memory item store for testing.
//!
//! This module provides an [`ItemStore`](super::ItemStore) that keeps a single
//! table in a `BTreeMap` wrapped in `Arc<RwLock<_>>`. It honors conditional
//! writes, scan limits and exclusive start keys the way DynamoDB does, so the
//! order store can be exercised end to end without AWS.
//!
//! # Example
//!
//! ```rust,ignore
//! use orderstore::storage::inmemory::InMemoryItemStore;
//!
//! let store = InMemoryItemStore::with_orders_table("order_table");
//! // Hand `store` to an OrderStore...
//! ```

mod store;

pub use store::InMemoryItemStore;
