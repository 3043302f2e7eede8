//! DynamoDB item store.
//!
//! Implements [`super::ItemStore`] with `aws-sdk-dynamodb`. Conditions and
//! updates are rendered to DynamoDB expressions with placeholder names and
//! values, and SDK errors are folded into [`super::ItemStoreError`].

mod client;
mod error;
mod expression;
mod store;

pub use client::create_client;
pub use store::DynamoDbItemStore;
