//! Order records on a single DynamoDB table.
//!
//! [`storage::OrderStore`] is the data-access layer: it turns typed order
//! requests into conditional writes against an [`storage::ItemStore`],
//! enforces optimistic concurrency through the order version, and decodes
//! stored items strictly. [`cli`] is a thin command-line adapter over it.

pub mod cli;
pub mod config;
pub mod storage;
