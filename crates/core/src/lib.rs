//! Functional core for the orderstore project.
//!
//! Pure data types, validation and the storage contract. Nothing in this
//! crate performs I/O; the DynamoDB-backed implementation lives in the
//! `orderstore` crate.

pub mod order;
pub mod storage;
