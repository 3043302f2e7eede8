//! Pure functions for mapping order store errors to HTTP status codes.
//!
//! Upstream adapters own the transport; this only fixes the convention so
//! every adapter answers the same way.

use super::{ErrorKind, OrderStoreError};

/// Maps an [`OrderStoreError`] to an HTTP status code by its kind:
///
/// - `InvalidArgument` -> 400 (Bad Request)
/// - `NotFound` -> 404 (Not Found)
/// - `Conflict` -> 409 (Conflict)
/// - `Unavailable` -> 503 (Service Unavailable)
/// - `CorruptRecord` -> 500 (Internal Server Error)
///
/// # Examples
///
/// ```
/// use orderstore_core::storage::{error_to_status_code, OrderStoreError};
///
/// let error = OrderStoreError::OrderNotFound {
///     order_id: "abc-123".to_string(),
/// };
/// assert_eq!(error_to_status_code(&error), 404);
/// ```
pub fn error_to_status_code(error: &OrderStoreError) -> u16 {
    match error.kind() {
        ErrorKind::InvalidArgument => 400,
        ErrorKind::NotFound => 404,
        ErrorKind::Conflict => 409,
        ErrorKind::Unavailable => 503,
        ErrorKind::CorruptRecord => 500,
    }
}
