use thiserror::Error;

/// Broad classification of an [`OrderStoreError`].
///
/// Upstream adapters decide retry and status behavior from the kind alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A caller-supplied value violates a precondition. Not retried.
    InvalidArgument,
    /// No order exists for the given id. Not retried.
    NotFound,
    /// A competing actor (or the id space) made a conditional write fail.
    Conflict,
    /// The table is missing or the store could not be reached.
    Unavailable,
    /// A stored record or a store response broke an internal invariant.
    CorruptRecord,
}

/// Errors that can occur during order store operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OrderStoreError {
    #[error("{0}")]
    InvalidArgument(String),
    #[error("Order {order_id} does not exist")]
    OrderNotFound { order_id: String },
    #[error("Unable to generate unique order id after {attempts} tries")]
    IdAllocationExhausted { attempts: u32 },
    #[error("Update rejected for order {order_id}: stale version or missing record")]
    StaleVersion { order_id: String },
    #[error("Delete rejected for order {order_id}: a competing request changed the order")]
    ConcurrentDelete { order_id: String },
    #[error("Order table {table_name} already exists")]
    TableAlreadyExists { table_name: String },
    #[error("Order table {table_name} does not exist")]
    TableNotFound { table_name: String },
    #[error("Store request failed: {0}")]
    StoreFailure(String),
    #[error("Corrupt record: {0}")]
    CorruptRecord(String),
}

impl OrderStoreError {
    /// Returns the kind this error is classified as.
    pub fn kind(&self) -> ErrorKind {
        match self {
            OrderStoreError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            OrderStoreError::OrderNotFound { .. } => ErrorKind::NotFound,
            OrderStoreError::IdAllocationExhausted { .. }
            | OrderStoreError::StaleVersion { .. }
            | OrderStoreError::ConcurrentDelete { .. }
            | OrderStoreError::TableAlreadyExists { .. } => ErrorKind::Conflict,
            OrderStoreError::TableNotFound { .. } | OrderStoreError::StoreFailure(_) => {
                ErrorKind::Unavailable
            }
            OrderStoreError::CorruptRecord(_) => ErrorKind::CorruptRecord,
        }
    }
}

/// Result type for order store operations.
pub type Result<T> = std::result::Result<T, OrderStoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_not_found_display() {
        let error = OrderStoreError::OrderNotFound {
            order_id: "abc-123".to_string(),
        };
        assert_eq!(error.to_string(), "Order abc-123 does not exist");
        assert_eq!(error.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_invalid_argument_display_is_bare_message() {
        let error = OrderStoreError::InvalidArgument("version was null".to_string());
        assert_eq!(error.to_string(), "version was null");
        assert_eq!(error.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_id_allocation_exhausted_display() {
        let error = OrderStoreError::IdAllocationExhausted { attempts: 10 };
        assert_eq!(
            error.to_string(),
            "Unable to generate unique order id after 10 tries"
        );
    }

    #[test]
    fn test_conflict_variants_share_kind() {
        let conflicts = [
            OrderStoreError::IdAllocationExhausted { attempts: 10 },
            OrderStoreError::StaleVersion {
                order_id: "a".to_string(),
            },
            OrderStoreError::ConcurrentDelete {
                order_id: "a".to_string(),
            },
            OrderStoreError::TableAlreadyExists {
                table_name: "order_table".to_string(),
            },
        ];
        for error in conflicts {
            assert_eq!(error.kind(), ErrorKind::Conflict, "{error}");
        }
    }

    #[test]
    fn test_unavailable_variants() {
        let error = OrderStoreError::TableNotFound {
            table_name: "order_table".to_string(),
        };
        assert_eq!(error.to_string(), "Order table order_table does not exist");
        assert_eq!(error.kind(), ErrorKind::Unavailable);

        let error = OrderStoreError::StoreFailure("connection reset".to_string());
        assert_eq!(error.to_string(), "Store request failed: connection reset");
        assert_eq!(error.kind(), ErrorKind::Unavailable);
    }

    #[test]
    fn test_corrupt_record_display() {
        let error = OrderStoreError::CorruptRecord("missing version".to_string());
        assert_eq!(error.to_string(), "Corrupt record: missing version");
        assert_eq!(error.kind(), ErrorKind::CorruptRecord);
    }
}
