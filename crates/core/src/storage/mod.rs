mod error;
mod http_mapping;
mod traits;

pub use error::{ErrorKind, OrderStoreError, Result};
pub use http_mapping::error_to_status_code;
pub use traits::OrderRepository;
