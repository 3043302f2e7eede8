mod requests;
mod types;
mod validation;

pub use requests::{CreateOrderRequest, ListOrdersQuery, OrderUpdate, UpdateOrderRequest};
pub use types::{Order, OrderPage};
pub use validation::{
    validate_create_request, validate_list_query, validate_update, ValidatedCreate,
    ValidatedUpdate,
};
