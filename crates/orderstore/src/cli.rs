//! Command-line adapter over the order store.
//!
//! Parses a command, runs it against an [`OrderStore`] and hands back a
//! serializable result. Failures become an [`ErrorMessage`] carrying the
//! HTTP-style status an upstream adapter would answer with.

use std::time::Duration;

use bigdecimal::BigDecimal;
use orderstore_core::order::{CreateOrderRequest, ListOrdersQuery, Order, OrderPage, OrderUpdate};
use orderstore_core::storage::{error_to_status_code, OrderRepository, OrderStoreError, Result};
use serde::Serialize;

use crate::config::Config;
use crate::storage::{ItemStore, OrderStore};

/// Polls made by `create-table --wait` before giving up.
const TABLE_WAIT_ATTEMPTS: u32 = 60;

/// Delay between `create-table --wait` polls.
const TABLE_WAIT_DELAY: Duration = Duration::from_secs(2);

/// Order store - Manage orders kept in DynamoDB
#[derive(Debug, clap::Parser)]
#[command(name = "orderstore")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Orders table name.
    #[arg(long, global = true, env = "TABLE_NAME")]
    pub table_name: Option<String>,

    /// DynamoDB endpoint URL (e.g., http://localhost:8000).
    #[arg(long, global = true, env = "ENDPOINT_OVERRIDE")]
    pub endpoint_url: Option<String>,

    /// AWS region.
    #[arg(long, global = true, env = "AWS_REGION")]
    pub region: Option<String>,

    /// Orders per list page.
    #[arg(long, global = true, env = "ORDER_PAGE_SIZE")]
    pub page_size: Option<u32>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Applies the command-line overrides on top of `config`.
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(table_name) = &self.table_name {
            config.table_name = table_name.clone();
        }
        if let Some(endpoint_url) = &self.endpoint_url {
            config.endpoint_url = Some(endpoint_url.clone());
        }
        if let Some(region) = &self.region {
            config.region = region.clone();
        }
        if let Some(page_size) = self.page_size {
            config.page_size = page_size;
        }
        config
    }
}

/// Available order store commands.
#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Create the orders table.
    CreateTable {
        /// Wait until the table is active.
        #[arg(long)]
        wait: bool,
    },

    /// Create an order.
    Create {
        #[arg(long)]
        customer_id: String,
        #[arg(long)]
        pre_tax: BigDecimal,
        #[arg(long)]
        post_tax: BigDecimal,
    },

    /// Get an order by id.
    Get { order_id: String },

    /// Replace an order's customer and amounts.
    Update {
        order_id: String,
        #[arg(long)]
        customer_id: String,
        #[arg(long)]
        pre_tax: BigDecimal,
        #[arg(long)]
        post_tax: BigDecimal,
        /// The version the order is expected to be at.
        #[arg(long)]
        version: i64,
    },

    /// Delete an order.
    Delete { order_id: String },

    /// List orders one page at a time.
    List {
        /// Resume after this order id.
        #[arg(long, value_name = "ORDER_ID")]
        exclusive_start_key: Option<String>,

        /// Maximum orders in the page.
        #[arg(long)]
        limit: Option<u32>,

        /// Follow the cursor until every order has been listed.
        #[arg(long)]
        all: bool,
    },
}

/// Result of a successful command.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Output {
    Message { message: String },
    Order(Order),
    Page(OrderPage),
}

/// Error body printed for a failed command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorMessage {
    pub message: String,
    pub status_code: u16,
}

impl From<&OrderStoreError> for ErrorMessage {
    fn from(error: &OrderStoreError) -> Self {
        Self {
            message: error.to_string(),
            status_code: error_to_status_code(error),
        }
    }
}

/// Runs one command against the order store.
pub async fn execute<S: ItemStore>(store: &OrderStore<S>, command: Command) -> Result<Output> {
    match command {
        Command::CreateTable { wait } => {
            store.create_orders_table().await?;
            if wait && !store
                .wait_for_table_active(TABLE_WAIT_ATTEMPTS, TABLE_WAIT_DELAY)
                .await?
            {
                return Ok(Output::Message {
                    message: "Orders table created but not yet active".to_string(),
                });
            }
            Ok(Output::Message {
                message: "Created orders table".to_string(),
            })
        }
        Command::Create {
            customer_id,
            pre_tax,
            post_tax,
        } => {
            let request = CreateOrderRequest::new(customer_id, pre_tax, post_tax);
            store.create_order(&request).await.map(Output::Order)
        }
        Command::Get { order_id } => store.get_order(&order_id).await.map(Output::Order),
        Command::Update {
            order_id,
            customer_id,
            pre_tax,
            post_tax,
            version,
        } => {
            let update = OrderUpdate::new(order_id, customer_id, pre_tax, post_tax, version);
            store.update_order(&update).await.map(Output::Order)
        }
        Command::Delete { order_id } => store.delete_order(&order_id).await.map(Output::Order),
        Command::List {
            exclusive_start_key,
            limit,
            all,
        } => {
            let mut query = ListOrdersQuery {
                exclusive_start_key,
                limit,
            };
            if !all {
                return store.get_orders(&query).await.map(Output::Page);
            }

            let mut orders = Vec::new();
            loop {
                let page = store.get_orders(&query).await?;
                orders.extend(page.orders);
                match page.last_evaluated_key {
                    Some(cursor) => query.exclusive_start_key = Some(cursor),
                    None => break,
                }
            }
            Ok(Output::Page(OrderPage {
                orders,
                last_evaluated_key: None,
            }))
        }
    }
}
