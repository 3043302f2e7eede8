//! End-to-end order scenarios against the in-memory item store.

use std::collections::HashSet;
use std::sync::Arc;

use bigdecimal::BigDecimal;
use orderstore_core::order::{CreateOrderRequest, ListOrdersQuery, Order, OrderUpdate};
use orderstore_core::storage::{ErrorKind, OrderRepository, OrderStoreError};

use super::inmemory::InMemoryItemStore;
use super::{OrderStore, OrderStoreConfig};

fn dec(value: &str) -> BigDecimal {
    value.parse().unwrap()
}

fn store_with_table() -> OrderStore<InMemoryItemStore> {
    OrderStore::new(
        InMemoryItemStore::with_orders_table("order_table"),
        OrderStoreConfig::default(),
    )
    .unwrap()
}

async fn create_orders(store: &OrderStore<InMemoryItemStore>, count: usize) -> Vec<Order> {
    let mut orders = Vec::with_capacity(count);
    for i in 0..count {
        let request = CreateOrderRequest::new(format!("customer-{i}"), dec("3"), dec("10"));
        orders.push(store.create_order(&request).await.unwrap());
    }
    orders
}

#[tokio::test]
async fn test_create_read_update_scenario() {
    let store = store_with_table();

    let created = store
        .create_order(&CreateOrderRequest::new("foo", dec("3"), dec("10")))
        .await
        .unwrap();
    assert_eq!(created.version, 1);
    assert_eq!(created.customer_id, "foo");
    assert_eq!(created.pre_tax_amount, dec("3"));
    assert_eq!(created.post_tax_amount, dec("10"));

    let read = store.get_order(&created.order_id).await.unwrap();
    assert_eq!(read, created);

    let stale = OrderUpdate::new(&created.order_id, "foo", dec("4"), dec("10"), 2);
    let err = store.update_order(&stale).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);

    let current = OrderUpdate::new(&created.order_id, "foo", dec("4"), dec("10"), 1);
    let updated = store.update_order(&current).await.unwrap();
    assert_eq!(updated.version, 2);
    assert_eq!(updated.pre_tax_amount, dec("4"));
    assert_eq!(updated.order_id, created.order_id);
}

#[tokio::test]
async fn test_read_without_table_is_unavailable() {
    let store = OrderStore::new(
        InMemoryItemStore::new("order_table"),
        OrderStoreConfig::default(),
    )
    .unwrap();

    let err = store.get_order("anything").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Unavailable);
    assert_eq!(
        err,
        OrderStoreError::TableNotFound {
            table_name: "order_table".to_string()
        }
    );
}

#[tokio::test]
async fn test_read_unknown_id_is_not_found() {
    let store = store_with_table();

    let err = store.get_order("unknown").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_second_delete_is_a_conflict() {
    let store = store_with_table();
    let order = create_orders(&store, 1).await.remove(0);

    let deleted = store.delete_order(&order.order_id).await.unwrap();
    assert_eq!(deleted, order);

    let err = store.delete_order(&order.order_id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(
        store.get_order(&order.order_id).await.unwrap_err().kind(),
        ErrorKind::NotFound
    );
}

#[tokio::test]
async fn test_version_grows_by_one_per_update() {
    let store = store_with_table();
    let order = create_orders(&store, 1).await.remove(0);

    let mut versions = vec![order.version];
    for amount in 1..=5_i64 {
        let version = *versions.last().unwrap();
        let update = OrderUpdate::new(
            &order.order_id,
            "foo",
            BigDecimal::from(amount),
            dec("10"),
            version,
        );
        versions.push(store.update_order(&update).await.unwrap().version);
    }

    assert_eq!(versions, vec![1, 2, 3, 4, 5, 6]);
}

#[tokio::test]
async fn test_stale_update_never_mutates() {
    let store = store_with_table();
    let order = create_orders(&store, 1).await.remove(0);

    for version in [0, 2, 7, -1] {
        let update = OrderUpdate::new(&order.order_id, "bar", dec("99"), dec("99"), version);
        let err = store.update_order(&update).await.unwrap_err();
        assert!(matches!(err, OrderStoreError::StaleVersion { .. }));
    }

    assert_eq!(store.get_order(&order.order_id).await.unwrap(), order);
}

#[tokio::test]
async fn test_created_ids_are_unique() {
    let store = store_with_table();

    let orders = create_orders(&store, 50).await;

    let ids: HashSet<&str> = orders.iter().map(|o| o.order_id.as_str()).collect();
    assert_eq!(ids.len(), orders.len());
}

#[tokio::test]
async fn test_pagination_is_complete_for_every_page_size() {
    let store = store_with_table();
    let created = create_orders(&store, 7).await;
    let expected: HashSet<String> = created.into_iter().map(|o| o.order_id).collect();

    for page_size in 1..=8 {
        let mut seen = Vec::new();
        let mut query = ListOrdersQuery::first_page().with_limit(page_size);
        loop {
            let page = store.get_orders(&query).await.unwrap();
            assert!(page.orders.len() <= page_size as usize);
            seen.extend(page.orders.into_iter().map(|o| o.order_id));
            match page.last_evaluated_key {
                Some(cursor) => query = ListOrdersQuery::after(cursor).with_limit(page_size),
                None => break,
            }
        }

        let unique: HashSet<String> = seen.iter().cloned().collect();
        assert_eq!(unique.len(), seen.len(), "duplicates with page size {page_size}");
        assert_eq!(unique, expected, "omissions with page size {page_size}");
    }
}

#[tokio::test]
async fn test_concurrent_updates_with_same_version_admit_one_winner() {
    let store = Arc::new(store_with_table());
    let order = create_orders(&store, 1).await.remove(0);

    let mut handles = Vec::new();
    for i in 0..8_i64 {
        let store = store.clone();
        let order_id = order.order_id.clone();
        handles.push(tokio::spawn(async move {
            let amount = BigDecimal::from(i);
            let update = OrderUpdate::new(order_id, "foo", amount, dec("10"), 1);
            store.update_order(&update).await
        }));
    }

    let mut winners = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(updated) => {
                winners += 1;
                assert_eq!(updated.version, 2);
            }
            Err(err) => assert_eq!(err.kind(), ErrorKind::Conflict),
        }
    }
    assert_eq!(winners, 1);
}
