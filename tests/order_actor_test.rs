use chrono::NaiveDate;
use farm_market::clients::ActorClient;
use farm_market::model::{LineItem, OrderStatus, Product};
use farm_market::order_actor::OrderError;
use farm_market::store::mock::MockStore;
use farm_market::store::{DocumentStore, StoreError, StorePath};
use rust_decimal::Decimal;
use std::sync::Arc;

fn line(id: &str, price: i64, quantity: u32) -> LineItem {
    let mut item = LineItem::new(Product::new(id, id, Decimal::from(price), "Fruits"));
    item.quantity = quantity;
    item
}

fn may_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
}

/// Real Order actor with a scripted store.
#[tokio::test]
async fn test_order_actor_persists_through_the_store() {
    let store = MockStore::new();
    store.expect_write().return_ok();

    let (order_actor, orders) = farm_market::order_actor::new();
    let handle = tokio::spawn(order_actor.run(Arc::new(store.clone())));

    let order = orders
        .place_order("customer1", vec![line("mango", 90, 2), line("guava", 15, 1)], may_day())
        .await
        .unwrap();
    assert_eq!(order.total, Decimal::from(195));
    assert_eq!(order.status, OrderStatus::Processing);
    assert_eq!(order.created_on, may_day());

    let path = StorePath::order("customer1", order.id.0);
    let stored = store.memory().read(&path).await.unwrap().unwrap();
    assert_eq!(stored["accountId"], "customer1");
    assert_eq!(stored["items"].as_array().unwrap().len(), 2);

    let fetched = orders.get(order.id).await.unwrap();
    assert_eq!(fetched, Some(order));
    store.verify();

    drop(orders);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_unpersisted_order_is_never_listed() {
    let store = MockStore::new();
    store
        .expect_write()
        .return_err(StoreError::Request("offline".to_string()));

    let (order_actor, orders) = farm_market::order_actor::new();
    let handle = tokio::spawn(order_actor.run(Arc::new(store.clone())));

    let err = orders
        .place_order("customer1", vec![line("mango", 90, 1)], may_day())
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::Collaborator(_)));
    assert!(orders.orders_for("customer1").await.unwrap().is_empty());

    drop(orders);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_empty_order_is_rejected_without_a_write() {
    let store = MockStore::new();
    let (order_actor, orders) = farm_market::order_actor::new();
    let handle = tokio::spawn(order_actor.run(Arc::new(store.clone())));

    let err = orders
        .place_order("customer1", Vec::new(), may_day())
        .await
        .unwrap_err();
    assert_eq!(err, OrderError::Validation("Your cart is empty".to_string()));
    store.verify();

    drop(orders);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_out_of_range_total_is_rejected_without_a_write() {
    let store = MockStore::new();
    let (order_actor, orders) = farm_market::order_actor::new();
    let handle = tokio::spawn(order_actor.run(Arc::new(store.clone())));

    let mut huge = line("mango", 1, 2);
    huge.unit_price = Decimal::MAX;
    let err = orders
        .place_order("customer1", vec![huge], may_day())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        OrderError::Validation("Order total is out of range".to_string())
    );

    // The order book keeps serving after the rejection.
    let again = orders
        .place_order("customer1", Vec::new(), may_day())
        .await
        .unwrap_err();
    assert!(matches!(again, OrderError::Validation(_)));
    store.verify();

    drop(orders);
    handle.await.unwrap();
}
