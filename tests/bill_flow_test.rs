use farm_market::bill_actor::{BillError, BillKind};
use farm_market::lifecycle::MarketSystem;
use farm_market::model::{
    BillPhase, Category, OrderStatus, Product, MAX_QUANTITY, MAX_UNIT_PRICE,
};
use farm_market::store::mock::MockStore;
use farm_market::store::{DocumentStore, MemoryStore, StoreError, StorePath};
use rust_decimal::Decimal;
use std::sync::Arc;

fn product(id: &str, name: &str, price: i64, category: &str) -> Product {
    Product::new(id, name, Decimal::from(price), category)
}

/// Select A and B, commit, edit A's quantity, remove B.
#[tokio::test]
async fn test_farmer_bill_totals_follow_edits() {
    let system = MarketSystem::new(Arc::new(MemoryStore::new()));
    let bills = &system.bill_client;
    let a = product("a", "Carrots", 50, "Vegetables");
    let b = product("b", "Apples", 30, "Fruits");

    let bill = bills.open("farmer123", BillKind::FarmerBill).await.unwrap();
    assert!(bills.toggle_selection(bill, a.clone()).await.unwrap());
    assert!(bills.toggle_selection(bill, b.clone()).await.unwrap());

    let summary = bills.commit_selection(bill).await.unwrap();
    assert_eq!(summary.lines.len(), 2);
    assert_eq!(summary.grand_total, Decimal::from(80));
    assert_eq!(summary.phase, BillPhase::Building);
    assert!(summary.selection.is_empty());

    let summary = bills.update_quantity(bill, "a", 3).await.unwrap();
    assert_eq!(summary.line("a").unwrap().total(), Decimal::from(150));
    assert_eq!(summary.grand_total, Decimal::from(180));
    let categories: Vec<&Category> = summary.buckets.iter().map(|b| &b.category).collect();
    assert_eq!(categories, vec![&Category::Vegetables, &Category::Fruits]);

    let summary = bills.remove_line_item(bill, "b").await.unwrap();
    assert_eq!(summary.grand_total, Decimal::from(150));
    assert_eq!(summary.buckets.len(), 1);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_text_inputs_clamp_to_floors() {
    let system = MarketSystem::new(Arc::new(MemoryStore::new()));
    let bills = &system.bill_client;
    let bill = bills.open("farmer123", BillKind::FarmerBill).await.unwrap();
    bills
        .toggle_selection(bill, product("a", "Carrots", 50, "Vegetables"))
        .await
        .unwrap();
    bills.commit_selection(bill).await.unwrap();

    let summary = bills.update_quantity_input(bill, "a", "-2").await.unwrap();
    assert_eq!(summary.line("a").unwrap().quantity, 1);

    let summary = bills.update_quantity_input(bill, "a", "lots").await.unwrap();
    assert_eq!(summary.line("a").unwrap().quantity, 1);

    let summary = bills.update_price_input(bill, "a", "-10").await.unwrap();
    assert_eq!(summary.line("a").unwrap().unit_price, Decimal::ZERO);
    assert_eq!(summary.grand_total, Decimal::ZERO);

    let summary = bills.update_price_input(bill, "a", "12.5").await.unwrap();
    assert_eq!(summary.grand_total, "12.5".parse::<Decimal>().unwrap());

    system.shutdown().await.unwrap();
}

/// Extreme text inputs clamp; the actor keeps serving every bill.
#[tokio::test]
async fn test_extreme_inputs_clamp_without_stopping_the_actor() {
    let system = MarketSystem::new(Arc::new(MemoryStore::new()));
    let bills = &system.bill_client;
    let bill = bills.open("farmer123", BillKind::FarmerBill).await.unwrap();
    bills
        .toggle_selection(bill, product("a", "Carrots", 50, "Vegetables"))
        .await
        .unwrap();
    bills.commit_selection(bill).await.unwrap();

    let summary = bills
        .update_price_input(bill, "a", "79228162514264337593543950335")
        .await
        .unwrap();
    assert_eq!(summary.line("a").unwrap().unit_price, MAX_UNIT_PRICE);

    let summary = bills.update_quantity_input(bill, "a", "2").await.unwrap();
    assert_eq!(summary.grand_total, MAX_UNIT_PRICE * Decimal::from(2));

    let summary = bills
        .update_quantity_input(bill, "a", "4294967295000")
        .await
        .unwrap();
    assert_eq!(summary.line("a").unwrap().quantity, MAX_QUANTITY);
    assert_eq!(
        summary.grand_total,
        MAX_UNIT_PRICE * Decimal::from(MAX_QUANTITY)
    );

    let other = bills.open("farmer456", BillKind::FarmerBill).await.unwrap();
    assert_eq!(bills.summary(other).await.unwrap().phase, BillPhase::Empty);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_text_inputs_read_the_leading_number() {
    let system = MarketSystem::new(Arc::new(MemoryStore::new()));
    let bills = &system.bill_client;
    let bill = bills.open("farmer123", BillKind::FarmerBill).await.unwrap();
    bills
        .toggle_selection(bill, product("a", "Carrots", 50, "Vegetables"))
        .await
        .unwrap();
    bills.commit_selection(bill).await.unwrap();

    let summary = bills.update_quantity_input(bill, "a", "3kg").await.unwrap();
    assert_eq!(summary.line("a").unwrap().quantity, 3);

    let summary = bills.update_price_input(bill, "a", "12abc").await.unwrap();
    assert_eq!(summary.grand_total, Decimal::from(36));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_commit_twice_increments_quantity() {
    let system = MarketSystem::new(Arc::new(MemoryStore::new()));
    let bills = &system.bill_client;
    let bill = bills.open("farmer123", BillKind::FarmerBill).await.unwrap();
    let a = product("a", "Carrots", 50, "Vegetables");

    bills.toggle_selection(bill, a.clone()).await.unwrap();
    bills.commit_selection(bill).await.unwrap();
    bills.toggle_selection(bill, a).await.unwrap();
    let summary = bills.commit_selection(bill).await.unwrap();

    assert_eq!(summary.lines.len(), 1);
    assert_eq!(summary.line("a").unwrap().quantity, 2);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_commit_with_empty_selection_is_rejected() {
    let system = MarketSystem::new(Arc::new(MemoryStore::new()));
    let bills = &system.bill_client;
    let bill = bills.open("farmer123", BillKind::FarmerBill).await.unwrap();

    let err = bills.commit_selection(bill).await.unwrap_err();
    assert_eq!(
        err,
        BillError::Validation("Please select at least one product".to_string())
    );

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_empty_submit_writes_nothing() {
    let store = MockStore::new();
    let system = MarketSystem::new(Arc::new(store.clone()));
    let bills = &system.bill_client;
    let bill = bills.open("farmer123", BillKind::FarmerBill).await.unwrap();

    let err = bills.submit(bill).await.unwrap_err();
    assert_eq!(
        err,
        BillError::Validation("Bill is empty. Add products before submitting.".to_string())
    );

    let summary = bills.summary(bill).await.unwrap();
    assert_eq!(summary.phase, BillPhase::Empty);
    assert!(store.writes().is_empty());
    store.verify();

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_failed_submit_keeps_the_bill() {
    let store = MockStore::new();
    store
        .expect_write()
        .return_err(StoreError::Request("offline".to_string()));
    store.expect_write().return_ok();

    let system = MarketSystem::new(Arc::new(store.clone()));
    let bills = &system.bill_client;
    let bill = bills.open("farmer123", BillKind::FarmerBill).await.unwrap();
    bills
        .toggle_selection(bill, product("a", "Carrots", 50, "Vegetables"))
        .await
        .unwrap();
    bills.commit_selection(bill).await.unwrap();
    bills.update_quantity(bill, "a", 2).await.unwrap();

    let err = bills.submit(bill).await.unwrap_err();
    assert!(matches!(err, BillError::Collaborator(_)));

    let summary = bills.summary(bill).await.unwrap();
    assert_eq!(summary.phase, BillPhase::Building);
    assert_eq!(summary.line("a").unwrap().quantity, 2);
    assert_eq!(summary.grand_total, Decimal::from(100));

    // Retry by hand succeeds and clears.
    let receipt = bills.submit(bill).await.unwrap();
    assert_eq!(
        &receipt.path.segments()[..3],
        &["accounts", "farmer123", "bills"]
    );
    assert_eq!(receipt.record.products.len(), 1);
    assert_eq!(receipt.record.products[0].qty, 2);

    let summary = bills.summary(bill).await.unwrap();
    assert_eq!(summary.phase, BillPhase::Empty);
    assert!(summary.lines.is_empty());

    let stored = store.memory().read(&receipt.path).await.unwrap().unwrap();
    assert_eq!(stored["accountId"], "farmer123");
    assert_eq!(stored["products"][0]["total"], 100.0);
    store.verify();

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_checkout_places_processing_order() {
    let store = MemoryStore::new();
    let system = MarketSystem::new(Arc::new(store.clone()));
    let bills = &system.bill_client;

    let cart = bills.open("customer1", BillKind::CustomerCart).await.unwrap();
    bills
        .add_product(cart, product("a", "Carrots", 50, "Vegetables"))
        .await
        .unwrap();
    bills
        .add_product(cart, product("a", "Carrots", 50, "Vegetables"))
        .await
        .unwrap();
    bills
        .add_product(cart, product("b", "Apples", 30, "Fruits"))
        .await
        .unwrap();

    let order = bills.checkout(cart).await.unwrap();
    assert_eq!(order.status, OrderStatus::Processing);
    assert_eq!(order.total, Decimal::from(130));
    assert_eq!(order.items.len(), 2);

    let summary = bills.summary(cart).await.unwrap();
    assert!(summary.lines.is_empty());

    let orders = system.order_client.orders_for("customer1").await.unwrap();
    assert_eq!(orders, vec![order.clone()]);
    assert!(system.order_client.orders_for("someone-else").await.unwrap().is_empty());

    let path = StorePath::order("customer1", order.id.0);
    let stored = store.read(&path).await.unwrap().unwrap();
    assert_eq!(stored["status"], "Processing");

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_checkout_of_empty_cart_is_rejected() {
    let system = MarketSystem::new(Arc::new(MemoryStore::new()));
    let bills = &system.bill_client;
    let cart = bills.open("customer1", BillKind::CustomerCart).await.unwrap();

    let err = bills.checkout(cart).await.unwrap_err();
    assert_eq!(err, BillError::Validation("Your cart is empty".to_string()));
    assert!(system.order_client.orders_for("customer1").await.unwrap().is_empty());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_failed_order_write_keeps_the_cart() {
    let store = MockStore::new();
    store
        .expect_write()
        .return_err(StoreError::Rejected("permission denied".to_string()));

    let system = MarketSystem::new(Arc::new(store.clone()));
    let bills = &system.bill_client;
    let cart = bills.open("customer1", BillKind::CustomerCart).await.unwrap();
    bills
        .add_product(cart, product("a", "Carrots", 50, "Vegetables"))
        .await
        .unwrap();

    let err = bills.checkout(cart).await.unwrap_err();
    assert!(matches!(err, BillError::Collaborator(_)));

    let summary = bills.summary(cart).await.unwrap();
    assert_eq!(summary.phase, BillPhase::Building);
    assert_eq!(summary.lines.len(), 1);
    assert!(system.order_client.orders_for("customer1").await.unwrap().is_empty());
    store.verify();

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_operations_are_bound_to_bill_kind() {
    let system = MarketSystem::new(Arc::new(MemoryStore::new()));
    let bills = &system.bill_client;
    let bill = bills.open("farmer123", BillKind::FarmerBill).await.unwrap();
    let cart = bills.open("customer1", BillKind::CustomerCart).await.unwrap();

    let err = bills.checkout(bill).await.unwrap_err();
    assert!(matches!(err, BillError::WrongKind { action: "checkout", .. }));

    let err = bills.submit(cart).await.unwrap_err();
    assert!(matches!(err, BillError::WrongKind { action: "submit", .. }));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_unknown_bill_is_not_found() {
    let system = MarketSystem::new(Arc::new(MemoryStore::new()));
    let err = system
        .bill_client
        .summary(farm_market::bill_actor::BillId(99))
        .await
        .unwrap_err();
    assert_eq!(err, BillError::NotFound("bill_99".to_string()));

    system.shutdown().await.unwrap();
}
