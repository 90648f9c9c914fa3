use farm_market::catalog::{category_options, CatalogFeed, CatalogQuery, CatalogState, SortMode};
use farm_market::model::{Language, Product};
use farm_market::store::mock::MockStore;
use farm_market::store::{DocumentStore, MemoryStore, StoreError, StorePath};
use farm_market::view::{drain, NoticeLevel, Notices};
use rust_decimal::Decimal;
use serde_json::json;
use std::sync::Arc;

fn named(id: &str, name: &str, price: i64) -> Product {
    Product::new(id, name, Decimal::from(price), "Vegetables")
}

#[test]
fn test_search_matches_active_language_name() {
    let catalog = vec![named("1", "Tomatoes", 40), named("2", "Carrots", 30)];

    let visible = CatalogQuery::new(Language::English)
        .with_text("tom")
        .visible(&catalog);
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].name, "Tomatoes");

    let upper = CatalogQuery::new(Language::English)
        .with_text("  TOM ")
        .visible(&catalog);
    assert_eq!(upper, visible);
}

#[test]
fn test_price_descending_sort() {
    let catalog = vec![named("1", "Cheap", 10), named("2", "Dear", 50)];
    let prices: Vec<Decimal> = CatalogQuery::new(Language::English)
        .with_sort(SortMode::PriceDescending)
        .visible(&catalog)
        .into_iter()
        .map(|p| p.price)
        .collect();
    assert_eq!(prices, vec![Decimal::from(50), Decimal::from(10)]);
}

#[test]
fn test_missing_localized_name_hides_product() {
    let catalog = vec![
        named("1", "Tomatoes", 40).with_localized_names(Some("தக்காளி"), None::<String>),
        named("2", "Carrots", 30),
    ];
    let visible = CatalogQuery::new(Language::Tamil).visible(&catalog);
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, "1");
}

#[test]
fn test_category_filter_and_options() {
    let catalog = vec![
        named("1", "Tomatoes", 40),
        Product::new("2", "Mango", Decimal::from(90), "Fruits"),
        Product::new("3", "Chilli Powder", Decimal::from(20), "Spices"),
    ];
    assert_eq!(
        category_options(&catalog),
        vec!["All", "Vegetables", "Fruits", "Spices"]
    );

    let fruits = CatalogQuery::new(Language::English)
        .with_category("Fruits")
        .visible(&catalog);
    assert_eq!(fruits.len(), 1);

    let spices = CatalogQuery::new(Language::English)
        .with_category("Spices")
        .visible(&catalog);
    assert_eq!(spices[0].id, "3");

    let all = CatalogQuery::new(Language::English)
        .with_category("All")
        .visible(&catalog);
    assert_eq!(all.len(), 3);
}

#[tokio::test]
async fn test_feed_normalizes_and_follows_writes() {
    let store = MemoryStore::with_root(json!({
        "products": {
            "p1": {"name": "Tomatoes", "price": "40", "category": "Vegetables"},
            "p2": {"price": -5}
        }
    }));
    let (notices, mut rx) = Notices::channel();
    let feed = CatalogFeed::start(Arc::new(store.clone()), StorePath::products(), notices);

    let CatalogState::Ready(products) = feed.settled().await else {
        panic!("catalog did not load");
    };
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].price, Decimal::from(40));
    assert_eq!(products[1].name, Product::DEFAULT_NAME);
    assert_eq!(products[1].price, Decimal::ZERO);
    assert_eq!(products[1].stock, Product::DEFAULT_STOCK);
    assert!(drain(&mut rx).is_empty());

    let mut states = feed.watch();
    store
        .write(
            &StorePath::products().child("p3"),
            json!({"name": "Okra", "price": 25, "stock": 0}),
        )
        .await
        .unwrap();
    let state = states
        .wait_for(|state| state.products().len() == 3)
        .await
        .unwrap()
        .clone();
    let okra = &state.products()[2];
    assert_eq!(okra.name, "Okra");
    assert!(!okra.in_stock());
}

#[tokio::test]
async fn test_empty_catalog_warns() {
    let (notices, mut rx) = Notices::channel();
    let feed = CatalogFeed::start(
        Arc::new(MemoryStore::new()),
        StorePath::products(),
        notices,
    );

    assert_eq!(feed.settled().await, CatalogState::Ready(Vec::new()));
    assert!(!feed.is_blocked());

    let received = drain(&mut rx);
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].level, NoticeLevel::Warning);
}

#[tokio::test]
async fn test_failed_subscription_blocks_until_reload() {
    let store = MockStore::with_root(json!({
        "products": {"p1": {"name": "Tomatoes", "price": 40}}
    }));
    store.fail_next_subscribe(StoreError::Request("offline".to_string()));

    let (notices, mut rx) = Notices::channel();
    let mut feed = CatalogFeed::start(Arc::new(store), StorePath::products(), notices);

    assert!(matches!(feed.settled().await, CatalogState::Failed(_)));
    assert!(feed.is_blocked());
    assert!(feed
        .visible(&CatalogQuery::new(Language::English))
        .is_empty());
    let received = drain(&mut rx);
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].level, NoticeLevel::Error);

    feed.reload();
    let state = feed.settled().await;
    assert_eq!(state.products().len(), 1);
    assert!(!feed.is_blocked());
}
