//! # Farm Market demo
//!
//! Walks the two marketplace flows end to end:
//! 1. A farmer selects products, adjusts the bill and submits it.
//! 2. A customer fills a cart, checks out and lists their orders.
//!
//! Without `MARKET_STORE_URL` everything runs against an in-memory store
//! seeded with a small catalog.

use farm_market::bill_actor::BillKind;
use farm_market::catalog::{CatalogFeed, CatalogQuery, CatalogState, SortMode};
use farm_market::config::MarketConfig;
use farm_market::lifecycle::{setup_tracing, MarketSystem};
use farm_market::services::currency::{CurrencyPanel, CurrencyState, ExchangeRateClient};
use farm_market::services::feeds::{Article, NewsClient, RotatingFeed};
use farm_market::store::{MemoryStore, RestStore, StoreHandle, StorePath};
use farm_market::view::{drain, Notices};
use rust_decimal::Decimal;
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info, warn, Instrument};

fn demo_catalog() -> serde_json::Value {
    json!({
        "products": {
            "p1": {
                "name": "Tomatoes", "tamilName": "தக்காளி", "hindiName": "टमाटर",
                "price": 40, "category": "Vegetables", "weight": "1 kg", "rating": 4.5
            },
            "p2": {
                "name": "Basmati Rice", "tamilName": "பாஸ்மதி அரிசி", "hindiName": "बासमती चावल",
                "price": "100", "category": "Seeds", "weight": "1 kg", "stock": 25
            },
            "p3": {
                "name": "Cow Milk", "tamilName": "பசும்பால்", "hindiName": "गाय का दूध",
                "price": 55.5, "category": "Dairy Products", "weight": "1 L", "rating": 4.8
            },
            "p4": {
                "name": "Organic Compost", "price": 250, "category": "Fertilizers", "stock": 0
            }
        }
    })
}

fn open_store(config: &MarketConfig) -> StoreHandle {
    match &config.store_url {
        Some(url) => {
            info!(url = %url, "Using REST document store");
            Arc::new(RestStore::new(
                url.clone(),
                config.store_auth.clone(),
                config.store_poll_interval,
            ))
        }
        None => {
            info!("Using in-memory document store with demo catalog");
            Arc::new(MemoryStore::with_root(demo_catalog()))
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    dotenvy::dotenv().ok();
    setup_tracing();

    let config = MarketConfig::from_env().map_err(|e| e.to_string())?;
    info!(account_id = %config.account_id, language = %config.language, "Starting farm market");

    let store = open_store(&config);
    let (notices, mut notice_rx) = Notices::channel();
    let system = MarketSystem::new(store.clone());

    // Catalog
    let catalog = CatalogFeed::start(store.clone(), StorePath::products(), notices.clone());
    let products = match catalog.settled().await {
        CatalogState::Ready(products) => products,
        CatalogState::Failed(reason) => {
            error!(%reason, "Catalog unavailable");
            system.shutdown().await?;
            return Err(reason);
        }
        CatalogState::Loading => Vec::new(),
    };

    let query = CatalogQuery::new(config.language).with_sort(SortMode::PriceDescending);
    for product in catalog.visible(&query) {
        info!(
            product_id = %product.id,
            name = product.display_name(config.language).unwrap_or(&product.name),
            price = %product.price,
            in_stock = product.in_stock(),
            "Catalog entry"
        );
    }

    // Farmer bill
    let span = tracing::info_span!("farmer_bill");
    async {
        let bills = &system.bill_client;
        let bill = bills
            .open(&config.account_id, BillKind::FarmerBill)
            .await
            .map_err(|e| e.to_string())?;

        for product in products.iter().take(2) {
            bills
                .toggle_selection(bill, product.clone())
                .await
                .map_err(|e| e.to_string())?;
        }
        let summary = bills.commit_selection(bill).await.map_err(|e| e.to_string())?;
        info!(lines = summary.lines.len(), total = %summary.grand_total, "Selection committed");

        if let Some(first) = products.first() {
            bills
                .update_quantity_input(bill, &first.id, "3")
                .await
                .map_err(|e| e.to_string())?;
        }

        match bills.submit(bill).await {
            Ok(receipt) => {
                info!(path = %receipt.path, lines = receipt.record.products.len(), "Bill submitted");
                notices.success("Bill submitted successfully!");
            }
            Err(e) => {
                warn!(error = %e, "Bill submission failed");
                notices.failure(e.kind(), e.to_string());
            }
        }
        Ok::<(), String>(())
    }
    .instrument(span)
    .await?;

    // Customer cart
    let span = tracing::info_span!("customer_cart");
    async {
        let bills = &system.bill_client;
        let cart = bills
            .open("customer1", BillKind::CustomerCart)
            .await
            .map_err(|e| e.to_string())?;
        for product in products.iter().filter(|p| p.in_stock()) {
            bills
                .add_product(cart, product.clone())
                .await
                .map_err(|e| e.to_string())?;
        }

        match bills.checkout(cart).await {
            Ok(order) => {
                info!(order_id = %order.id, total = %order.total, status = %order.status, "Order placed");
                notices.success("Order placed successfully!");
            }
            Err(e) => notices.failure(e.kind(), e.to_string()),
        }

        let orders = system
            .order_client
            .orders_for("customer1")
            .await
            .map_err(|e| e.to_string())?;
        info!(count = orders.len(), "My orders");
        Ok::<(), String>(())
    }
    .instrument(span)
    .await?;

    // Dashboard
    let currency = CurrencyPanel::new(Arc::new(ExchangeRateClient::new()), notices.clone());
    currency.convert(Decimal::from(100), "INR", "USD").await;
    if let CurrencyState::Converted { result, .. } = currency.state() {
        info!(%result, "100 INR in USD");
    }

    let news = config.api_keys.news.clone().map(|key| {
        RotatingFeed::<Article>::start(
            Arc::new(NewsClient::new(key)),
            Article::placeholder(),
            config.feed_rotation,
        )
    });
    if let Some(feed) = &news {
        let mut headline = feed.watch();
        if headline.changed().await.is_ok() {
            info!(title = %feed.current().title, "Farming news");
        }
    }

    for notice in drain(&mut notice_rx) {
        info!(level = ?notice.level, message = %notice.message, "Notice");
    }

    drop(news);
    drop(catalog);
    system.shutdown().await?;

    info!("Farm market demo completed");
    Ok(())
}
