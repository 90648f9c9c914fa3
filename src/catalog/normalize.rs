//! One-time ingestion of raw store records into [`Product`]s.
//!
//! Store records are loosely typed: prices arrive as numbers or strings, any
//! field may be missing. Defaults are substituted here and nowhere else.

use crate::model::{Category, Product};
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use tracing::{debug, warn};

fn text(record: &Map<String, Value>, key: &str) -> Option<String> {
    record
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Price as a non-negative decimal; anything unreadable is 0.
fn price(value: Option<&Value>) -> Decimal {
    let parsed = match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .map(Decimal::from)
            .or_else(|| n.as_f64().and_then(|f| Decimal::try_from(f).ok())),
        Some(Value::String(s)) => s.trim().parse::<Decimal>().ok(),
        _ => None,
    };
    parsed.unwrap_or(Decimal::ZERO).max(Decimal::ZERO)
}

fn stock(value: Option<&Value>) -> u32 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    parsed
        .map(|n| u32::try_from(n).unwrap_or(u32::MAX))
        .unwrap_or(Product::DEFAULT_STOCK)
}

fn rating(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|r| r.is_finite())
    .unwrap_or(Product::DEFAULT_RATING)
}

/// Builds a product from one raw record keyed by `id`.
pub fn normalize_product(id: &str, raw: &Value) -> Option<Product> {
    let Some(record) = raw.as_object() else {
        warn!(product_id = id, "Skipping non-object catalog record");
        return None;
    };

    let name = text(record, "name").unwrap_or_else(|| Product::DEFAULT_NAME.to_string());
    let category = text(record, "category")
        .map(Category::from)
        .unwrap_or(Category::Uncategorized);
    let image = text(record, "image").unwrap_or_else(|| Product::DEFAULT_IMAGE.to_string());
    let images = record
        .get("images")
        .and_then(Value::as_array)
        .map(|list| {
            list.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .filter(|list| !list.is_empty())
        .unwrap_or_else(|| vec![image.clone()]);

    let mut product = Product::new(id, name, price(record.get("price")), category);
    product.tamil_name = text(record, "tamilName");
    product.hindi_name = text(record, "hindiName");
    product.weight = text(record, "weight").unwrap_or(product.weight);
    product.description = text(record, "description").unwrap_or(product.description);
    product.image = image;
    product.images = images;
    product.stock = stock(record.get("stock"));
    product.rating = rating(record.get("rating"));
    Some(product)
}

/// Normalizes a whole catalog snapshot, in key order.
///
/// The realtime store returns integer-keyed collections as arrays; those are
/// accepted too, with holes skipped.
pub fn normalize_catalog(snapshot: Option<&Value>) -> Vec<Product> {
    let products: Vec<Product> = match snapshot {
        Some(Value::Object(map)) => map
            .iter()
            .filter_map(|(id, raw)| normalize_product(id, raw))
            .collect(),
        Some(Value::Array(list)) => list
            .iter()
            .enumerate()
            .filter(|(_, raw)| !raw.is_null())
            .filter_map(|(index, raw)| normalize_product(&index.to_string(), raw))
            .collect(),
        Some(other) => {
            warn!(kind = ?other, "Catalog snapshot is not a collection");
            Vec::new()
        }
        None => Vec::new(),
    };
    debug!(count = products.len(), "Catalog normalized");
    products
}
