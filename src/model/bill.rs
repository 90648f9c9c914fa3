//! The line-item engine shared by farmer bills and customer carts.
//!
//! Invariants held by every method here:
//! - at most one line per product id
//! - 1 ≤ quantity ≤ [`MAX_QUANTITY`]
//! - 0 ≤ unit price ≤ [`MAX_UNIT_PRICE`], kept to two decimal places
//! - `grand_total()` equals the sum of `categorize()` subtotals

use super::{Category, Product};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Largest quantity a line can hold; larger inputs clamp to it.
pub const MAX_QUANTITY: u32 = 1_000_000;

/// Largest unit price a line can hold; larger inputs clamp to it.
pub const MAX_UNIT_PRICE: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

fn clamp_price(price: Decimal) -> Decimal {
    price.round_dp(2).clamp(Decimal::ZERO, MAX_UNIT_PRICE)
}

/// Sum of line totals, `None` if it leaves the `Decimal` range.
pub fn checked_total<'a>(items: impl IntoIterator<Item = &'a LineItem>) -> Option<Decimal> {
    items
        .into_iter()
        .try_fold(Decimal::ZERO, |sum, item| sum.checked_add(item.checked_total()?))
}

/// One priced, quantified entry of a bill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub product: Product,
    pub quantity: u32,
    pub unit_price: Decimal,
}

impl LineItem {
    /// A fresh line at quantity 1 and the product's current price.
    pub fn new(product: Product) -> Self {
        let unit_price = clamp_price(product.price);
        Self {
            product,
            quantity: 1,
            unit_price,
        }
    }

    pub fn product_id(&self) -> &str {
        &self.product.id
    }

    pub fn checked_total(&self) -> Option<Decimal> {
        self.unit_price.checked_mul(Decimal::from(self.quantity))
    }

    /// Line total; saturates at `Decimal::MAX` for lines built outside
    /// [`BillLines`].
    pub fn total(&self) -> Decimal {
        self.checked_total().unwrap_or(Decimal::MAX)
    }
}

/// Line items of one category with their subtotal.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBucket {
    pub category: Category,
    pub items: Vec<LineItem>,
    pub subtotal: Decimal,
}

/// Ordered line items of an in-progress bill or cart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BillLines {
    items: Vec<LineItem>,
}

impl BillLines {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn get(&self, product_id: &str) -> Option<&LineItem> {
        self.items.iter().find(|item| item.product_id() == product_id)
    }

    fn get_mut(&mut self, product_id: &str) -> Option<&mut LineItem> {
        self.items
            .iter_mut()
            .find(|item| item.product_id() == product_id)
    }

    /// Increments the existing line for this product or appends a new one.
    pub fn add_product(&mut self, product: Product) {
        match self.get_mut(&product.id) {
            Some(item) => item.quantity = item.quantity.saturating_add(1).min(MAX_QUANTITY),
            None => self.items.push(LineItem::new(product)),
        }
    }

    /// Applies [`add_product`](Self::add_product) to every selected product.
    pub fn commit(&mut self, selected: impl IntoIterator<Item = Product>) {
        for product in selected {
            self.add_product(product);
        }
    }

    /// Clamps the quantity into `1..=MAX_QUANTITY`. Returns `false` for an unknown id.
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) -> bool {
        let Some(item) = self.get_mut(product_id) else {
            return false;
        };
        let clamped = quantity.clamp(1, i64::from(MAX_QUANTITY));
        item.quantity = u32::try_from(clamped).unwrap_or(MAX_QUANTITY);
        true
    }

    /// Clamps the unit price into `0..=MAX_UNIT_PRICE`, rounded to cents.
    /// Returns `false` for an unknown id.
    pub fn update_price(&mut self, product_id: &str, price: Decimal) -> bool {
        let Some(item) = self.get_mut(product_id) else {
            return false;
        };
        item.unit_price = clamp_price(price);
        true
    }

    /// Idempotent; returns whether a line was removed.
    pub fn remove(&mut self, product_id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.product_id() != product_id);
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Non-empty buckets in [`Category::BILL_ORDER`].
    pub fn categorize(&self) -> Vec<CategoryBucket> {
        Category::BILL_ORDER
            .into_iter()
            .filter_map(|category| {
                let items: Vec<LineItem> = self
                    .items
                    .iter()
                    .filter(|item| item.product.category.bill_bucket() == category)
                    .cloned()
                    .collect();
                if items.is_empty() {
                    return None;
                }
                let subtotal = saturating_total(&items);
                Some(CategoryBucket {
                    category,
                    items,
                    subtotal,
                })
            })
            .collect()
    }

    pub fn grand_total(&self) -> Decimal {
        saturating_total(&self.items)
    }

    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }
}

fn saturating_total(items: &[LineItem]) -> Decimal {
    checked_total(items).unwrap_or(Decimal::MAX)
}

/// Lifecycle of one bill. `Submitting` only exists while a store write is in
/// flight; success returns to `Empty`, failure to `Building`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BillPhase {
    #[default]
    Empty,
    Building,
    Submitting,
}

/// Line of a persisted bill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillRecordLine {
    pub id: String,
    pub name: String,
    pub qty: u32,
    pub price: Decimal,
    pub total: Decimal,
}

impl From<&LineItem> for BillRecordLine {
    fn from(item: &LineItem) -> Self {
        Self {
            id: item.product.id.clone(),
            name: item.product.name.clone(),
            qty: item.quantity,
            price: item.unit_price,
            total: item.total(),
        }
    }
}

/// Document written to `accounts/{accountId}/bills/{timestamp}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillRecord {
    pub account_id: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    pub products: Vec<BillRecordLine>,
}

impl BillRecord {
    pub fn new(account_id: impl Into<String>, timestamp: i64, lines: &BillLines) -> Self {
        Self {
            account_id: account_id.into(),
            timestamp,
            products: lines.items().iter().map(BillRecordLine::from).collect(),
        }
    }
}

/// Splits `input` into its leading sign and the digits that follow, after
/// trimming whitespace. Returns `(negative, rest)`.
fn split_sign(input: &str) -> (bool, &str) {
    let trimmed = input.trim_start();
    match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    }
}

fn leading_digits(input: &str) -> &str {
    let end = input
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(input.len());
    &input[..end]
}

/// Parses a quantity field from its leading integer, so `"3kg"` reads as 3
/// and `"2.9"` as 2. Input with no leading number reads as 0 and then clamps
/// to 1 in [`BillLines::update_quantity`].
pub fn parse_quantity(input: &str) -> i64 {
    let (negative, rest) = split_sign(input);
    let digits = leading_digits(rest);
    if digits.is_empty() {
        return 0;
    }
    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    if negative {
        -magnitude
    } else {
        magnitude
    }
}

/// Parses a price field from its leading decimal number, so `"12abc"` reads
/// as 12. Input with no leading number reads as 0; values beyond
/// [`MAX_UNIT_PRICE`] read as that bound.
pub fn parse_price(input: &str) -> Decimal {
    let (negative, rest) = split_sign(input);
    let whole = leading_digits(rest);
    let fraction = rest[whole.len()..]
        .strip_prefix('.')
        .map(leading_digits)
        .unwrap_or("");
    if whole.is_empty() && fraction.is_empty() {
        return Decimal::ZERO;
    }
    if negative {
        return Decimal::ZERO;
    }

    let whole = whole.trim_start_matches('0');
    if whole.len() > 10 {
        return MAX_UNIT_PRICE;
    }
    let fraction = &fraction[..fraction.len().min(18)];
    let literal = format!(
        "{}.{}",
        if whole.is_empty() { "0" } else { whole },
        if fraction.is_empty() { "0" } else { fraction }
    );
    literal
        .parse::<Decimal>()
        .map(clamp_price)
        .unwrap_or(Decimal::ZERO)
}
