//! Custom actions for the Bill actor.
//!
//! Every change to a bill or cart is one of these actions, handled by
//! [`ActorEntity::handle_action`](crate::framework::ActorEntity::handle_action)
//! on [`Bill`](super::Bill). Results match the actions 1:1.

use crate::model::{BillPhase, BillRecord, CategoryBucket, LineItem, Order, Product};
use crate::store::StorePath;
use rust_decimal::Decimal;

#[derive(Debug, Clone)]
pub enum BillAction {
    /// Select or unselect a product.
    ToggleSelection(Product),
    /// Move every selected product into the lines. Fails on an empty selection.
    CommitSelection,
    /// Add one product directly, skipping the selection (customer cart).
    AddProduct(Product),
    /// Quantity is clamped to at least 1.
    UpdateQuantity { product_id: String, quantity: i64 },
    /// Unit price is clamped to at least 0.
    UpdatePrice { product_id: String, price: Decimal },
    RemoveLineItem(String),
    Summary,
    /// Persist a farmer bill to the store and clear it.
    Submit,
    /// Turn a customer cart into an order and clear it.
    Checkout,
}

#[derive(Debug, Clone)]
pub enum BillActionResult {
    ToggleSelection { selected: bool, count: usize },
    CommitSelection(BillSummary),
    AddProduct(BillSummary),
    UpdateQuantity(BillSummary),
    UpdatePrice(BillSummary),
    RemoveLineItem(BillSummary),
    Summary(BillSummary),
    Submit(BillReceipt),
    Checkout(Order),
}

/// Read model of a bill after an action.
#[derive(Debug, Clone, PartialEq)]
pub struct BillSummary {
    pub phase: BillPhase,
    pub selection: Vec<Product>,
    pub lines: Vec<LineItem>,
    pub buckets: Vec<CategoryBucket>,
    pub grand_total: Decimal,
}

impl BillSummary {
    pub fn line(&self, product_id: &str) -> Option<&LineItem> {
        self.lines.iter().find(|line| line.product.id == product_id)
    }
}

/// What a successful submission wrote, and where.
#[derive(Debug, Clone, PartialEq)]
pub struct BillReceipt {
    pub path: StorePath,
    pub record: BillRecord,
}
