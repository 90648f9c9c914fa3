//! The bill/cart entity and its [`ActorEntity`] implementation.
//!
//! One engine serves both screens: a [`BillKind::FarmerBill`] is built from a
//! selection and submitted to the store, a [`BillKind::CustomerCart`] is filled
//! product by product and checked out into an order.
//!
//! Phase transitions:
//!
//! ```text
//! Empty --commit/add--> Building --submit--> Submitting --ok--> Empty
//!                                                       \--err-> Building
//! ```

use super::{BillAction, BillActionResult, BillError, BillReceipt, BillSummary};
use crate::clients::OrderClient;
use crate::framework::ActorEntity;
use crate::model::{BillLines, BillPhase, BillRecord, SelectionSet};
use crate::store::{StoreHandle, StorePath};
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BillId(pub u32);

impl From<u32> for BillId {
    fn from(n: u32) -> Self {
        BillId(n)
    }
}

impl fmt::Display for BillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bill_{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BillKind {
    FarmerBill,
    CustomerCart,
}

impl fmt::Display for BillKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BillKind::FarmerBill => f.write_str("farmer bill"),
            BillKind::CustomerCart => f.write_str("customer cart"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BillCreate {
    pub account_id: String,
    pub kind: BillKind,
}

/// Collaborators of every bill.
#[derive(Clone)]
pub struct BillContext {
    pub store: StoreHandle,
    pub orders: OrderClient,
}

#[derive(Debug, Clone)]
pub struct Bill {
    pub id: BillId,
    pub account_id: String,
    pub kind: BillKind,
    pub selection: SelectionSet,
    pub lines: BillLines,
    pub phase: BillPhase,
}

impl Bill {
    pub fn summary(&self) -> BillSummary {
        BillSummary {
            phase: self.phase,
            selection: self.selection.members().to_vec(),
            lines: self.lines.items().to_vec(),
            buckets: self.lines.categorize(),
            grand_total: self.lines.grand_total(),
        }
    }

    fn settle_phase(&mut self) {
        self.phase = if self.lines.is_empty() {
            BillPhase::Empty
        } else {
            BillPhase::Building
        };
    }

    fn require_kind(&self, kind: BillKind, action: &'static str) -> Result<(), BillError> {
        if self.kind == kind {
            Ok(())
        } else {
            Err(BillError::WrongKind {
                action,
                kind: self.kind,
            })
        }
    }

    async fn submit(&mut self, store: &StoreHandle) -> Result<BillReceipt, BillError> {
        self.require_kind(BillKind::FarmerBill, "submit")?;
        if self.lines.is_empty() {
            return Err(BillError::Validation(
                "Bill is empty. Add products before submitting.".to_string(),
            ));
        }

        let timestamp = Utc::now().timestamp_millis();
        let record = BillRecord::new(&self.account_id, timestamp, &self.lines);
        let path = StorePath::bill(&self.account_id, timestamp);
        let document =
            serde_json::to_value(&record).map_err(|e| BillError::Collaborator(e.to_string()))?;

        self.phase = BillPhase::Submitting;
        debug!(bill_id = %self.id, %path, "Submitting bill");
        match store.write(&path, document).await {
            Ok(()) => {
                self.lines.clear();
                self.phase = BillPhase::Empty;
                info!(bill_id = %self.id, account_id = %self.account_id, %path, "Bill submitted");
                Ok(BillReceipt { path, record })
            }
            Err(e) => {
                self.phase = BillPhase::Building;
                warn!(bill_id = %self.id, error = %e, "Bill submission failed");
                Err(BillError::Collaborator(e.to_string()))
            }
        }
    }

    async fn checkout(&mut self, orders: &OrderClient) -> Result<crate::model::Order, BillError> {
        self.require_kind(BillKind::CustomerCart, "checkout")?;
        if self.lines.is_empty() {
            return Err(BillError::Validation("Your cart is empty".to_string()));
        }

        self.phase = BillPhase::Submitting;
        let placed = orders
            .place_order(
                &self.account_id,
                self.lines.items().to_vec(),
                Utc::now().date_naive(),
            )
            .await;
        match placed {
            Ok(order) => {
                self.lines.clear();
                self.phase = BillPhase::Empty;
                info!(bill_id = %self.id, order_id = %order.id, total = %order.total, "Cart checked out");
                Ok(order)
            }
            Err(e) => {
                self.phase = BillPhase::Building;
                warn!(bill_id = %self.id, error = %e, "Checkout failed");
                Err(e.into())
            }
        }
    }
}

#[async_trait]
impl ActorEntity for Bill {
    type Id = BillId;
    type Create = BillCreate;
    type Action = BillAction;
    type ActionResult = BillActionResult;
    type Context = BillContext;
    type Error = BillError;

    fn from_create_params(id: BillId, params: BillCreate) -> Result<Self, BillError> {
        Ok(Self {
            id,
            account_id: params.account_id,
            kind: params.kind,
            selection: SelectionSet::new(),
            lines: BillLines::new(),
            phase: BillPhase::Empty,
        })
    }

    fn owner(&self) -> &str {
        &self.account_id
    }

    async fn handle_action(
        &mut self,
        action: BillAction,
        ctx: &BillContext,
    ) -> Result<BillActionResult, BillError> {
        match action {
            BillAction::ToggleSelection(product) => {
                let selected = self.selection.toggle(product);
                Ok(BillActionResult::ToggleSelection {
                    selected,
                    count: self.selection.count(),
                })
            }
            BillAction::CommitSelection => {
                if self.selection.is_empty() {
                    return Err(BillError::Validation(
                        "Please select at least one product".to_string(),
                    ));
                }
                let selected = self.selection.take();
                debug!(bill_id = %self.id, count = selected.len(), "Committing selection");
                self.lines.commit(selected);
                self.settle_phase();
                Ok(BillActionResult::CommitSelection(self.summary()))
            }
            BillAction::AddProduct(product) => {
                self.lines.add_product(product);
                self.settle_phase();
                Ok(BillActionResult::AddProduct(self.summary()))
            }
            BillAction::UpdateQuantity {
                product_id,
                quantity,
            } => {
                self.lines.update_quantity(&product_id, quantity);
                Ok(BillActionResult::UpdateQuantity(self.summary()))
            }
            BillAction::UpdatePrice { product_id, price } => {
                self.lines.update_price(&product_id, price);
                Ok(BillActionResult::UpdatePrice(self.summary()))
            }
            BillAction::RemoveLineItem(product_id) => {
                self.lines.remove(&product_id);
                self.settle_phase();
                Ok(BillActionResult::RemoveLineItem(self.summary()))
            }
            BillAction::Summary => Ok(BillActionResult::Summary(self.summary())),
            BillAction::Submit => self.submit(&ctx.store).await.map(BillActionResult::Submit),
            BillAction::Checkout => self
                .checkout(&ctx.orders)
                .await
                .map(BillActionResult::Checkout),
        }
    }
}
