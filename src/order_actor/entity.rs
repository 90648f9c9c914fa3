//! [`ActorEntity`] implementation for [`Order`].
//!
//! An order is created once, persisted in `on_create`, and never changes.
//! If the store write fails the order never becomes visible in the actor.

use super::OrderError;
use crate::framework::ActorEntity;
use crate::model::{checked_total, Order, OrderCreate, OrderId, OrderStatus};
use crate::store::{StoreHandle, StorePath};
use async_trait::async_trait;
use tracing::{info, warn};

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Action = ();
    type ActionResult = ();
    type Context = StoreHandle;
    type Error = OrderError;

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, OrderError> {
        if params.items.is_empty() {
            return Err(OrderError::Validation("Your cart is empty".to_string()));
        }
        let total = checked_total(&params.items)
            .ok_or_else(|| OrderError::Validation("Order total is out of range".to_string()))?;
        Ok(Self {
            id,
            account_id: params.account_id,
            items: params.items,
            total,
            status: OrderStatus::Processing,
            created_on: params.created_on,
        })
    }

    fn owner(&self) -> &str {
        &self.account_id
    }

    async fn on_create(&mut self, store: &StoreHandle) -> Result<(), OrderError> {
        let path = StorePath::order(&self.account_id, self.id.0);
        let document =
            serde_json::to_value(&*self).map_err(|e| OrderError::Collaborator(e.to_string()))?;

        if let Err(e) = store.write(&path, document).await {
            warn!(order_id = %self.id, %path, error = %e, "Order not persisted");
            return Err(OrderError::Collaborator(e.to_string()));
        }
        info!(order_id = %self.id, %path, total = %self.total, "Order persisted");
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _store: &StoreHandle) -> Result<(), OrderError> {
        Ok(())
    }
}
