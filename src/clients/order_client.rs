use crate::clients::actor_client::ActorClient;
use crate::framework::{FrameworkError, ResourceClient};
use crate::model::{LineItem, Order, OrderCreate};
use crate::order_actor::OrderError;
use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::{debug, info, instrument};

/// Client for the order book.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    /// Creates and persists an order, returning the stored snapshot.
    #[instrument(skip(self, items), fields(items = items.len()))]
    pub async fn place_order(
        &self,
        account_id: &str,
        items: Vec<LineItem>,
        created_on: NaiveDate,
    ) -> Result<Order, OrderError> {
        debug!(?items, "place_order called");
        info!("Sending place_order to actor");

        let payload = OrderCreate {
            account_id: account_id.to_string(),
            items,
            created_on,
        };
        let id = self.inner.create(payload).await.map_err(Self::map_error)?;
        self.get(id)
            .await?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))
    }

    /// "My Orders": every order placed by `account_id`, oldest first.
    pub async fn orders_for(&self, account_id: &str) -> Result<Vec<Order>, OrderError> {
        self.list(account_id).await
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<OrderError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => OrderError::NotFound(id),
            Err(other) => OrderError::ActorCommunication(other.to_string()),
        }
    }
}
