use crate::bill_actor::{
    Bill, BillAction, BillActionResult, BillCreate, BillError, BillId, BillKind, BillReceipt,
    BillSummary,
};
use crate::clients::actor_client::ActorClient;
use crate::framework::{FrameworkError, ResourceClient};
use crate::model::{parse_price, parse_quantity, Order, Product};
use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::{debug, instrument};

/// Client for farmer bills and customer carts.
#[derive(Clone)]
pub struct BillClient {
    inner: ResourceClient<Bill>,
}

fn unexpected(result: BillActionResult) -> BillError {
    BillError::ActorCommunication(format!("unexpected action result: {:?}", result))
}

impl BillClient {
    pub fn new(inner: ResourceClient<Bill>) -> Self {
        Self { inner }
    }

    async fn act(&self, id: BillId, action: BillAction) -> Result<BillActionResult, BillError> {
        self.inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn open(&self, account_id: &str, kind: BillKind) -> Result<BillId, BillError> {
        debug!("Sending request");
        self.inner
            .create(BillCreate {
                account_id: account_id.to_string(),
                kind,
            })
            .await
            .map_err(Self::map_error)
    }

    /// Returns `true` when the product is selected afterwards.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub async fn toggle_selection(&self, id: BillId, product: Product) -> Result<bool, BillError> {
        match self.act(id, BillAction::ToggleSelection(product)).await? {
            BillActionResult::ToggleSelection { selected, .. } => Ok(selected),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn commit_selection(&self, id: BillId) -> Result<BillSummary, BillError> {
        match self.act(id, BillAction::CommitSelection).await? {
            BillActionResult::CommitSelection(summary) => Ok(summary),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub async fn add_product(&self, id: BillId, product: Product) -> Result<BillSummary, BillError> {
        match self.act(id, BillAction::AddProduct(product)).await? {
            BillActionResult::AddProduct(summary) => Ok(summary),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn update_quantity(
        &self,
        id: BillId,
        product_id: &str,
        quantity: i64,
    ) -> Result<BillSummary, BillError> {
        let action = BillAction::UpdateQuantity {
            product_id: product_id.to_string(),
            quantity,
        };
        match self.act(id, action).await? {
            BillActionResult::UpdateQuantity(summary) => Ok(summary),
            other => Err(unexpected(other)),
        }
    }

    /// Quantity straight from a text field.
    pub async fn update_quantity_input(
        &self,
        id: BillId,
        product_id: &str,
        input: &str,
    ) -> Result<BillSummary, BillError> {
        self.update_quantity(id, product_id, parse_quantity(input))
            .await
    }

    #[instrument(skip(self))]
    pub async fn update_price(
        &self,
        id: BillId,
        product_id: &str,
        price: Decimal,
    ) -> Result<BillSummary, BillError> {
        let action = BillAction::UpdatePrice {
            product_id: product_id.to_string(),
            price,
        };
        match self.act(id, action).await? {
            BillActionResult::UpdatePrice(summary) => Ok(summary),
            other => Err(unexpected(other)),
        }
    }

    /// Price straight from a text field.
    pub async fn update_price_input(
        &self,
        id: BillId,
        product_id: &str,
        input: &str,
    ) -> Result<BillSummary, BillError> {
        self.update_price(id, product_id, parse_price(input)).await
    }

    #[instrument(skip(self))]
    pub async fn remove_line_item(
        &self,
        id: BillId,
        product_id: &str,
    ) -> Result<BillSummary, BillError> {
        match self
            .act(id, BillAction::RemoveLineItem(product_id.to_string()))
            .await?
        {
            BillActionResult::RemoveLineItem(summary) => Ok(summary),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn summary(&self, id: BillId) -> Result<BillSummary, BillError> {
        match self.act(id, BillAction::Summary).await? {
            BillActionResult::Summary(summary) => Ok(summary),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn submit(&self, id: BillId) -> Result<BillReceipt, BillError> {
        debug!("Sending request");
        match self.act(id, BillAction::Submit).await? {
            BillActionResult::Submit(receipt) => Ok(receipt),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn checkout(&self, id: BillId) -> Result<Order, BillError> {
        debug!("Sending request");
        match self.act(id, BillAction::Checkout).await? {
            BillActionResult::Checkout(order) => Ok(order),
            other => Err(unexpected(other)),
        }
    }
}

#[async_trait]
impl ActorClient<Bill> for BillClient {
    type Error = BillError;

    fn inner(&self) -> &ResourceClient<Bill> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<BillError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => BillError::NotFound(id),
            Err(other) => BillError::ActorCommunication(other.to_string()),
        }
    }
}
