use crate::bill_actor::BillContext;
use crate::clients::{BillClient, OrderClient};
use crate::store::StoreHandle;
use tracing::{error, info};

/// Runtime orchestrator for the marketplace actors.
///
/// Owns the clients of the bill and order actors and the task handles used
/// for graceful shutdown. Both actors share one [`StoreHandle`].
///
/// # Example
///
/// ```ignore
/// let system = MarketSystem::new(Arc::new(MemoryStore::new()));
///
/// let cart = system.bill_client.open("customer1", BillKind::CustomerCart).await?;
/// system.bill_client.add_product(cart, product).await?;
/// let order = system.bill_client.checkout(cart).await?;
///
/// system.shutdown().await?;
/// ```
pub struct MarketSystem {
    /// Client for farmer bills and customer carts
    pub bill_client: BillClient,

    /// Client for the order book
    pub order_client: OrderClient,

    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl MarketSystem {
    /// Spawns the order and bill actors against `store`.
    ///
    /// Must be called inside a Tokio runtime.
    pub fn new(store: StoreHandle) -> Self {
        let (order_actor, order_client) = crate::order_actor::new();
        let (bill_actor, bill_client) = crate::bill_actor::new();

        // Orders only need the store.
        let order_handle = tokio::spawn(order_actor.run(store.clone()));

        // Bills persist to the store and place orders on checkout.
        let bill_handle = tokio::spawn(bill_actor.run(BillContext {
            store,
            orders: order_client.clone(),
        }));

        Self {
            bill_client,
            order_client,
            handles: vec![bill_handle, order_handle],
        }
    }

    /// Drops the clients and waits for both actor loops to finish.
    ///
    /// The bill actor holds an order client in its context, so the order
    /// actor only exits after the bill actor has.
    ///
    /// # Errors
    ///
    /// Returns error if an actor task panicked.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down market system...");

        drop(self.bill_client);
        drop(self.order_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("Market system shutdown complete.");
        Ok(())
    }
}
