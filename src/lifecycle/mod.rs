//! # System Lifecycle
//!
//! Starts the marketplace actors, wires their dependencies and shuts them
//! down again.
//!
//! The order actor has to exist before the bill actor can run, because
//! checkout places orders through an [`OrderClient`](crate::clients::OrderClient)
//! carried in the bill actor's context:
//!
//! ```rust,ignore
//! let (order_actor, order_client) = order_actor::new();
//! let (bill_actor, bill_client) = bill_actor::new();
//!
//! tokio::spawn(order_actor.run(store.clone()));
//! tokio::spawn(bill_actor.run(BillContext { store, orders: order_client.clone() }));
//! ```
//!
//! Dropping every client closes the channels; each actor then drains and
//! exits its loop. [`MarketSystem::shutdown`] does exactly that and waits for
//! the tasks.

pub mod market_system;
pub mod tracing;

pub use market_system::*;
pub use tracing::*;
