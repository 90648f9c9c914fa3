//! Type-safe wrappers around [`ResourceClient`](crate::framework::ResourceClient).

pub mod actor_client;
pub mod bill_client;
pub mod order_client;

pub use actor_client::ActorClient;
pub use bill_client::*;
pub use order_client::*;
