//! Farmer bills and customer carts.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use entity::*;
pub use error::*;

use crate::clients::BillClient;
use crate::framework::ResourceActor;

/// Creates a new Bill actor and its client.
pub fn new() -> (ResourceActor<Bill>, BillClient) {
    let (actor, generic_client) = ResourceActor::new(32);
    (actor, BillClient::new(generic_client))
}
