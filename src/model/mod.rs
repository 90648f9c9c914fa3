//! Plain domain data: products, the selection set, bill lines and orders.
//!
//! Nothing here talks to a collaborator; the actors in [`crate::bill_actor`]
//! and [`crate::order_actor`] wrap these types.

pub mod bill;
pub mod order;
pub mod product;
pub mod selection;

pub use bill::*;
pub use order::*;
pub use product::*;
pub use selection::*;
