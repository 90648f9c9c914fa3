//! Generic actor framework for resource management.
//!
//! Bills, carts and the order book all run on the same machinery: one
//! [`ResourceActor`] task per resource type, reached through a cloneable
//! [`ResourceClient`].
//!
//! # Main Components
//!
//! - [`ActorEntity`] - Trait that resource types implement to be managed by actors
//! - [`ResourceActor`] - Generic actor that owns the entities and runs their hooks
//! - [`ResourceClient`] - Type-safe handle for sending requests
//! - [`FrameworkError`] - Plumbing errors, plus boxed entity errors
//!
//! # Testing
//!
//! See [`mock`] module for utilities to test clients without spawning full actors.

mod actor;
mod client;
mod entity;
mod error;
mod message;
pub mod mock;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
