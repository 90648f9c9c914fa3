//! # ActorEntity Trait
//!
//! The contract every actor-managed resource (a farmer bill, a customer cart,
//! a placed order) implements so that one generic [`ResourceActor`](super::ResourceActor)
//! can own it.
//!
//! Resources in this crate are not edited field-by-field. Every state change is
//! a domain *action* (toggle a product, commit the selection, submit the bill),
//! so the trait has no generic update hook: `handle_action` is the single
//! mutation path, which keeps invariants such as "quantity never drops below 1"
//! in one place.

use async_trait::async_trait;
use std::fmt::{Debug, Display};

/// Trait that any resource must implement to be managed by `ResourceActor`.
///
/// # Async & Context
/// Hooks are async so an entity can talk to collaborators (the document store,
/// other actors) while it holds exclusive access to its own state. The
/// collaborators arrive through `Context`, injected once in `run()`.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// Identifier generated by the actor from a `u32` counter.
    type Id: Ord + Clone + Send + Sync + Display + Debug + From<u32>;

    /// Payload required to open a new resource.
    type Create: Send + Sync + Debug;

    /// Domain operations (e.g. `CommitSelection`, `Submit`).
    type Action: Send + Sync + Debug;

    /// Result type returned by actions.
    type ActionResult: Send + Sync + Debug;

    /// Collaborators injected into every hook. Use `()` when there are none.
    type Context: Send + Sync;

    /// Per-actor error type. Travels boxed inside
    /// [`FrameworkError::EntityError`](super::FrameworkError::EntityError) and is
    /// recovered by the typed clients with
    /// [`FrameworkError::downcast_entity`](super::FrameworkError::downcast_entity).
    type Error: std::error::Error + Send + Sync + 'static;

    /// Build the resource from its id and creation payload.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Account that owns this resource; `List` requests filter on it.
    fn owner(&self) -> &str;

    /// Called after construction, before the resource becomes visible.
    /// A failure here aborts the creation.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called right before the resource is dropped from the actor.
    async fn on_close(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Apply one domain action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
