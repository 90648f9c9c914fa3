use crate::framework::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Operations every typed client gets for free.
///
/// Implementors supply the inner [`ResourceClient`] and the error mapping;
/// `get`, `list` and `close` come with default implementations.
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific resource error type, recovering
    /// the entity's own error where one was boxed.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Every entity owned by `owner`, in creation order.
    #[tracing::instrument(skip(self))]
    async fn list(&self, owner: &str) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list(owner).await.map_err(Self::map_error)
    }

    /// Drop an entity from its actor.
    #[tracing::instrument(skip(self))]
    async fn close(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().close(id).await.map_err(Self::map_error)
    }
}
