//! # Generic Messages
//!
//! Requests carried from a [`ResourceClient`](super::ResourceClient) to its
//! [`ResourceActor`](super::ResourceActor). Each one brings its own oneshot
//! channel for the reply.

use super::entity::ActorEntity;
use super::error::FrameworkError;
use tokio::sync::oneshot;

/// One-shot reply channel used by every request.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Lifecycle of an actor-managed resource.
///
/// - **Create**: open a resource from [`ActorEntity::Create`].
/// - **Get**: read the current state by id.
/// - **List**: every resource owned by an account, in id order.
/// - **Action**: run one [`ActorEntity::Action`]; the only mutation path.
/// - **Close**: drop the resource (a view unmounting).
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        owner: String,
        respond_to: Response<Vec<T>>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
    Close {
        id: T::Id,
        respond_to: Response<()>,
    },
}
