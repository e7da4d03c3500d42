//! # Generic Messages
//!
//! Request types sent from a `ResourceClient` to its `ResourceActor`.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Message sent to the actor to request an operation.
///
/// The variants are the CRUD operations every stored record supports, a `List` scan with an
/// optional entity-defined filter, and an `Action` escape hatch for entity-specific behavior.
/// The payload types come from the [`ActorEntity`] associated types, so a request built for
/// one entity cannot be sent to the actor of another.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    /// Store a new record. Responds with the stored entity, id included.
    Create {
        params: T::Create,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    /// All records in id order, or those matching `filter`.
    List {
        filter: Option<T::Filter>,
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}
