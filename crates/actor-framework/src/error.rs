//! # Framework Errors
//!
//! Transport-level failures between a `ResourceClient` and its `ResourceActor`, plus the
//! wrapper that carries an entity's own error back to the caller.

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Record not found: {0}")]
    NotFound(String),
    /// An error raised by an entity hook. Domain clients downcast it back to their own type.
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}
