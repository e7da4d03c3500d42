//! # ActorEntity Trait
//!
//! The `ActorEntity` trait is the contract every stored record type must satisfy to be
//! managed by the generic [`ResourceActor`](crate::ResourceActor). It names the id, the
//! create/update payloads, the custom actions, the list filter, the injected context and the
//! error type, and provides lifecycle hooks (`on_create`, `on_update`, `on_delete`,
//! `handle_action`) plus the `matches` predicate used by `List` requests.
//!
//! The actor keeps no records of its own. The persistence hooks (`load`, `load_all`,
//! `insert`, `save`, `remove`) read and write through the injected `Context`, which is
//! usually a database pool.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::on_create`]
//! - [`ActorEntity::on_delete`]
//! - [`ActorEntity::matches`]
//!
//! The defaults do nothing (`Ok(())`) or match everything (`true`).

use async_trait::async_trait;
use std::fmt::{Debug, Display};

/// Trait that any stored entity must implement to be managed by `ResourceActor`.
///
/// # Async & Context
/// Hooks are async so they can await other clients. The `Context` type is injected into every
/// hook by [`ResourceActor::run`](crate::ResourceActor::run), which lets dependencies be bound
/// after construction.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// Identifier assigned by [`insert`](Self::insert).
    type Id: Clone + Send + Sync + Display + Debug;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Enum of entity-specific operations (e.g. `Cancel`).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// Predicate payload accepted by `List` requests. Use `()` when the entity has no filters.
    type Filter: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this entity.
    ///
    /// One error enum per entity rather than one per message: clients pattern match on a
    /// single type, at the cost of every action sharing the same set of failures.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the entity from the payload. It has no id until `insert` runs.
    /// Called synchronously before `on_create`.
    fn from_create_params(params: Self::Create) -> Result<Self, Self::Error>;

    /// Whether this entity satisfies `filter`. `List` requests without a filter skip this.
    fn matches(&self, _filter: &Self::Filter) -> bool {
        true
    }

    // --- Lifecycle Hooks (Async) ---

    /// Called after `from_create_params` and before `insert`.
    /// An error here aborts the create and nothing is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before `remove`.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle an entity-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;

    // --- Persistence (Async) ---

    /// Reads the entity with `id`, or `None` when there is none.
    async fn load(id: &Self::Id, ctx: &Self::Context) -> Result<Option<Self>, Self::Error>;

    /// Reads every entity in id order.
    async fn load_all(ctx: &Self::Context) -> Result<Vec<Self>, Self::Error>;

    /// Writes a new entity and records the id the store assigned to it.
    async fn insert(&mut self, ctx: &Self::Context) -> Result<Self::Id, Self::Error>;

    /// Writes back an entity changed by `on_update` or `handle_action`.
    async fn save(&mut self, ctx: &Self::Context) -> Result<(), Self::Error>;

    /// Deletes the entity.
    async fn remove(&self, ctx: &Self::Context) -> Result<(), Self::Error>;
}
