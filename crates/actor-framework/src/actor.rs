//! # Generic Store Actor
//!
//! This module defines the `ResourceActor`, the component that applies every request against
//! a collection of records one at a time. The records themselves live wherever the entity's
//! persistence hooks put them.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that serializes access to a collection of entities.
///
/// The actor owns the receiving end of the channel and the entity's context. Requests are
/// handled sequentially in [`run`](Self::run), so each request sees the result of every
/// request before it and nothing else.
///
/// # Usage Pattern
///
/// 1.  **Create**: `ResourceActor::new()` returns the actor and its client.
/// 2.  **Wire**: pass the entity's context into `actor.run(context)`.
/// 3.  **Run**: spawn the run loop on a Tokio task.
///
/// ```rust
/// use actor_framework::{ActorEntity, ResourceActor};
/// use async_trait::async_trait;
/// use std::sync::Mutex;
///
/// #[derive(Clone, Debug)] struct Note { id: usize, text: String }
/// #[derive(Debug)] struct NoteCreate(String);
/// #[derive(Debug)] struct NoteUpdate;
/// #[derive(Debug)] enum NoteAction {}
/// #[derive(Debug, thiserror::Error)] #[error("note error")] struct NoteError;
///
/// /// Notes kept in memory, indexed by id.
/// #[derive(Default)] struct Notebook(Mutex<Vec<Note>>);
///
/// #[async_trait]
/// impl ActorEntity for Note {
///     type Id = usize;
///     type Create = NoteCreate;
///     type Update = NoteUpdate;
///     type Action = NoteAction;
///     type ActionResult = ();
///     type Filter = String;
///     type Context = Notebook;
///     type Error = NoteError;
///
///     fn from_create_params(params: NoteCreate) -> Result<Self, Self::Error> {
///         Ok(Self { id: 0, text: params.0 })
///     }
///     fn matches(&self, filter: &String) -> bool { self.text.contains(filter.as_str()) }
///     async fn on_update(&mut self, _: NoteUpdate, _: &Notebook) -> Result<(), Self::Error> { Ok(()) }
///     async fn handle_action(&mut self, _: NoteAction, _: &Notebook) -> Result<(), Self::Error> { Ok(()) }
///
///     async fn load(id: &usize, book: &Notebook) -> Result<Option<Self>, Self::Error> {
///         Ok(book.0.lock().unwrap().get(*id).cloned())
///     }
///     async fn load_all(book: &Notebook) -> Result<Vec<Self>, Self::Error> {
///         Ok(book.0.lock().unwrap().clone())
///     }
///     async fn insert(&mut self, book: &Notebook) -> Result<usize, Self::Error> {
///         let mut notes = book.0.lock().unwrap();
///         self.id = notes.len();
///         notes.push(self.clone());
///         Ok(self.id)
///     }
///     async fn save(&mut self, book: &Notebook) -> Result<(), Self::Error> {
///         book.0.lock().unwrap()[self.id] = self.clone();
///         Ok(())
///     }
///     async fn remove(&self, _: &Notebook) -> Result<(), Self::Error> { Ok(()) }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceActor::<Note>::new(10);
///     tokio::spawn(actor.run(Notebook::default()));
///
///     let note = client.create(NoteCreate("buy eggs".into())).await.unwrap();
///     assert_eq!(note.id, 0);
///     let found = client.list(Some("eggs".to_string())).await.unwrap();
///     assert_eq!(found.len(), 1);
/// }
/// ```
///
/// # Operations
///
/// * **Create**: builds the entity with `from_create_params`, runs `on_create`, then `insert`
///   assigns the id. A failing hook stores nothing.
/// * **Get**: `load`, which answers `None` for an unknown id.
/// * **List**: `load_all`, keeping only the entities for which `matches(filter)` holds when a
///   filter is given.
/// * **Update**: `load`, then `on_update`. The entity is written back with `save` only if the
///   hook succeeds.
/// * **Delete**: `load`, then `on_delete`, then `remove`.
/// * **Action**: `load`, then `handle_action`. The entity is written back with `save` only if
///   the hook succeeds.
///
/// A failing persistence hook is reported like any other hook error.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the capacity of the request channel. When it is full, client calls
    /// wait for space.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self { receiver };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop until every client has been dropped.
    ///
    /// `context` is handed to every entity hook.
    pub async fn run(mut self, context: T::Context) {
        // "Order" rather than "order_service::model::order::Order"
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let result = Self::create(params, &context).await;
                    match &result {
                        Ok((id, _)) => info!(entity_type, %id, "Created"),
                        Err(e) => warn!(entity_type, error = %e, "Create failed"),
                    }
                    let _ = respond_to.send(result.map(|(_, item)| item));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let result = T::load(&id, &context).await.map_err(entity_error);
                    let found = matches!(result, Ok(Some(_)));
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(result);
                }
                ResourceRequest::List { filter, respond_to } => {
                    let result = Self::list(filter.as_ref(), &context).await;
                    let found = result.as_ref().map_or(0, Vec::len);
                    debug!(entity_type, ?filter, found, "List");
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let result = Self::update(&id, update, &context).await;
                    match &result {
                        Ok(_) => info!(entity_type, %id, "Updated"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Update failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let result = Self::delete(&id, &context).await;
                    match &result {
                        Ok(()) => info!(entity_type, %id, "Deleted"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Delete failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let result = Self::act(&id, action, &context).await;
                    match &result {
                        Ok(_) => info!(entity_type, %id, "Action ok"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(entity_type, "Shutdown");
    }

    async fn create(
        params: T::Create,
        context: &T::Context,
    ) -> Result<(T::Id, T), FrameworkError> {
        let mut item = T::from_create_params(params).map_err(entity_error)?;
        item.on_create(context).await.map_err(entity_error)?;
        let id = item.insert(context).await.map_err(entity_error)?;
        Ok((id, item))
    }

    async fn list(
        filter: Option<&T::Filter>,
        context: &T::Context,
    ) -> Result<Vec<T>, FrameworkError> {
        let all = T::load_all(context).await.map_err(entity_error)?;
        Ok(all
            .into_iter()
            .filter(|item| filter.map_or(true, |f| item.matches(f)))
            .collect())
    }

    async fn update(
        id: &T::Id,
        update: T::Update,
        context: &T::Context,
    ) -> Result<T, FrameworkError> {
        let mut working = Self::load_existing(id, context).await?;
        working.on_update(update, context).await.map_err(entity_error)?;
        working.save(context).await.map_err(entity_error)?;
        Ok(working)
    }

    async fn delete(id: &T::Id, context: &T::Context) -> Result<(), FrameworkError> {
        let item = Self::load_existing(id, context).await?;
        item.on_delete(context).await.map_err(entity_error)?;
        item.remove(context).await.map_err(entity_error)
    }

    async fn act(
        id: &T::Id,
        action: T::Action,
        context: &T::Context,
    ) -> Result<T::ActionResult, FrameworkError> {
        let mut working = Self::load_existing(id, context).await?;
        let outcome = working
            .handle_action(action, context)
            .await
            .map_err(entity_error)?;
        working.save(context).await.map_err(entity_error)?;
        Ok(outcome)
    }

    async fn load_existing(id: &T::Id, context: &T::Context) -> Result<T, FrameworkError> {
        T::load(id, context)
            .await
            .map_err(entity_error)?
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))
    }
}

fn entity_error<E: std::error::Error + Send + Sync + 'static>(e: E) -> FrameworkError {
    FrameworkError::EntityError(Box::new(e))
}
