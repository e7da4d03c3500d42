//! # Actor Framework
//!
//! Building blocks for keeping typed records behind a single-owner actor. Each record type
//! gets one [`ResourceActor`] that applies every request sequentially against the entity's
//! persistence hooks, and any number of cheap [`ResourceClient`] handles that talk to it over
//! a channel.
//!
//! ## Layers
//!
//! 1. **Entity Layer** ([`ActorEntity`]) - the record type, its payloads, its hooks and how it
//!    is persisted
//! 2. **Runtime Layer** ([`ResourceActor`]) - the request loop
//! 3. **Interface Layer** ([`ResourceClient`], [`ActorClient`]) - typed calls into the actor
//!
//! ## Request Set
//!
//! | Request | Hooks | Reply |
//! |---|---|---|
//! | `Create` | `from_create_params`, `on_create`, `insert` | the stored entity |
//! | `Get` | `load` | `Option<T>` |
//! | `List` | `load_all`, `matches` | `Vec<T>` in id order |
//! | `Update` | `load`, `on_update`, `save` | the updated entity |
//! | `Delete` | `load`, `on_delete`, `remove` | `()` |
//! | `Action` | `load`, `handle_action`, `save` | `T::ActionResult` |
//!
//! `Update` and `Action` hooks run on a freshly loaded copy. The copy is written back with
//! `save` only when the hook returns `Ok`, so a failed request leaves the stored record as it
//! was.
//!
//! ## Context Injection
//!
//! Dependencies are handed to [`ResourceActor::run`], not to the constructor. The value is
//! passed by reference to every hook, and it is where the persistence hooks keep records:
//!
//! ```rust
//! use actor_framework::{ActorEntity, ResourceActor};
//! use async_trait::async_trait;
//! use std::collections::BTreeMap;
//! use std::sync::Mutex;
//!
//! #[derive(Clone, Debug)] struct Invoice { id: u32, total: u32 }
//! #[derive(Debug)] struct InvoiceCreate(u32);
//! #[derive(Debug)] struct InvoiceUpdate;
//! #[derive(Debug)] enum InvoiceAction {}
//! #[derive(Debug, thiserror::Error)] #[error("invoice error")] struct InvoiceError;
//!
//! /// Invoice ledger shared by every request the actor handles.
//! #[derive(Default)]
//! struct Ledger(Mutex<BTreeMap<u32, Invoice>>);
//!
//! #[async_trait]
//! impl ActorEntity for Invoice {
//!     type Id = u32; type Create = InvoiceCreate; type Update = InvoiceUpdate;
//!     type Action = InvoiceAction; type ActionResult = (); type Filter = ();
//!     type Context = Ledger; type Error = InvoiceError;
//!
//!     fn from_create_params(params: InvoiceCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id: 0, total: params.0 })
//!     }
//!     async fn on_update(&mut self, _: InvoiceUpdate, _: &Ledger) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_action(&mut self, _: InvoiceAction, _: &Ledger) -> Result<(), Self::Error> { Ok(()) }
//!
//!     async fn load(id: &u32, ledger: &Ledger) -> Result<Option<Self>, Self::Error> {
//!         Ok(ledger.0.lock().unwrap().get(id).cloned())
//!     }
//!     async fn load_all(ledger: &Ledger) -> Result<Vec<Self>, Self::Error> {
//!         Ok(ledger.0.lock().unwrap().values().cloned().collect())
//!     }
//!     async fn insert(&mut self, ledger: &Ledger) -> Result<u32, Self::Error> {
//!         let mut invoices = ledger.0.lock().unwrap();
//!         self.id = 1000 + invoices.len() as u32;
//!         invoices.insert(self.id, self.clone());
//!         Ok(self.id)
//!     }
//!     async fn save(&mut self, ledger: &Ledger) -> Result<(), Self::Error> {
//!         ledger.0.lock().unwrap().insert(self.id, self.clone());
//!         Ok(())
//!     }
//!     async fn remove(&self, ledger: &Ledger) -> Result<(), Self::Error> {
//!         ledger.0.lock().unwrap().remove(&self.id);
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = ResourceActor::<Invoice>::new(10);
//!     tokio::spawn(actor.run(Ledger::default()));
//!
//!     let invoice = client.create(InvoiceCreate(250)).await.unwrap();
//!     assert_eq!(invoice.id, 1000);
//! }
//! ```
//!
//! ## Concurrency Model
//!
//! - Each actor runs in its own Tokio task
//! - Requests are processed **sequentially** within an actor, so no two hooks for the same
//!   entity type ever run at once
//! - The actor exits when the last client is dropped
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers a real `ResourceClient` from scripted expectations, for unit
//! tests of domain client code without a running actor.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
