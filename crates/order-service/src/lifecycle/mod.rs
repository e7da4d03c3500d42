//! # System Lifecycle
//!
//! Starting, wiring and stopping the order store, plus logging setup.
//!
//! ## Dependency Injection via Context
//!
//! The Order actor is built without dependencies and receives them through
//! `run(context)`. Its context is the [`OrderDb`](crate::db::OrderDb) pool that every
//! persistence hook reads and writes through:
//!
//! ```rust,ignore
//! impl ActorEntity for Order {
//!     type Context = OrderDb;
//! }
//! ```
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all clients** - Closes the sender side of the channel
//! 2. **Actor detects closure** - `receiver.recv()` returns `None` once queued requests are done
//! 3. **Await completion** - [`OrderSystem::shutdown`] joins the actor task
//! 4. **Close the pool** - every connection is returned and closed, so the database file is
//!    consistent on disk
//!
//! The HTTP server holds a clone of the client in its state, so it must stop before
//! `shutdown` can complete.

pub mod order_system;
pub mod tracing;

pub use self::order_system::*;
pub use self::tracing::*;
