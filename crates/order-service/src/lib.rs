//! # Order Service
//!
//! A REST service for customer orders and the line items they own.
//!
//! ## Core Components
//!
//! - **[model]**: [`Order`](model::Order), [`Item`](model::Item), the status lifecycle and the
//!   JSON [`Record`](model::Record) contract.
//! - **[order_actor]**: The `ActorEntity` implementation that serves orders from a
//!   [`ResourceActor`](actor_framework::ResourceActor).
//! - **[db]**: [`OrderDb`](db::OrderDb), the SQLite tables the actor persists orders in.
//! - **[clients]**: [`OrderClient`](clients::OrderClient), the data-access handle.
//! - **[lifecycle]**: Starting and stopping the store, and logging setup.
//! - **[config]**: Command line and environment settings.
//! - **[http]**: The axum router and its handlers.
//!
//! ## Testing
//!
//! See [`actor_framework::mock`] for utilities to test clients without spawning full actors.

pub mod clients;
pub mod config;
pub mod db;
pub mod http;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
