//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the global subscriber. Levels come from `RUST_LOG`
//! (`info` when unset).
//!
//! ```bash
//! RUST_LOG=info order-service                       # request and mutation summaries
//! RUST_LOG=debug order-service                      # full payloads
//! RUST_LOG=info order-service --log-format json     # one JSON object per line
//! ```
//!
//! The compact format hides the module prefix (`with_target(false)`). Store logs carry an
//! `entity_type` field instead.
//!
//! With `RUST_LOG=debug` a create shows the client span and the actor's handling:
//!
//! ```text
//! DEBUG create_order: create_order called draft=Order { id: None, customer_id: 1, .. }
//! DEBUG create_order: Create entity_type="Order" params=Order { id: None, customer_id: 1, .. }
//! INFO create_order: Created entity_type="Order" id=1 size=1
//! INFO create_order: Order created order_id=Some(OrderId(1)) items=0
//! ```

use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

/// Output format for log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Single-line human readable output.
    #[default]
    Compact,
    /// Newline-delimited JSON.
    Json,
}

pub fn setup_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match format {
        LogFormat::Compact => builder.compact().init(),
        LogFormat::Json => builder.json().init(),
    }
}
