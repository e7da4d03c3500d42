use crate::clients::OrderClient;
use crate::db::OrderDb;
use crate::order_actor;
use tracing::{error, info};

/// Default mailbox size for the Order actor.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 32;

/// The runtime orchestrator for the order store.
///
/// `OrderSystem` is responsible for:
/// - **Lifecycle Management**: Starting and stopping the Order actor
/// - **Dependency Wiring**: Injecting the [`OrderDb`] the actor persists orders through
///
/// # Example
///
/// ```rust
/// use order_service::lifecycle::OrderSystem;
/// use order_service::model::Order;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let system = OrderSystem::connect("sqlite::memory:").await?;
///     let order = system.order_client.create_order(Order::new(1, "1 Main St")).await?;
///     assert!(order.id.is_some());
///
///     system.shutdown().await?;
///     Ok(())
/// }
/// ```
pub struct OrderSystem {
    /// Client for interacting with the Order actor
    pub order_client: OrderClient,

    /// Pool shared with the actor, closed on shutdown
    db: OrderDb,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl OrderSystem {
    /// Opens the database at `database_url` and starts the system with the default mailbox
    /// size.
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        Self::with_capacity(database_url, DEFAULT_CHANNEL_CAPACITY).await
    }

    pub async fn with_capacity(
        database_url: &str,
        channel_capacity: usize,
    ) -> Result<Self, sqlx::Error> {
        let db = OrderDb::connect(database_url).await?;
        Ok(Self::start(db, channel_capacity))
    }

    /// Starts the actor on an already opened database. Must be called inside a Tokio runtime.
    pub fn start(db: OrderDb, channel_capacity: usize) -> Self {
        let (order_actor, order_client) = order_actor::new(channel_capacity);
        let order_handle = tokio::spawn(order_actor.run(db.clone()));

        info!(channel_capacity, "Order system started");
        Self {
            order_client,
            db,
            handles: vec![order_handle],
        }
    }

    /// Gracefully shuts down the system.
    ///
    /// Dropping the client closes the actor's channel. The actor finishes the requests already
    /// queued and exits, and then the database pool is closed. Clones of the client held
    /// elsewhere keep the actor alive, so drop them first.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if all actors shut down cleanly
    /// - `Err(String)` if any actor task failed or panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");
        drop(self.order_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        self.db.close().await;
        info!("System shutdown complete.");
        Ok(())
    }
}
