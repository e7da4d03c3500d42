use actor_framework::{ActorEntity, FrameworkError, ResourceActor};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

// --- Test Entity ---

#[derive(Clone, Debug, PartialEq)]
struct Shipment {
    id: u32,
    carrier: String,
    delivered: bool,
    notes: Vec<String>,
}

#[derive(Debug)]
struct ShipmentCreate {
    carrier: String,
}

#[derive(Debug)]
struct ShipmentUpdate {
    carrier: Option<String>,
}

#[derive(Debug)]
enum ShipmentAction {
    Deliver,
    /// Appends the note, then fails if it is empty.
    Annotate(String),
}

#[derive(Debug, thiserror::Error, PartialEq)]
enum ShipmentError {
    #[error("carrier must not be empty")]
    NoCarrier,
    #[error("empty note")]
    EmptyNote,
    #[error("shipment table is offline")]
    Offline,
}

/// Rows plus the next id, shared so a table can outlive the actor that writes it.
#[derive(Default)]
struct Table {
    rows: BTreeMap<u32, Shipment>,
    last_id: u32,
    offline: bool,
}

#[derive(Clone, Default)]
struct ShipmentTable(Arc<Mutex<Table>>);

impl ShipmentTable {
    fn with<R>(&self, f: impl FnOnce(&mut Table) -> R) -> Result<R, ShipmentError> {
        let mut table = self.0.lock().unwrap();
        if table.offline {
            return Err(ShipmentError::Offline);
        }
        Ok(f(&mut table))
    }

    fn set_offline(&self, offline: bool) {
        self.0.lock().unwrap().offline = offline;
    }
}

#[async_trait]
impl ActorEntity for Shipment {
    type Id = u32;
    type Create = ShipmentCreate;
    type Update = ShipmentUpdate;
    type Action = ShipmentAction;
    type ActionResult = bool;
    type Filter = String;
    type Context = ShipmentTable;
    type Error = ShipmentError;

    fn from_create_params(params: ShipmentCreate) -> Result<Self, Self::Error> {
        if params.carrier.is_empty() {
            return Err(ShipmentError::NoCarrier);
        }
        Ok(Self {
            id: 0,
            carrier: params.carrier,
            delivered: false,
            notes: Vec::new(),
        })
    }

    fn matches(&self, carrier: &String) -> bool {
        &self.carrier == carrier
    }

    async fn on_update(
        &mut self,
        update: ShipmentUpdate,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        if let Some(carrier) = update.carrier {
            if carrier.is_empty() {
                return Err(ShipmentError::NoCarrier);
            }
            self.carrier = carrier;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: ShipmentAction,
        _ctx: &Self::Context,
    ) -> Result<bool, Self::Error> {
        match action {
            ShipmentAction::Deliver => {
                let changed = !self.delivered;
                self.delivered = true;
                Ok(changed)
            }
            ShipmentAction::Annotate(note) => {
                self.notes.push(note.clone());
                if note.is_empty() {
                    return Err(ShipmentError::EmptyNote);
                }
                Ok(true)
            }
        }
    }

    async fn load(id: &u32, table: &ShipmentTable) -> Result<Option<Self>, Self::Error> {
        table.with(|t| t.rows.get(id).cloned())
    }

    async fn load_all(table: &ShipmentTable) -> Result<Vec<Self>, Self::Error> {
        table.with(|t| t.rows.values().cloned().collect())
    }

    async fn insert(&mut self, table: &ShipmentTable) -> Result<u32, Self::Error> {
        table.with(|t| {
            t.last_id += 1;
            self.id = t.last_id;
            t.rows.insert(self.id, self.clone());
            self.id
        })
    }

    async fn save(&mut self, table: &ShipmentTable) -> Result<(), Self::Error> {
        table.with(|t| {
            t.rows.insert(self.id, self.clone());
        })
    }

    async fn remove(&self, table: &ShipmentTable) -> Result<(), Self::Error> {
        table.with(|t| {
            t.rows.remove(&self.id);
        })
    }
}

fn create(carrier: &str) -> ShipmentCreate {
    ShipmentCreate {
        carrier: carrier.into(),
    }
}

fn entity_error(err: FrameworkError) -> ShipmentError {
    match err {
        FrameworkError::EntityError(inner) => *inner
            .downcast::<ShipmentError>()
            .expect("entity error should be a ShipmentError"),
        other => panic!("expected an entity error, got {other:?}"),
    }
}

// --- Tests ---

#[tokio::test]
async fn test_framework_full_lifecycle() {
    let (actor, client) = ResourceActor::new(10);
    tokio::spawn(actor.run(ShipmentTable::default()));

    // 1. Create returns the stored entity with the first id
    let shipment: Shipment = client.create(create("dhl")).await.unwrap();
    assert_eq!(shipment.id, 1);
    assert_eq!(shipment.carrier, "dhl");

    // 2. Action mutates and persists
    let changed = client
        .perform_action(shipment.id, ShipmentAction::Deliver)
        .await
        .unwrap();
    assert!(changed);
    let stored = client.get(shipment.id).await.unwrap().unwrap();
    assert!(stored.delivered);

    // 3. Repeating the action is a no-op
    let changed_again = client
        .perform_action(shipment.id, ShipmentAction::Deliver)
        .await
        .unwrap();
    assert!(!changed_again);

    // 4. Update
    let updated = client
        .update(
            shipment.id,
            ShipmentUpdate {
                carrier: Some("ups".into()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.carrier, "ups");

    // 5. Delete
    client.delete(shipment.id).await.unwrap();
    assert!(client.get(shipment.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_returns_creation_order_and_applies_filter() {
    let (actor, client) = ResourceActor::<Shipment>::new(10);
    tokio::spawn(actor.run(ShipmentTable::default()));

    for carrier in ["dhl", "ups", "dhl", "fedex"] {
        client.create(create(carrier)).await.unwrap();
    }

    let all = client.list(None).await.unwrap();
    let ids: Vec<u32> = all.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);

    let dhl = client.list(Some("dhl".to_string())).await.unwrap();
    let ids: Vec<u32> = dhl.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![1, 3]);

    let none = client.list(Some("post".to_string())).await.unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_failed_hooks_leave_store_unchanged() {
    let (actor, client) = ResourceActor::<Shipment>::new(10);
    tokio::spawn(actor.run(ShipmentTable::default()));

    let shipment = client.create(create("dhl")).await.unwrap();

    let err = client
        .perform_action(shipment.id, ShipmentAction::Annotate(String::new()))
        .await
        .unwrap_err();
    assert_eq!(entity_error(err), ShipmentError::EmptyNote);
    let stored = client.get(shipment.id).await.unwrap().unwrap();
    assert!(stored.notes.is_empty());

    let err = client
        .update(
            shipment.id,
            ShipmentUpdate {
                carrier: Some(String::new()),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(entity_error(err), ShipmentError::NoCarrier);
    assert_eq!(client.get(shipment.id).await.unwrap().unwrap(), stored);
}

#[tokio::test]
async fn test_rejected_create_stores_nothing() {
    let (actor, client) = ResourceActor::<Shipment>::new(10);
    tokio::spawn(actor.run(ShipmentTable::default()));

    let err = client.create(create("")).await.unwrap_err();
    assert_eq!(entity_error(err), ShipmentError::NoCarrier);
    assert!(client.list(None).await.unwrap().is_empty());

    let shipment = client.create(create("ups")).await.unwrap();
    assert_eq!(shipment.id, 1);
}

#[tokio::test]
async fn test_records_outlive_the_actor() {
    let table = ShipmentTable::default();

    let (actor, client) = ResourceActor::<Shipment>::new(10);
    let handle = tokio::spawn(actor.run(table.clone()));
    let shipment = client.create(create("dhl")).await.unwrap();
    client
        .perform_action(shipment.id, ShipmentAction::Deliver)
        .await
        .unwrap();
    drop(client);
    handle.await.unwrap();

    let (actor, client) = ResourceActor::<Shipment>::new(10);
    tokio::spawn(actor.run(table));
    let stored = client.get(shipment.id).await.unwrap().unwrap();
    assert_eq!(stored.carrier, "dhl");
    assert!(stored.delivered);
}

#[tokio::test]
async fn test_storage_failures_are_entity_errors() {
    let table = ShipmentTable::default();
    let (actor, client) = ResourceActor::<Shipment>::new(10);
    tokio::spawn(actor.run(table.clone()));

    let shipment = client.create(create("dhl")).await.unwrap();
    table.set_offline(true);

    let err = client.get(shipment.id).await.unwrap_err();
    assert_eq!(entity_error(err), ShipmentError::Offline);
    let err = client.create(create("ups")).await.unwrap_err();
    assert_eq!(entity_error(err), ShipmentError::Offline);

    table.set_offline(false);
    assert_eq!(client.list(None).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_missing_ids_report_not_found() {
    let (actor, client) = ResourceActor::<Shipment>::new(10);
    tokio::spawn(actor.run(ShipmentTable::default()));

    assert!(client.get(9).await.unwrap().is_none());
    assert!(matches!(
        client.delete(9).await,
        Err(FrameworkError::NotFound(id)) if id == "9"
    ));
    assert!(matches!(
        client.update(9, ShipmentUpdate { carrier: None }).await,
        Err(FrameworkError::NotFound(_))
    ));
    assert!(matches!(
        client.perform_action(9, ShipmentAction::Deliver).await,
        Err(FrameworkError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_actor_exits_when_clients_dropped() {
    let (actor, client) = ResourceActor::<Shipment>::new(10);
    let handle = tokio::spawn(actor.run(ShipmentTable::default()));

    client.create(create("dhl")).await.unwrap();
    drop(client);

    handle.await.unwrap();
}
