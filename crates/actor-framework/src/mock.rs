//! # Mock Clients for Testing
//!
//! `MockClient<T>` hands out a real `ResourceClient<T>` whose requests are answered from a
//! queue of expectations instead of a running actor. Use it to unit test domain client logic
//! (error mapping, result unpacking) without spawning an actor or opening its storage.
//!
//! | | MockClient | Real Actor |
//! |---------|------------|------------|
//! | **State** | None, answers are scripted | Whatever the persistence hooks read |
//! | **Error injection** | `return_err` | Needs the right stored state |
//! | **Use case** | Logic *around* the client | The entity hooks or the full system |
//!
//! ```rust
//! use actor_framework::mock::MockClient;
//! use actor_framework::{ActorEntity, FrameworkError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Ticket { id: u32 }
//! #[derive(Debug)] struct TicketCreate;
//! #[derive(Debug)] struct TicketUpdate;
//! #[derive(Debug)] enum TicketAction {}
//! #[derive(Debug, thiserror::Error)] #[error("Err")] struct TicketError;
//!
//! #[async_trait]
//! impl ActorEntity for Ticket {
//!     type Id = u32; type Create = TicketCreate; type Update = TicketUpdate;
//!     type Action = TicketAction; type ActionResult = (); type Filter = ();
//!     type Context = (); type Error = TicketError;
//!     fn from_create_params(_: TicketCreate) -> Result<Self, Self::Error> { Ok(Self { id: 0 }) }
//!     async fn on_update(&mut self, _: TicketUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_action(&mut self, _: TicketAction, _: &()) -> Result<(), Self::Error> { Ok(()) }
//!     // Never reached: the mock answers every request itself.
//!     async fn load(_: &u32, _: &()) -> Result<Option<Self>, Self::Error> { Ok(None) }
//!     async fn load_all(_: &()) -> Result<Vec<Self>, Self::Error> { Ok(Vec::new()) }
//!     async fn insert(&mut self, _: &()) -> Result<u32, Self::Error> { Ok(self.id) }
//!     async fn save(&mut self, _: &()) -> Result<(), Self::Error> { Ok(()) }
//!     async fn remove(&self, _: &()) -> Result<(), Self::Error> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Ticket>::new();
//!     let client = mock.client();
//!
//!     mock.expect_get(1).return_err(FrameworkError::ActorClosed);
//!
//!     let result = client.get(1).await;
//!     assert!(matches!(result, Err(FrameworkError::ActorClosed)));
//!     mock.verify();
//! }
//! ```
//!
//! For assertions on the request payload itself, [`create_mock_client`] returns the raw
//! receiver, and the `expect_*` helpers pull the next request off it.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// A scripted answer for the next request. Ids are recorded for failure messages only.
enum Expectation<T: ActorEntity> {
    Create {
        response: Result<T, FrameworkError>,
    },
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    List {
        response: Result<Vec<T>, FrameworkError>,
    },
    Update {
        id: T::Id,
        response: Result<T, FrameworkError>,
    },
    Delete {
        id: T::Id,
        response: Result<(), FrameworkError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, FrameworkError>,
    },
}

impl<T: ActorEntity> Expectation<T> {
    fn describe(&self) -> String {
        match self {
            Expectation::Create { .. } => "Create".to_string(),
            Expectation::Get { id, .. } => format!("Get({id})"),
            Expectation::List { .. } => "List".to_string(),
            Expectation::Update { id, .. } => format!("Update({id})"),
            Expectation::Delete { id, .. } => format!("Delete({id})"),
            Expectation::Action { id, .. } => format!("Action({id})"),
        }
    }
}

fn request_kind<T: ActorEntity>(request: &ResourceRequest<T>) -> &'static str {
    match request {
        ResourceRequest::Create { .. } => "Create",
        ResourceRequest::Get { .. } => "Get",
        ResourceRequest::List { .. } => "List",
        ResourceRequest::Update { .. } => "Update",
        ResourceRequest::Delete { .. } => "Delete",
        ResourceRequest::Action { .. } => "Action",
    }
}

type Expectations<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock client with expectation tracking.
///
/// Expectations are answered in the order they were registered. A request that does not
/// match the next expectation panics the mock task, which surfaces in the test as
/// `FrameworkError::ActorDropped`.
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Expectations<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Expectations<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = queue.lock().unwrap().pop_front();

                match (request, expectation) {
                    (
                        ResourceRequest::Create { respond_to, .. },
                        Some(Expectation::Create { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Get { respond_to, .. },
                        Some(Expectation::Get { response, .. }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::List { respond_to, .. },
                        Some(Expectation::List { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Update { respond_to, .. },
                        Some(Expectation::Update { response, .. }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Delete { respond_to, .. },
                        Some(Expectation::Delete { response, .. }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Action { respond_to, .. },
                        Some(Expectation::Action { response, .. }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (request, expectation) => {
                        panic!(
                            "Unexpected {} request, expected {}",
                            request_kind(&request),
                            expectation.map_or("nothing".to_string(), |e| e.describe())
                        );
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T> {
        self.builder(|response| Expectation::Create { response })
    }

    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.builder(move |response| Expectation::Get { id, response })
    }

    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(|response| Expectation::List { response })
    }

    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        self.builder(move |response| Expectation::Update { id, response })
    }

    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<T, ()> {
        self.builder(move |response| Expectation::Delete { id, response })
    }

    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        self.builder(move |response| Expectation::Action { id, response })
    }

    fn builder<R>(
        &self,
        make: impl FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send + 'static,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            make: Box::new(make),
            expectations: self.expectations.clone(),
        }
    }

    /// Panics if any registered expectation was not consumed.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            let pending: Vec<String> = exps.iter().map(Expectation::describe).collect();
            panic!(
                "Not all expectations were met. {} remaining: {:?}",
                exps.len(),
                pending
            );
        }
    }
}

/// Completes an expectation with the answer the mock should give.
pub struct ExpectationBuilder<T: ActorEntity, R> {
    make: Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send>,
    expectations: Expectations<T>,
}

impl<T: ActorEntity, R> ExpectationBuilder<T, R> {
    /// Answer with a successful result.
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    /// Answer with an error.
    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, FrameworkError>) {
        let expectation = (self.make)(response);
        self.expectations.lock().unwrap().push_back(expectation);
    }
}

// =============================================================================
// RAW CHANNEL HELPERS
// =============================================================================

/// Creates a client and the receiver its requests arrive on.
///
/// The test plays the actor: it pulls requests with the `expect_*` helpers, asserts on their
/// payloads and answers through the returned responder.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Next request, if it is a Create.
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, oneshot::Sender<Result<T, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Next request, if it is a Get.
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<Option<T>, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Next request, if it is a List.
pub async fn expect_list<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    Option<T::Filter>,
    oneshot::Sender<Result<Vec<T>, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::List { filter, respond_to }) => Some((filter, respond_to)),
        _ => None,
    }
}

/// Next request, if it is an Action.
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    oneshot::Sender<Result<T::ActionResult, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Account {
        id: u32,
        owner: String,
    }

    #[derive(Debug)]
    struct AccountCreate {
        owner: String,
    }

    #[derive(Debug)]
    struct AccountUpdate {
        owner: String,
    }

    #[derive(Debug, PartialEq)]
    enum AccountAction {
        Freeze,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("Account error")]
    struct AccountError;

    #[async_trait]
    impl ActorEntity for Account {
        type Id = u32;
        type Create = AccountCreate;
        type Update = AccountUpdate;
        type Action = AccountAction;
        type ActionResult = bool;
        type Filter = String;
        type Context = ();
        type Error = AccountError;

        fn from_create_params(params: AccountCreate) -> Result<Self, Self::Error> {
            Ok(Self {
                id: 0,
                owner: params.owner,
            })
        }

        async fn on_update(
            &mut self,
            update: AccountUpdate,
            _ctx: &Self::Context,
        ) -> Result<(), Self::Error> {
            self.owner = update.owner;
            Ok(())
        }

        async fn handle_action(
            &mut self,
            _action: AccountAction,
            _ctx: &Self::Context,
        ) -> Result<bool, Self::Error> {
            Ok(true)
        }

        // The mock answers for the actor, so persistence is never reached.

        async fn load(_id: &u32, _ctx: &()) -> Result<Option<Self>, Self::Error> {
            Err(AccountError)
        }

        async fn load_all(_ctx: &()) -> Result<Vec<Self>, Self::Error> {
            Err(AccountError)
        }

        async fn insert(&mut self, _ctx: &()) -> Result<u32, Self::Error> {
            Err(AccountError)
        }

        async fn save(&mut self, _ctx: &()) -> Result<(), Self::Error> {
            Err(AccountError)
        }

        async fn remove(&self, _ctx: &()) -> Result<(), Self::Error> {
            Err(AccountError)
        }
    }

    fn account(id: u32, owner: &str) -> Account {
        Account {
            id,
            owner: owner.to_string(),
        }
    }

    #[tokio::test]
    async fn test_raw_channel_create() {
        let (client, mut receiver) = create_mock_client::<Account>(10);

        let create_task = tokio::spawn(async move {
            client
                .create(AccountCreate {
                    owner: "ada".to_string(),
                })
                .await
        });

        let (payload, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(payload.owner, "ada");
        responder.send(Ok(account(7, "ada"))).unwrap();

        let created = create_task.await.unwrap().unwrap();
        assert_eq!(created, account(7, "ada"));
    }

    #[tokio::test]
    async fn test_raw_channel_list_forwards_filter() {
        let (client, mut receiver) = create_mock_client::<Account>(10);

        let list_task = tokio::spawn(async move { client.list(Some("ada".to_string())).await });

        let (filter, responder) = expect_list(&mut receiver)
            .await
            .expect("Expected List request");
        assert_eq!(filter.as_deref(), Some("ada"));
        responder.send(Ok(vec![account(1, "ada")])).unwrap();

        assert_eq!(list_task.await.unwrap().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_raw_channel_get_and_action() {
        let (client, mut receiver) = create_mock_client::<Account>(10);

        let task = tokio::spawn(async move {
            let found = client.get(4).await;
            let frozen = client.perform_action(4, AccountAction::Freeze).await;
            (found, frozen)
        });

        let (id, responder) = expect_get(&mut receiver)
            .await
            .expect("Expected Get request");
        assert_eq!(id, 4);
        responder.send(Ok(Some(account(4, "bob")))).unwrap();

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, 4);
        assert_eq!(action, AccountAction::Freeze);
        responder.send(Ok(true)).unwrap();

        let (found, frozen) = task.await.unwrap();
        assert_eq!(found.unwrap(), Some(account(4, "bob")));
        assert!(frozen.unwrap());
    }

    #[tokio::test]
    async fn test_raw_channel_helpers_reject_other_requests() {
        let (client, mut receiver) = create_mock_client::<Account>(10);

        tokio::spawn(async move { client.list(None).await });

        assert!(expect_get(&mut receiver).await.is_none());
    }

    #[tokio::test]
    async fn test_mock_client_with_expectations() {
        let mut mock = MockClient::<Account>::new();

        mock.expect_create().return_ok(account(1, "ada"));
        mock.expect_get(1).return_ok(Some(account(1, "ada")));
        mock.expect_list().return_ok(vec![account(1, "ada")]);
        mock.expect_update(1).return_ok(account(1, "grace"));
        mock.expect_action(1).return_err(FrameworkError::ActorClosed);
        mock.expect_delete(1).return_err(FrameworkError::NotFound("1".to_string()));

        let client = mock.client();

        let created = client
            .create(AccountCreate {
                owner: "ada".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(created.id, 1);

        let fetched = client.get(1).await.unwrap();
        assert_eq!(fetched, Some(account(1, "ada")));

        let all = client.list(None).await.unwrap();
        assert_eq!(all.len(), 1);

        let updated = client
            .update(
                1,
                AccountUpdate {
                    owner: "grace".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.owner, "grace");

        let frozen = client.perform_action(1, AccountAction::Freeze).await;
        assert!(matches!(frozen, Err(FrameworkError::ActorClosed)));

        let deleted = client.delete(1).await;
        assert!(matches!(deleted, Err(FrameworkError::NotFound(id)) if id == "1"));

        mock.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "Not all expectations were met")]
    async fn test_verify_reports_unused_expectations() {
        let mut mock = MockClient::<Account>::new();
        mock.expect_get(3).return_ok(None);
        mock.verify();
    }
}
