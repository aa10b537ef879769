#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use organizeja_api::store::{LedgerStore, MemoryLedgerStore, StoreResult};
use organizeja_api::{app, AppState};
use postgres_models::{
    Account, Budget, BudgetChanges, DbError, NewAccount, NewBudget, NewTransaction, Transaction,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

pub const VERIFY_TOKEN: &str = "SECRET";

/// Router wired to an in-memory ledger, driven without a socket.
pub struct TestApp {
    router: Router,
    pub store: Arc<dyn LedgerStore>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryLedgerStore::new()), Some(VERIFY_TOKEN))
    }

    pub fn without_verify_token() -> Self {
        Self::with_store(Arc::new(MemoryLedgerStore::new()), None)
    }

    pub fn with_store(store: Arc<dyn LedgerStore>, verify_token: Option<&str>) -> Self {
        let state = AppState::with_store(store.clone(), verify_token.map(str::to_string));
        Self {
            router: app(state),
            store,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");

        TestResponse {
            status,
            headers,
            body: body.to_vec(),
        }
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");
        self.send(request).await
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn put_json(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.request(Method::DELETE, uri, None).await
    }

    /// POST a raw body to the webhook.
    pub async fn post_webhook_raw(&self, body: impl Into<Body>) -> TestResponse {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/webhook")
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.into())
            .expect("Failed to build request");
        self.send(request).await
    }

    /// Deliver a text message the way the provider does.
    pub async fn deliver_text(&self, from: &str, text: &str) -> TestResponse {
        self.post_json("/webhook", TestData::text_message(from, text))
            .await
    }

    pub async fn handshake(&self, verify_token: &str, challenge: &str) -> TestResponse {
        self.get(&format!(
            "/webhook?hub.mode=subscribe&hub.verify_token={verify_token}&hub.challenge={challenge}"
        ))
        .await
    }

    /// Create an account straight in the store, optionally linked to `phone`.
    pub async fn account(&self, phone: Option<&str>) -> Account {
        let account = self
            .store
            .upsert_profile(NewAccount {
                id: Uuid::new_v4(),
                full_name: Some("Test User".to_string()),
            })
            .await
            .expect("Failed to create account");

        match phone {
            Some(phone) => self
                .store
                .set_phone_number(account.id, Some(phone.to_string()))
                .await
                .expect("Failed to link phone")
                .expect("account exists"),
            None => account,
        }
    }

    pub async fn transactions(&self, account_id: Uuid) -> Vec<Transaction> {
        self.store
            .list_transactions(account_id)
            .await
            .expect("Failed to list transactions")
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or_else(|e| {
            panic!("Response is not JSON ({e}): {}", self.text())
        })
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Assert a 200 acknowledgment carrying `token`.
    pub fn assert_ack(&self, token: &str) {
        assert_eq!(
            self.status,
            StatusCode::OK,
            "Expected 200 OK, got {}: {}",
            self.status,
            self.text()
        );
        assert_eq!(self.text(), token);
    }
}

/// Test data generators
pub struct TestData;

static PHONE_SEQUENCE: AtomicU64 = AtomicU64::new(0);

impl TestData {
    /// A fresh, valid 13-digit Brazilian mobile number.
    pub fn unique_phone() -> String {
        let n = PHONE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
        format!("55119{:08}", n % 100_000_000)
    }

    pub fn envelope(message: Value) -> Value {
        json!({
            "object": "whatsapp_business_account",
            "entry": [{
                "id": "102290129340398",
                "changes": [{
                    "field": "messages",
                    "value": {
                        "messaging_product": "whatsapp",
                        "metadata": { "phone_number_id": "106540352242922" },
                        "messages": [message]
                    }
                }]
            }]
        })
    }

    pub fn text_message(from: &str, body: &str) -> Value {
        Self::envelope(json!({
            "from": from,
            "id": format!("wamid.{}", Uuid::new_v4().simple()),
            "timestamp": "1760000000",
            "type": "text",
            "text": { "body": body }
        }))
    }
}

/// Store whose writes always fail, for exercising the insert error path.
pub struct FailingWrites {
    pub inner: MemoryLedgerStore,
}

impl FailingWrites {
    pub fn new() -> Self {
        Self {
            inner: MemoryLedgerStore::new(),
        }
    }

    fn refused() -> organizeja_api::store::StoreError {
        DbError::Connection("connection reset by peer".to_string()).into()
    }
}

#[async_trait]
impl LedgerStore for FailingWrites {
    async fn find_account(&self, id: Uuid) -> StoreResult<Option<Account>> {
        self.inner.find_account(id).await
    }

    async fn account_ids_by_phone(&self, phone_number: &str, limit: usize) -> StoreResult<Vec<Uuid>> {
        self.inner.account_ids_by_phone(phone_number, limit).await
    }

    async fn upsert_profile(&self, new_account: NewAccount) -> StoreResult<Account> {
        self.inner.upsert_profile(new_account).await
    }

    async fn set_phone_number(
        &self,
        account_id: Uuid,
        phone_number: Option<String>,
    ) -> StoreResult<Option<Account>> {
        self.inner.set_phone_number(account_id, phone_number).await
    }

    async fn insert_transaction(&self, _new_transaction: NewTransaction) -> StoreResult<Transaction> {
        Err(Self::refused())
    }

    async fn list_transactions(&self, account_id: Uuid) -> StoreResult<Vec<Transaction>> {
        self.inner.list_transactions(account_id).await
    }

    async fn delete_transaction(&self, _account_id: Uuid, _id: Uuid) -> StoreResult<bool> {
        Err(Self::refused())
    }

    async fn insert_budget(&self, _new_budget: NewBudget) -> StoreResult<Budget> {
        Err(Self::refused())
    }

    async fn list_budgets(&self, account_id: Uuid) -> StoreResult<Vec<Budget>> {
        self.inner.list_budgets(account_id).await
    }

    async fn update_budget(
        &self,
        _account_id: Uuid,
        _id: Uuid,
        _changes: BudgetChanges,
    ) -> StoreResult<Option<Budget>> {
        Err(Self::refused())
    }

    async fn delete_budget(&self, _account_id: Uuid, _id: Uuid) -> StoreResult<bool> {
        Err(Self::refused())
    }
}

/// Store that answers every phone lookup with the same two accounts.
pub struct DuplicatePhones {
    pub inner: MemoryLedgerStore,
}

#[async_trait]
impl LedgerStore for DuplicatePhones {
    async fn find_account(&self, id: Uuid) -> StoreResult<Option<Account>> {
        self.inner.find_account(id).await
    }

    async fn account_ids_by_phone(&self, _phone_number: &str, limit: usize) -> StoreResult<Vec<Uuid>> {
        Ok(vec![Uuid::new_v4(), Uuid::new_v4()].into_iter().take(limit).collect())
    }

    async fn upsert_profile(&self, new_account: NewAccount) -> StoreResult<Account> {
        self.inner.upsert_profile(new_account).await
    }

    async fn set_phone_number(
        &self,
        account_id: Uuid,
        phone_number: Option<String>,
    ) -> StoreResult<Option<Account>> {
        self.inner.set_phone_number(account_id, phone_number).await
    }

    async fn insert_transaction(&self, new_transaction: NewTransaction) -> StoreResult<Transaction> {
        self.inner.insert_transaction(new_transaction).await
    }

    async fn list_transactions(&self, account_id: Uuid) -> StoreResult<Vec<Transaction>> {
        self.inner.list_transactions(account_id).await
    }

    async fn delete_transaction(&self, account_id: Uuid, id: Uuid) -> StoreResult<bool> {
        self.inner.delete_transaction(account_id, id).await
    }

    async fn insert_budget(&self, new_budget: NewBudget) -> StoreResult<Budget> {
        self.inner.insert_budget(new_budget).await
    }

    async fn list_budgets(&self, account_id: Uuid) -> StoreResult<Vec<Budget>> {
        self.inner.list_budgets(account_id).await
    }

    async fn update_budget(
        &self,
        account_id: Uuid,
        id: Uuid,
        changes: BudgetChanges,
    ) -> StoreResult<Option<Budget>> {
        self.inner.update_budget(account_id, id, changes).await
    }

    async fn delete_budget(&self, account_id: Uuid, id: Uuid) -> StoreResult<bool> {
        self.inner.delete_budget(account_id, id).await
    }
}

/// Store whose phone lookup panics, for exercising a crashed pipeline.
pub struct PanickingLookup {
    pub inner: MemoryLedgerStore,
}

impl PanickingLookup {
    pub fn new() -> Self {
        Self {
            inner: MemoryLedgerStore::new(),
        }
    }
}

#[async_trait]
impl LedgerStore for PanickingLookup {
    async fn find_account(&self, id: Uuid) -> StoreResult<Option<Account>> {
        self.inner.find_account(id).await
    }

    async fn account_ids_by_phone(&self, phone_number: &str, _limit: usize) -> StoreResult<Vec<Uuid>> {
        panic!("lookup for {phone_number} crashed");
    }

    async fn upsert_profile(&self, new_account: NewAccount) -> StoreResult<Account> {
        self.inner.upsert_profile(new_account).await
    }

    async fn set_phone_number(
        &self,
        account_id: Uuid,
        phone_number: Option<String>,
    ) -> StoreResult<Option<Account>> {
        self.inner.set_phone_number(account_id, phone_number).await
    }

    async fn insert_transaction(&self, new_transaction: NewTransaction) -> StoreResult<Transaction> {
        self.inner.insert_transaction(new_transaction).await
    }

    async fn list_transactions(&self, account_id: Uuid) -> StoreResult<Vec<Transaction>> {
        self.inner.list_transactions(account_id).await
    }

    async fn delete_transaction(&self, account_id: Uuid, id: Uuid) -> StoreResult<bool> {
        self.inner.delete_transaction(account_id, id).await
    }

    async fn insert_budget(&self, new_budget: NewBudget) -> StoreResult<Budget> {
        self.inner.insert_budget(new_budget).await
    }

    async fn list_budgets(&self, account_id: Uuid) -> StoreResult<Vec<Budget>> {
        self.inner.list_budgets(account_id).await
    }

    async fn update_budget(
        &self,
        account_id: Uuid,
        id: Uuid,
        changes: BudgetChanges,
    ) -> StoreResult<Option<Budget>> {
        self.inner.update_budget(account_id, id, changes).await
    }

    async fn delete_budget(&self, account_id: Uuid, id: Uuid) -> StoreResult<bool> {
        self.inner.delete_budget(account_id, id).await
    }
}
