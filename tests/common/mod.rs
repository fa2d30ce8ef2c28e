//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{
    body::{to_bytes, Body, Bytes},
    http::{HeaderMap, Method, Request, StatusCode},
    Router,
};
use people_api::http::{build_router, AppState};
use people_api::person::{PersonId, PersonInfo};
use people_api::storage::{PersonStore, SqlitePersonStore, StoreError, StoreResult};
use tower::ServiceExt;

/// A response reduced to the parts tests look at.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("response body is JSON")
    }

    pub fn person(&self) -> PersonInfo {
        serde_json::from_slice(&self.body).expect("response body is a person")
    }
}

/// Router over a fresh in-memory SQLite store.
pub fn sqlite_app() -> Router {
    let store = SqlitePersonStore::open_in_memory().expect("in-memory store opens");
    build_router(AppState::new(Arc::new(store)))
}

/// Router over an arbitrary store.
pub fn app_with(store: Arc<dyn PersonStore>) -> Router {
    build_router(AppState::new(store))
}

/// Send one request through the router.
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header("content-type", "application/json");
    }
    let request = builder
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    TestResponse {
        status,
        headers,
        body,
    }
}

/// Create a person through the API and return the stored record.
pub async fn create(app: &Router, first: &str, last: &str, gender: &str, age: i32) -> PersonInfo {
    let body = serde_json::json!({
        "FirstName": first,
        "LastName": last,
        "Gender": gender,
        "Age": age,
    })
    .to_string();
    let res = send(app, Method::POST, "/api/person", Some(&body)).await;
    assert_eq!(res.status, StatusCode::CREATED);
    res.person()
}

/// A store whose every call fails, counting the calls it receives.
#[derive(Default)]
pub struct FailingStore {
    pub calls: AtomicUsize,
}

impl FailingStore {
    fn fail<T>(&self) -> StoreResult<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::InvalidData("storage offline".to_string()))
    }
}

impl PersonStore for FailingStore {
    fn list(&self) -> StoreResult<Vec<PersonInfo>> {
        self.fail()
    }

    fn get(&self, _id: PersonId) -> StoreResult<Option<PersonInfo>> {
        self.fail()
    }

    fn insert(&self, _person: &PersonInfo) -> StoreResult<PersonInfo> {
        self.fail()
    }

    fn update(&self, _person: &PersonInfo) -> StoreResult<bool> {
        self.fail()
    }

    fn delete(&self, _id: PersonId) -> StoreResult<bool> {
        self.fail()
    }
}

/// A store whose rows disappear between lookup and write: `get` finds the
/// record, `update` and `delete` match nothing.
pub struct VanishingStore {
    pub person: PersonInfo,
}

impl PersonStore for VanishingStore {
    fn list(&self) -> StoreResult<Vec<PersonInfo>> {
        Ok(Vec::new())
    }

    fn get(&self, id: PersonId) -> StoreResult<Option<PersonInfo>> {
        Ok((id == self.person.id).then(|| self.person.clone()))
    }

    fn insert(&self, person: &PersonInfo) -> StoreResult<PersonInfo> {
        Ok(person.clone())
    }

    fn update(&self, _person: &PersonInfo) -> StoreResult<bool> {
        Ok(false)
    }

    fn delete(&self, _id: PersonId) -> StoreResult<bool> {
        Ok(false)
    }
}
