//! Person resource handlers.
//!
//! Each handler receives the store through router state, runs its storage
//! calls on the blocking pool, and classifies the outcome with [`ApiError`].

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::http::response::{empty_on_storage_fault, ApiError};
use crate::http::server::AppState;
use crate::person::model::PersonInfo;
use crate::person::payload::{bind_person, bind_route_id, BoundPerson};
use crate::person::PERSON_ROUTE;
use crate::storage::{PersonStore, StoreError, StoreResult};

/// Runs a synchronous store call on the blocking pool.
async fn with_store<T, F>(state: &AppState, f: F) -> StoreResult<T>
where
    T: Send + 'static,
    F: FnOnce(&dyn PersonStore) -> StoreResult<T> + Send + 'static,
{
    let store = state.store.clone();
    tokio::task::spawn_blocking(move || f(store.as_ref())).await?
}

/// `GET /api/person`
pub async fn list_people(State(state): State<AppState>) -> Response {
    let result = with_store(&state, |store| store.list())
        .await
        .map(Json)
        .map_err(ApiError::from);
    empty_on_storage_fault(result)
}

/// `GET /api/person/{id}`
pub async fn get_person(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<PersonInfo>, ApiError> {
    let id = bind_route_id(&raw_id);
    with_store(&state, move |store| store.get(id))
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// `POST /api/person`
///
/// A property that fails to convert rejects the whole body. The payload id
/// is ignored.
pub async fn create_person(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let bound = bind_person(&body)
        .filter(BoundPerson::is_valid)
        .ok_or(ApiError::BadRequest)?;
    let created = with_store(&state, move |store| store.insert(&bound.person)).await?;

    tracing::debug!(id = created.id, "Person created");

    let location = format!("{PERSON_ROUTE}/{}", created.id);
    let mut response = (StatusCode::CREATED, Json(created)).into_response();
    if let Ok(value) = HeaderValue::from_str(&location) {
        response.headers_mut().insert(header::LOCATION, value);
    }
    Ok(response)
}

/// `PUT /api/person/{id}`
///
/// The record is looked up by the `ID` inside the payload; the path segment
/// is not used for the lookup. An unconvertible `ID` is a bad request; any
/// other field error is answered with 204 and nothing is written. A row that
/// disappears between lookup and write is a storage fault.
pub async fn update_person(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let bound = bind_person(&body)
        .filter(|bound| !bound.has_error_on("ID"))
        .ok_or(ApiError::BadRequest)?;
    let target = bound.person.id;

    if bind_route_id(&raw_id) != target {
        tracing::debug!(path_id = %raw_id, payload_id = target, "Update keyed by payload id");
    }

    let existing = with_store(&state, move |store| store.get(target))
        .await?
        .ok_or(ApiError::NotFound)?;

    if bound.is_valid() {
        let mut record = existing;
        record.overwrite_details(&bound.person);
        if !with_store(&state, move |store| store.update(&record)).await? {
            return Err(StoreError::Vanished(target).into());
        }
    } else {
        tracing::debug!(
            id = target,
            errors = bound.errors.len(),
            "Update payload invalid; nothing written"
        );
    }

    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /api/person/{id}`
pub async fn delete_person(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = bind_route_id(&raw_id);

    with_store(&state, move |store| store.get(id))
        .await?
        .ok_or(ApiError::NotFound)?;
    with_store(&state, move |store| store.delete(id)).await?;

    Ok(StatusCode::NO_CONTENT)
}
