//! Person resource.
//!
//! # Data Flow
//! ```text
//! HTTP request
//!     → payload.rs (bind body / path id)
//!     → handlers.rs (fetch, mutate, save through PersonStore)
//!     → http::response (classify outcome into a status)
//! ```

pub mod handlers;
pub mod model;
pub mod payload;

use axum::{routing::get, Router};

use crate::http::server::AppState;

pub use model::{PersonId, PersonInfo};

/// Base path of the person resource.
pub const PERSON_ROUTE: &str = "/api/person";

/// Routes for the person resource, awaiting application state.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            PERSON_ROUTE,
            get(handlers::list_people).post(handlers::create_person),
        )
        .route(
            &format!("{PERSON_ROUTE}/{{id}}"),
            get(handlers::get_person)
                .put(handlers::update_person)
                .delete(handlers::delete_person),
        )
}
