//! People API: a CRUD HTTP service for person records over SQLite.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod person;
pub mod storage;

pub use config::schema::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use person::PersonInfo;
pub use storage::{PersonStore, SqlitePersonStore, StoreError};
