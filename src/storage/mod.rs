//! Person storage subsystem.
//!
//! # Data Flow
//! ```text
//! DatabaseConfig
//!     → sqlite.rs (open connection, busy timeout)
//!     → schema.rs (create the Person table, check user_version)
//!     → SqlitePersonStore behind Arc<dyn PersonStore>
//!     → handed to handlers through router state
//! ```
//!
//! # Design Decisions
//! - Handlers see only the `PersonStore` trait
//! - Calls are synchronous; the HTTP layer runs them on the blocking pool
//! - No change tracking: updates are explicit read-modify-write

pub mod error;
pub mod schema;
pub mod sqlite;

pub use error::{StoreError, StoreResult};
pub use sqlite::SqlitePersonStore;

use crate::person::model::{PersonId, PersonInfo};

/// Durable collection of person records.
pub trait PersonStore: Send + Sync {
    /// Every stored record.
    fn list(&self) -> StoreResult<Vec<PersonInfo>>;

    /// Point lookup by id.
    fn get(&self, id: PersonId) -> StoreResult<Option<PersonInfo>>;

    /// Inserts a new record and returns it with its assigned id. Any id on
    /// `person` is ignored.
    fn insert(&self, person: &PersonInfo) -> StoreResult<PersonInfo>;

    /// Overwrites the record with `person.id`. Returns false when no row matched.
    fn update(&self, person: &PersonInfo) -> StoreResult<bool>;

    /// Removes the record. Returns false when no row matched.
    fn delete(&self, id: PersonId) -> StoreResult<bool>;
}
