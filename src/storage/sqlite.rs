//! SQLite-backed person store.
//!
//! # Invariants
//! - Returned stores carry the current person schema.
//! - Every store call is one SQL statement, so each commits atomically.
//! - `ID` comes from `AUTOINCREMENT`; deleted ids are never handed out again.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::config::DatabaseConfig;
use crate::person::model::{PersonId, PersonInfo};
use crate::storage::error::{StoreError, StoreResult};
use crate::storage::schema::ensure_schema;
use crate::storage::PersonStore;

const PERSON_SELECT_SQL: &str = "SELECT ID, FirstName, LastName, Gender, Age FROM Person";

/// Person store over a single SQLite connection.
pub struct SqlitePersonStore {
    conn: Mutex<Connection>,
}

impl SqlitePersonStore {
    /// Opens the database described by `config` and ensures the person schema.
    pub fn open(config: &DatabaseConfig) -> StoreResult<Self> {
        let busy_timeout = Duration::from_millis(config.busy_timeout_ms);
        if config.is_in_memory() {
            Self::open_in_memory_with(busy_timeout)
        } else {
            Self::open_path(&config.path, busy_timeout)
        }
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::open_in_memory_with(Duration::from_secs(5))
    }

    /// Opens (or creates) a database file.
    pub fn open_path(path: impl AsRef<Path>, busy_timeout: Duration) -> StoreResult<Self> {
        let path = path.as_ref();
        let started_at = Instant::now();
        let conn = Connection::open(path).inspect_err(|err| {
            tracing::error!(path = %path.display(), error = %err, "Failed to open database");
        })?;
        let store = Self::bootstrap(conn, busy_timeout)?;
        tracing::info!(
            path = %path.display(),
            duration_ms = started_at.elapsed().as_millis() as u64,
            "Database opened"
        );
        Ok(store)
    }

    fn open_in_memory_with(busy_timeout: Duration) -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self::bootstrap(conn, busy_timeout)?;
        tracing::info!("In-memory database opened");
        Ok(store)
    }

    fn bootstrap(mut conn: Connection, busy_timeout: Duration) -> StoreResult<Self> {
        conn.busy_timeout(busy_timeout)?;
        ensure_schema(&mut conn).inspect_err(|err| {
            tracing::error!(error = %err, "Schema setup failed");
        })?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }
}

impl PersonStore for SqlitePersonStore {
    fn list(&self) -> StoreResult<Vec<PersonInfo>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!("{PERSON_SELECT_SQL} ORDER BY ID;"))?;
        let rows = stmt.query_map([], parse_person_row)?;

        let mut people = Vec::new();
        for row in rows {
            people.push(row??);
        }
        Ok(people)
    }

    fn get(&self, id: PersonId) -> StoreResult<Option<PersonInfo>> {
        let conn = self.lock()?;
        let person = conn
            .query_row(
                &format!("{PERSON_SELECT_SQL} WHERE ID = ?1;"),
                params![id],
                parse_person_row,
            )
            .optional()?;

        person.transpose()
    }

    fn insert(&self, person: &PersonInfo) -> StoreResult<PersonInfo> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO Person (FirstName, LastName, Gender, Age) VALUES (?1, ?2, ?3, ?4);",
            params![
                person.first_name.as_deref(),
                person.last_name.as_deref(),
                person.gender.as_deref(),
                person.age,
            ],
        )?;

        let id = to_person_id(conn.last_insert_rowid())?;
        Ok(PersonInfo {
            id,
            ..person.clone()
        })
    }

    fn update(&self, person: &PersonInfo) -> StoreResult<bool> {
        let conn = self.lock()?;
        let changed = conn.execute(
            "UPDATE Person
             SET FirstName = ?1, LastName = ?2, Gender = ?3, Age = ?4
             WHERE ID = ?5;",
            params![
                person.first_name.as_deref(),
                person.last_name.as_deref(),
                person.gender.as_deref(),
                person.age,
                person.id,
            ],
        )?;
        Ok(changed > 0)
    }

    fn delete(&self, id: PersonId) -> StoreResult<bool> {
        let conn = self.lock()?;
        let changed = conn.execute("DELETE FROM Person WHERE ID = ?1;", params![id])?;
        Ok(changed > 0)
    }
}

// The outer result carries driver errors; the inner one catches rows whose
// values do not fit the model.
fn parse_person_row(row: &Row<'_>) -> rusqlite::Result<StoreResult<PersonInfo>> {
    let id: i64 = row.get(0)?;
    let age: i64 = row.get(4)?;
    let first_name: Option<String> = row.get(1)?;
    let last_name: Option<String> = row.get(2)?;
    let gender: Option<String> = row.get(3)?;

    Ok(to_person_id(id).and_then(|id| {
        let age = i32::try_from(age)
            .map_err(|_| StoreError::InvalidData(format!("age {age} out of range for id {id}")))?;
        Ok(PersonInfo {
            id,
            first_name,
            last_name,
            gender,
            age,
        })
    }))
}

fn to_person_id(raw: i64) -> StoreResult<PersonId> {
    PersonId::try_from(raw).map_err(|_| StoreError::InvalidData(format!("id {raw} out of range")))
}
