//! Person table schema, stamped into `PRAGMA user_version`.
//!
//! A database at [`SCHEMA_VERSION`] is used as-is; an unstamped one gets the
//! table created; anything newer is refused.

use rusqlite::Connection;

use crate::storage::error::{StoreError, StoreResult};

pub const SCHEMA_VERSION: u32 = 1;

const PERSON_TABLE: &str = include_str!("person.sql");

/// Creates the person table unless the database already carries it.
pub fn ensure_schema(conn: &mut Connection) -> StoreResult<()> {
    match schema_version(conn)? {
        SCHEMA_VERSION => Ok(()),
        found if found > SCHEMA_VERSION => Err(StoreError::UnsupportedSchemaVersion {
            db_version: found,
            latest_supported: SCHEMA_VERSION,
        }),
        found => {
            let tx = conn.transaction()?;
            tx.execute_batch(PERSON_TABLE)?;
            tx.pragma_update(None, "user_version", SCHEMA_VERSION)?;
            tx.commit()?;
            tracing::debug!(from = found, to = SCHEMA_VERSION, "Person schema created");
            Ok(())
        }
    }
}

fn schema_version(conn: &Connection) -> StoreResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person_tables(conn: &Connection) -> i64 {
        conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'Person';",
            [],
            |row| row.get(0),
        )
        .unwrap()
    }

    #[test]
    fn blank_database_gets_the_person_table() {
        let mut conn = Connection::open_in_memory().unwrap();
        ensure_schema(&mut conn).unwrap();

        assert_eq!(schema_version(&conn).unwrap(), SCHEMA_VERSION);
        assert_eq!(person_tables(&conn), 1);
    }

    #[test]
    fn stamped_database_is_left_alone() {
        let mut conn = Connection::open_in_memory().unwrap();
        ensure_schema(&mut conn).unwrap();
        conn.execute("INSERT INTO Person (FirstName, Age) VALUES ('Ann', 30);", [])
            .unwrap();

        ensure_schema(&mut conn).unwrap();
        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM Person;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn newer_database_is_refused() {
        let mut conn = Connection::open_in_memory().unwrap();
        conn.pragma_update(None, "user_version", SCHEMA_VERSION + 1).unwrap();

        let err = ensure_schema(&mut conn).unwrap_err();
        assert!(matches!(
            err,
            StoreError::UnsupportedSchemaVersion { db_version: 2, latest_supported: 1 }
        ));
        assert_eq!(person_tables(&conn), 0);
    }
}
