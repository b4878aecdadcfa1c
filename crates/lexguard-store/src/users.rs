//! DuckDB-backed user directory for identity-provider sync.

use std::path::Path;

use chrono::{DateTime, Utc};
use duckdb::{Connection, OptionalExt, params};
use lexguard_core::UserSync;
use tracing::{debug, info};

use crate::StoreError;

/// Persistent record of users known to the service, keyed by their
/// identity-provider id.
pub trait UserDirectory {
    /// Insert or update a user. Returns `true` when a row was written.
    fn upsert(&self, user: &UserSync) -> Result<bool, StoreError>;

    fn get(&self, clerk_id: &str) -> Result<Option<UserSync>, StoreError>;

    fn count(&self) -> Result<usize, StoreError>;
}

/// User directory in a DuckDB database.
///
/// Use [`open`](Self::open) for an in-memory directory and
/// [`open_persistent`](Self::open_persistent) for a file that survives restarts.
pub struct DuckUsers {
    conn: Connection,
}

const CREATE_USERS: &str = "CREATE TABLE IF NOT EXISTS users (
    clerk_id   VARCHAR PRIMARY KEY,
    email      VARCHAR NOT NULL,
    name       VARCHAR,
    created_at VARCHAR NOT NULL
)";

impl DuckUsers {
    pub fn open() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    pub fn open_persistent(path: &Path) -> Result<Self, StoreError> {
        let users = Self::init(Connection::open(path)?)?;
        info!(path = %path.display(), users = users.count()?, "opened user directory");
        Ok(users)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(CREATE_USERS)?;
        Ok(Self { conn })
    }
}

impl UserDirectory for DuckUsers {
    fn upsert(&self, user: &UserSync) -> Result<bool, StoreError> {
        if let Some(existing) = self.get(&user.clerk_id)? {
            if existing.email == user.email && existing.name == user.name {
                debug!(clerk_id = %user.clerk_id, "user unchanged");
                return Ok(false);
            }
            self.conn.execute(
                "UPDATE users SET email = ?, name = ? WHERE clerk_id = ?",
                params![user.email, user.name, user.clerk_id],
            )?;
            debug!(clerk_id = %user.clerk_id, "user updated");
            return Ok(true);
        }

        self.conn.execute(
            "INSERT INTO users (clerk_id, email, name, created_at) VALUES (?, ?, ?, ?)",
            params![
                user.clerk_id,
                user.email,
                user.name,
                user.created_at.to_rfc3339()
            ],
        )?;
        debug!(clerk_id = %user.clerk_id, "user inserted");
        Ok(true)
    }

    fn get(&self, clerk_id: &str) -> Result<Option<UserSync>, StoreError> {
        let row = self
            .conn
            .query_row(
                "SELECT clerk_id, email, name, created_at FROM users WHERE clerk_id = ?",
                [clerk_id],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, Option<String>>(2)?,
                        row.get::<_, String>(3)?,
                    ))
                },
            )
            .optional()?;

        let Some((clerk_id, email, name, created_at)) = row else {
            return Ok(None);
        };
        let created_at = DateTime::parse_from_rfc3339(&created_at)
            .map_err(|e| StoreError::Other(format!("bad created_at for {clerk_id}: {e}")))?
            .with_timezone(&Utc);
        Ok(Some(UserSync {
            clerk_id,
            email,
            name,
            created_at,
        }))
    }

    fn count(&self) -> Result<usize, StoreError> {
        let n: i64 = self
            .conn
            .query_row("SELECT count(*) FROM users", [], |row| row.get(0))?;
        Ok(n as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn alice() -> UserSync {
        UserSync {
            clerk_id: "user_2abc".into(),
            email: "alice@example.com".into(),
            name: Some("Alice".into()),
            created_at: Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn insert_then_noop() {
        let users = DuckUsers::open().unwrap();
        assert!(users.upsert(&alice()).unwrap());
        assert!(!users.upsert(&alice()).unwrap());
        assert_eq!(users.count().unwrap(), 1);
        assert_eq!(users.get("user_2abc").unwrap(), Some(alice()));
    }

    #[test]
    fn changed_email_updates_and_keeps_created_at() {
        let users = DuckUsers::open().unwrap();
        users.upsert(&alice()).unwrap();

        let mut moved = alice();
        moved.email = "alice@newco.example".into();
        moved.created_at = Utc::now();
        assert!(users.upsert(&moved).unwrap());

        let stored = users.get("user_2abc").unwrap().unwrap();
        assert_eq!(stored.email, "alice@newco.example");
        assert_eq!(stored.created_at, alice().created_at);
    }

    #[test]
    fn missing_user_is_none() {
        let users = DuckUsers::open().unwrap();
        assert_eq!(users.get("nobody").unwrap(), None);
        assert_eq!(users.count().unwrap(), 0);
    }

    #[test]
    fn persistent_directory_survives_reopen() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("users.duckdb");
        {
            let users = DuckUsers::open_persistent(&path).unwrap();
            users.upsert(&alice()).unwrap();
        }
        let users = DuckUsers::open_persistent(&path).unwrap();
        assert_eq!(users.count().unwrap(), 1);
        assert_eq!(users.get("user_2abc").unwrap().unwrap().name.as_deref(), Some("Alice"));
    }
}
