pub mod error;
pub mod migrations;
pub mod models;
pub mod queries;
pub mod store;

pub use error::{StoreError, StoreResult};

use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

/// Connections kept open for reuse once released. Extra ones are closed.
const MAX_IDLE_CONNECTIONS: usize = 8;

/// Handle to the store. Cheap to clone; every clone shares one pool.
#[derive(Clone)]
pub struct Database {
    pool: Arc<Pool>,
}

struct Pool {
    target: String,
    wal: bool,
    idle: Mutex<Vec<Connection>>,
}

impl Pool {
    fn connect(&self) -> StoreResult<Connection> {
        let conn = Connection::open_with_flags(&self.target, OpenFlags::default())?;

        if self.wal {
            conn.pragma_update(None, "journal_mode", "WAL")?;
        }
        conn.pragma_update(None, "foreign_keys", "ON")?;

        Ok(conn)
    }

    fn release(&self, conn: Connection) {
        match self.idle.lock() {
            Ok(mut idle) if idle.len() < MAX_IDLE_CONNECTIONS => idle.push(conn),
            Ok(_) => debug!("Idle pool full, closing connection"),
            Err(_) => debug!("Idle pool poisoned, closing connection"),
        }
    }
}

impl Database {
    pub fn open(path: &Path) -> StoreResult<Self> {
        let db = Self::bootstrap(path.to_string_lossy().into_owned(), true)?;
        info!("Database opened at {}", path.display());
        Ok(db)
    }

    /// Private in-memory database. Every pooled connection sees the same data.
    pub fn open_in_memory() -> StoreResult<Self> {
        let target = format!(
            "file:adboard-{}?mode=memory&cache=shared",
            uuid::Uuid::new_v4()
        );
        Self::bootstrap(target, false)
    }

    fn bootstrap(target: String, wal: bool) -> StoreResult<Self> {
        let pool = Pool {
            target,
            wal,
            idle: Mutex::new(Vec::new()),
        };

        let conn = pool.connect()?;
        migrations::run(&conn)?;
        pool.release(conn);

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Check out one connection for a unit of work. It returns to the pool
    /// when the last clone of the session is dropped.
    pub fn session(&self) -> StoreResult<Session> {
        let reused = self
            .pool
            .idle
            .lock()
            .map_err(|_| StoreError::Poisoned)?
            .pop();

        let conn = match reused {
            Some(conn) => conn,
            None => self.pool.connect()?,
        };

        Ok(Session {
            inner: Arc::new(SessionInner {
                conn: Mutex::new(Some(conn)),
                pool: self.pool.clone(),
            }),
        })
    }

    /// Drop every table and recreate the schema.
    pub fn reset(&self) -> StoreResult<()> {
        self.session()?.with_conn(migrations::reset)
    }
}

/// One request's connection.
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    conn: Mutex<Option<Connection>>,
    pool: Arc<Pool>,
}

impl Session {
    pub fn with_conn<F, T>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&Connection) -> StoreResult<T>,
    {
        let guard = self.inner.conn.lock().map_err(|_| StoreError::Poisoned)?;
        let conn = guard.as_ref().ok_or(StoreError::Poisoned)?;
        f(conn)
    }
}

impl Drop for SessionInner {
    fn drop(&mut self) {
        // A poisoned slot may hold a half-used connection; let it close.
        if let Ok(slot) = self.conn.get_mut() {
            if let Some(conn) = slot.take() {
                self.pool.release(conn);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idle_count(db: &Database) -> usize {
        db.pool.idle.lock().unwrap().len()
    }

    #[test]
    fn session_returns_connection_on_drop() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(idle_count(&db), 1);

        let session = db.session().unwrap();
        let clone = session.clone();
        assert_eq!(idle_count(&db), 0);

        drop(session);
        assert_eq!(idle_count(&db), 0);
        drop(clone);
        assert_eq!(idle_count(&db), 1);
    }

    #[test]
    fn concurrent_sessions_share_data() {
        let db = Database::open_in_memory().unwrap();
        let first = db.session().unwrap();
        let second = db.session().unwrap();

        first
            .with_conn(|conn| {
                conn.execute(
                    "INSERT INTO users (name, email, password) VALUES ('ann', 'a@b.co', 'x')",
                    [],
                )?;
                Ok(())
            })
            .unwrap();

        let count: i64 = second
            .with_conn(|conn| Ok(conn.query_row("SELECT COUNT(*) FROM users", [], |r| r.get(0))?))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn in_memory_databases_are_isolated() {
        let a = Database::open_in_memory().unwrap();
        let b = Database::open_in_memory().unwrap();

        a.session()
            .unwrap()
            .with_conn(|conn| {
                conn.execute(
                    "INSERT INTO users (name, email, password) VALUES ('ann', 'a@b.co', 'x')",
                    [],
                )?;
                Ok(())
            })
            .unwrap();

        let count: i64 = b
            .session()
            .unwrap()
            .with_conn(|conn| Ok(conn.query_row("SELECT COUNT(*) FROM users", [], |r| r.get(0))?))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn reset_clears_rows() {
        let db = Database::open_in_memory().unwrap();
        db.session()
            .unwrap()
            .with_conn(|conn| {
                conn.execute(
                    "INSERT INTO users (name, email, password) VALUES ('ann', 'a@b.co', 'x')",
                    [],
                )?;
                Ok(())
            })
            .unwrap();

        db.reset().unwrap();

        let count: i64 = db
            .session()
            .unwrap()
            .with_conn(|conn| Ok(conn.query_row("SELECT COUNT(*) FROM users", [], |r| r.get(0))?))
            .unwrap();
        assert_eq!(count, 0);
    }
}
