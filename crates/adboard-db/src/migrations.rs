use rusqlite::Connection;
use tracing::{info, warn};

use crate::StoreResult;

pub fn run(conn: &Connection) -> StoreResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS users (
            id          INTEGER PRIMARY KEY,
            name        TEXT NOT NULL UNIQUE,
            email       TEXT NOT NULL,
            password    TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS advertisements (
            id                  INTEGER PRIMARY KEY,
            author              TEXT NOT NULL,
            title               TEXT NOT NULL,
            description         TEXT,
            registration_time   TEXT NOT NULL DEFAULT (datetime('now')),
            user_id             INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_advertisements_user
            ON advertisements(user_id);

        CREATE TABLE IF NOT EXISTS tokens (
            id          INTEGER PRIMARY KEY,
            token       TEXT NOT NULL UNIQUE,
            user_id     INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_tokens_user
            ON tokens(user_id);
        ",
    )?;

    info!("Database schema ready");
    Ok(())
}

/// Explicit reset entry point. Destroys all data.
pub fn reset(conn: &Connection) -> StoreResult<()> {
    conn.execute_batch(
        "
        DROP TABLE IF EXISTS tokens;
        DROP TABLE IF EXISTS advertisements;
        DROP TABLE IF EXISTS users;
        ",
    )?;

    warn!("Database reset, all tables dropped");
    run(conn)
}
