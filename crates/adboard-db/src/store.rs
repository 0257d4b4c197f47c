//! Generic create/read/update/delete over any table-backed row type.
//!
//! Every operation runs on the caller's [`Session`] and issues exactly one
//! statement, so each write commits on its own and nothing here opens a
//! transaction. Unique-constraint violations surface as
//! [`StoreError::Conflict`]; every other SQLite error passes through as is.

use rusqlite::{Row, ffi, params_from_iter};

pub use rusqlite::types::Value;

use crate::{Session, StoreError, StoreResult};

/// A row type stored in its own table with an integer `id` primary key.
pub trait Entity: Sized {
    /// Name used in error messages, e.g. "User".
    const NAME: &'static str;
    const TABLE: &'static str;
    /// Column list for SELECT / RETURNING, in the order `from_row` reads them.
    const COLUMNS: &'static str;

    fn id(&self) -> i64;

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;
}

/// Ordered column assignments for an insert or update.
#[derive(Debug, Default, Clone)]
pub struct Fields(Vec<(&'static str, Value)>);

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, column: &'static str, value: impl Into<Value>) -> Self {
        self.push(column, value);
        self
    }

    /// Later assignments to the same column replace earlier ones.
    pub fn push(&mut self, column: &'static str, value: impl Into<Value>) {
        let value = value.into();
        match self.0.iter_mut().find(|(c, _)| *c == column) {
            Some(slot) => slot.1 = value,
            None => self.0.push((column, value)),
        }
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.0.iter().find(|(c, _)| *c == column).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().map(|(c, _)| *c)
    }

    fn values(&self) -> impl Iterator<Item = &Value> {
        self.0.iter().map(|(_, v)| v)
    }
}

pub fn create<E: Entity>(session: &Session, fields: Fields) -> StoreResult<E> {
    let sql = if fields.is_empty() {
        format!(
            "INSERT INTO {} DEFAULT VALUES RETURNING {}",
            E::TABLE,
            E::COLUMNS
        )
    } else {
        let columns: Vec<&str> = fields.columns().collect();
        let placeholders: Vec<String> = (1..=fields.len()).map(|i| format!("?{}", i)).collect();
        format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
            E::TABLE,
            columns.join(", "),
            placeholders.join(", "),
            E::COLUMNS
        )
    };

    session.with_conn(|conn| {
        conn.query_row(&sql, params_from_iter(fields.values()), E::from_row)
            .map_err(translate::<E>)
    })
}

pub fn get_by_id<E: Entity>(session: &Session, id: i64) -> StoreResult<E> {
    let sql = format!("SELECT {} FROM {} WHERE id = ?1", E::COLUMNS, E::TABLE);

    session.with_conn(|conn| {
        conn.query_row(&sql, [id], E::from_row)
            .map_err(translate::<E>)
    })
}

/// Writes only the given fields and returns the row as stored afterwards.
pub fn update<E: Entity>(session: &Session, entity: &E, fields: Fields) -> StoreResult<E> {
    if fields.is_empty() {
        return get_by_id(session, entity.id());
    }

    let assignments: Vec<String> = fields
        .columns()
        .enumerate()
        .map(|(i, column)| format!("{} = ?{}", column, i + 1))
        .collect();
    let sql = format!(
        "UPDATE {} SET {} WHERE id = ?{} RETURNING {}",
        E::TABLE,
        assignments.join(", "),
        fields.len() + 1,
        E::COLUMNS
    );

    let id = Value::Integer(entity.id());
    session.with_conn(|conn| {
        conn.query_row(
            &sql,
            params_from_iter(fields.values().chain(std::iter::once(&id))),
            E::from_row,
        )
        .map_err(translate::<E>)
    })
}

pub fn delete<E: Entity>(session: &Session, entity: E) -> StoreResult<()> {
    let sql = format!("DELETE FROM {} WHERE id = ?1", E::TABLE);

    let removed = session.with_conn(|conn| {
        conn.execute(&sql, [entity.id()])
            .map_err(translate::<E>)
    })?;

    if removed == 0 {
        return Err(StoreError::NotFound { entity: E::NAME });
    }
    Ok(())
}

fn translate<E: Entity>(err: rusqlite::Error) -> StoreError {
    match &err {
        rusqlite::Error::QueryReturnedNoRows => StoreError::NotFound { entity: E::NAME },
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
                || e.extended_code == ffi::SQLITE_CONSTRAINT_PRIMARYKEY =>
        {
            StoreError::Conflict { entity: E::NAME }
        }
        _ => StoreError::Sqlite(err),
    }
}
