//! Database row types. These map directly to SQLite rows and stay
//! independent of the wire types in adboard-types.

use chrono::NaiveDateTime;
use rusqlite::Row;
use rusqlite::types::Type;

use crate::store::Entity;

/// SQLite `datetime('now')` output, always UTC.
pub const SQLITE_DATETIME: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone)]
pub struct UserRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct AdvertisementRow {
    pub id: i64,
    pub author: String,
    pub title: String,
    pub description: Option<String>,
    pub registration_time: NaiveDateTime,
    pub user_id: i64,
}

#[derive(Debug, Clone)]
pub struct TokenRow {
    pub id: i64,
    pub token: String,
    pub user_id: i64,
}

impl Entity for UserRow {
    const NAME: &'static str = "User";
    const TABLE: &'static str = "users";
    const COLUMNS: &'static str = "id, name, email, password";

    fn id(&self) -> i64 {
        self.id
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(UserRow {
            id: row.get(0)?,
            name: row.get(1)?,
            email: row.get(2)?,
            password: row.get(3)?,
        })
    }
}

impl Entity for AdvertisementRow {
    const NAME: &'static str = "Advertisement";
    const TABLE: &'static str = "advertisements";
    const COLUMNS: &'static str = "id, author, title, description, registration_time, user_id";

    fn id(&self) -> i64 {
        self.id
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let raw_time: String = row.get(4)?;
        let registration_time = NaiveDateTime::parse_from_str(&raw_time, SQLITE_DATETIME)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?;

        Ok(AdvertisementRow {
            id: row.get(0)?,
            author: row.get(1)?,
            title: row.get(2)?,
            description: row.get(3)?,
            registration_time,
            user_id: row.get(5)?,
        })
    }
}

impl Entity for TokenRow {
    const NAME: &'static str = "Token";
    const TABLE: &'static str = "tokens";
    const COLUMNS: &'static str = "id, token, user_id";

    fn id(&self) -> i64 {
        self.id
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(TokenRow {
            id: row.get(0)?,
            token: row.get(1)?,
            user_id: row.get(2)?,
        })
    }
}
