use rusqlite::OptionalExtension;

use crate::models::{AdvertisementRow, TokenRow, UserRow};
use crate::store::Entity;
use crate::{Session, StoreResult};

impl Session {
    // -- Users --

    pub fn find_user_by_name(&self, name: &str) -> StoreResult<Option<UserRow>> {
        let sql = format!("SELECT {} FROM users WHERE name = ?1", UserRow::COLUMNS);
        self.with_conn(|conn| Ok(conn.query_row(&sql, [name], UserRow::from_row).optional()?))
    }

    // -- Tokens --

    /// Exact-match lookup of a presented token value.
    pub fn find_token(&self, value: &str) -> StoreResult<Option<TokenRow>> {
        let sql = format!("SELECT {} FROM tokens WHERE token = ?1", TokenRow::COLUMNS);
        self.with_conn(|conn| Ok(conn.query_row(&sql, [value], TokenRow::from_row).optional()?))
    }

    // -- Advertisements --

    pub fn advertisements_for_user(&self, user_id: i64) -> StoreResult<Vec<AdvertisementRow>> {
        let sql = format!(
            "SELECT {} FROM advertisements WHERE user_id = ?1 ORDER BY id",
            AdvertisementRow::COLUMNS
        );
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map([user_id], AdvertisementRow::from_row)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn advertisement_ids_for_user(&self, user_id: i64) -> StoreResult<Vec<i64>> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare("SELECT id FROM advertisements WHERE user_id = ?1 ORDER BY id")?;
            let ids = stmt
                .query_map([user_id], |row| row.get(0))?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(ids)
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::Database;
    use crate::models::{AdvertisementRow, UserRow};
    use crate::store::{Fields, create};

    #[test]
    fn lookups_by_value() {
        let db = Database::open_in_memory().unwrap();
        let session = db.session().unwrap();

        let user: UserRow = create(
            &session,
            Fields::new()
                .set("name", "ann".to_string())
                .set("email", "ann@example.com".to_string())
                .set("password", "hashed".to_string()),
        )
        .unwrap();
        let mut ids = Vec::new();
        for title in ["first", "second"] {
            let ad: AdvertisementRow = create(
                &session,
                Fields::new()
                    .set("author", "ann".to_string())
                    .set("title", title.to_string())
                    .set("user_id", user.id),
            )
            .unwrap();
            ids.push(ad.id);
        }

        assert_eq!(session.find_user_by_name("ann").unwrap().unwrap().id, user.id);
        assert!(session.find_user_by_name("bob").unwrap().is_none());
        assert!(session.find_token("nope").unwrap().is_none());

        let ads = session.advertisements_for_user(user.id).unwrap();
        assert_eq!(ads.iter().map(|a| a.title.as_str()).collect::<Vec<_>>(), ["first", "second"]);
        assert_eq!(session.advertisement_ids_for_user(user.id).unwrap(), ids);
        assert!(session.advertisement_ids_for_user(user.id + 1).unwrap().is_empty());
    }
}
