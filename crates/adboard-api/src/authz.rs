use tracing::warn;

use adboard_db::models::AdvertisementRow;

use crate::error::ApiError;

/// A resource that belongs to exactly one user.
pub trait Owned {
    fn owner_id(&self) -> i64;
}

impl Owned for AdvertisementRow {
    fn owner_id(&self) -> i64 {
        self.user_id
    }
}

pub fn assert_owner(resource: &impl Owned, caller_user_id: i64) -> Result<(), ApiError> {
    if resource.owner_id() != caller_user_id {
        warn!(
            owner_id = resource.owner_id(),
            caller_id = caller_user_id,
            "Access denied to foreign resource"
        );
        return Err(ApiError::Forbidden);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Thing(i64);

    impl Owned for Thing {
        fn owner_id(&self) -> i64 {
            self.0
        }
    }

    #[test]
    fn owner_passes() {
        assert!(assert_owner(&Thing(7), 7).is_ok());
    }

    #[test]
    fn stranger_is_forbidden() {
        let err = assert_owner(&Thing(7), 8).unwrap_err();
        assert!(matches!(err, ApiError::Forbidden));
        assert_eq!(err.to_string(), "access denied");
    }
}
