use adboard_db::models::{AdvertisementRow, TokenRow, UserRow};
use adboard_types::api::{
    AdvertisementResponse, AdvertisementSummary, LoginResponse, StatusResponse, UserDetail,
    UserSummary,
};

pub fn user_summary(user: &UserRow) -> UserSummary {
    UserSummary {
        id: user.id,
        name: user.name.clone(),
    }
}

pub fn user_detail(user: &UserRow, advertisement_ids: Vec<i64>) -> UserDetail {
    UserDetail {
        id: user.id,
        name: user.name.clone(),
        advertisements: advertisement_ids,
    }
}

pub fn advertisement_detail(ad: &AdvertisementRow) -> AdvertisementResponse {
    AdvertisementResponse {
        id: ad.id,
        author: ad.author.clone(),
        title: ad.title.clone(),
        description: ad.description.clone(),
        registration_time: ad.registration_time,
        user_id: ad.user_id,
    }
}

pub fn advertisement_summary(ad: &AdvertisementRow) -> AdvertisementSummary {
    AdvertisementSummary {
        author: ad.author.clone(),
        title: ad.title.clone(),
    }
}

pub fn token_issued(token: &TokenRow) -> LoginResponse {
    LoginResponse {
        token: token.token.clone(),
    }
}

pub fn status_ok() -> StatusResponse {
    StatusResponse {
        status: "ok".to_string(),
    }
}
