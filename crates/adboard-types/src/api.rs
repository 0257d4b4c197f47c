use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// -- Errors --

/// One rejected payload field. Serialized as `{loc, msg, type}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Builds the `{"error <status>": <description>}` body every failed request returns.
pub fn error_envelope(status: u16, description: Value) -> Value {
    let mut body = Map::with_capacity(1);
    body.insert(format!("error {}", status), description);
    Value::Object(body)
}

// -- Users --

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDetail {
    pub id: i64,
    pub name: String,
    pub advertisements: Vec<i64>,
}

// -- Auth --

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

// -- Advertisements --

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvertisementResponse {
    pub id: i64,
    pub author: String,
    pub title: String,
    pub description: Option<String>,
    pub registration_time: NaiveDateTime,
    pub user_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvertisementSummary {
    pub author: String,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}
