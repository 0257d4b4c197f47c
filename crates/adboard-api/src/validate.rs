//! Request payload validation.
//!
//! A [`Schema`] lists the fields one operation accepts, in the order they are
//! checked. Only the first failing field is reported. Unknown fields are
//! dropped, and optional fields that were not sent never appear in the
//! [`Cleaned`] output, so partial updates cannot overwrite with defaults.

use axum::{
    Json,
    extract::{FromRequest, Request},
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use adboard_db::store::Fields;
use adboard_types::api::FieldError;

use crate::error::ApiError;

pub type Check = fn(&str) -> Result<(), &'static str>;

#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub name: &'static str,
    pub required: bool,
    pub nullable: bool,
    pub check: Option<Check>,
}

impl FieldRule {
    pub const fn required(name: &'static str) -> Self {
        Self {
            name,
            required: true,
            nullable: false,
            check: None,
        }
    }

    pub const fn optional(name: &'static str) -> Self {
        Self {
            required: false,
            ..Self::required(name)
        }
    }

    pub const fn nullable(self) -> Self {
        Self {
            nullable: true,
            ..self
        }
    }

    pub const fn check(self, check: Check) -> Self {
        Self {
            check: Some(check),
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Schema {
    pub fields: &'static [FieldRule],
}

pub const CREATE_USER: Schema = Schema {
    fields: &[
        FieldRule::required("name"),
        FieldRule::required("password").check(password_length),
        FieldRule::required("email").check(email_shape),
    ],
};

pub const PATCH_USER: Schema = Schema {
    fields: &[
        FieldRule::optional("name"),
        FieldRule::optional("password").check(password_length),
        FieldRule::optional("email").check(email_shape),
    ],
};

pub const LOGIN: Schema = Schema {
    fields: &[FieldRule::required("name"), FieldRule::required("password")],
};

pub const CREATE_ADVERTISEMENT: Schema = Schema {
    fields: &[
        FieldRule::required("author"),
        FieldRule::required("title"),
        FieldRule::optional("description").nullable(),
    ],
};

pub const PATCH_ADVERTISEMENT: Schema = Schema {
    fields: &[
        FieldRule::optional("author"),
        FieldRule::optional("title"),
        FieldRule::optional("description").nullable(),
    ],
};

pub const PASSWORD_MIN_LEN: usize = 8;
pub const PASSWORD_MAX_LEN: usize = 16;

fn password_length(value: &str) -> Result<(), &'static str> {
    let len = value.chars().count();
    if !(PASSWORD_MIN_LEN..=PASSWORD_MAX_LEN).contains(&len) {
        return Err("The password must be between 8 and 16 characters long");
    }
    Ok(())
}

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\A[\w.-]+@[\w-]+\.[\w.]+\z").expect("email pattern compiles"));

fn email_shape(value: &str) -> Result<(), &'static str> {
    if !EMAIL.is_match(value) {
        return Err("Email is invalid");
    }
    Ok(())
}

/// Validated fields in schema order. `None` is an explicit JSON null.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cleaned(Vec<(&'static str, Option<String>)>);

impl Cleaned {
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|(n, _)| *n == name)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| *n == name)
            .and_then(|(_, v)| v.as_deref())
    }

    /// A field the schema marks required; its absence is a schema bug.
    pub fn require(&self, name: &str) -> Result<&str, ApiError> {
        self.get(name)
            .ok_or_else(|| ApiError::Internal(format!("validated payload lacks '{}'", name)))
    }

    /// Swap the value of a present field, e.g. a password for its hash.
    pub fn replace(&mut self, name: &str, value: String) {
        if let Some(slot) = self.0.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = Some(value);
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_fields(self) -> Fields {
        self.0
            .into_iter()
            .fold(Fields::new(), |fields, (name, value)| fields.set(name, value))
    }
}

fn rejection(loc: &[&str], msg: impl Into<String>, kind: &str) -> ApiError {
    ApiError::Validation(FieldError {
        loc: loc.iter().map(|s| s.to_string()).collect(),
        msg: msg.into(),
        kind: kind.to_string(),
    })
}

pub fn validate(schema: &Schema, payload: &Value) -> Result<Cleaned, ApiError> {
    let object = payload
        .as_object()
        .ok_or_else(|| rejection(&[], "Input should be a valid dictionary", "model_type"))?;

    let mut cleaned = Vec::with_capacity(schema.fields.len());
    for rule in schema.fields {
        match object.get(rule.name) {
            None if rule.required => return Err(rejection(&[rule.name], "Field required", "missing")),
            None => {}
            Some(Value::Null) if rule.nullable => cleaned.push((rule.name, None)),
            Some(Value::String(value)) => {
                if let Some(check) = rule.check {
                    check(value).map_err(|reason| {
                        rejection(&[rule.name], format!("Value error, {}", reason), "value_error")
                    })?;
                }
                cleaned.push((rule.name, Some(value.clone())));
            }
            Some(_) => {
                return Err(rejection(
                    &[rule.name],
                    "Input should be a valid string",
                    "string_type",
                ));
            }
        }
    }

    Ok(Cleaned(cleaned))
}

/// A JSON body whose parse failures answer in the API's error shape.
pub struct JsonPayload(pub Value);

impl<S> FromRequest<S> for JsonPayload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|err| ApiError::MalformedBody(err.body_text()))?;
        Ok(Self(value))
    }
}
