//! Request body validation.
//!
//! Handlers receive the raw JSON body and hand it to one of the rule sets in
//! this module, which return a typed input or every field failure at once.

pub mod auth;
pub mod bouquet;

use std::collections::BTreeMap;

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::AppError;

/// Field name -> messages, in field order.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// The first message, plus a count of the rest.
    pub fn summary(&self) -> String {
        let total: usize = self.0.values().map(Vec::len).sum();
        let Some(first) = self.0.values().flatten().next() else {
            return "The given data was invalid.".to_string();
        };
        match total {
            1 => first.clone(),
            2 => format!("{first} (and 1 more error)"),
            n => format!("{first} (and {} more errors)", n - 1),
        }
    }

    fn finish<T>(self, value: impl FnOnce() -> T) -> Result<T, ValidationErrors> {
        if self.is_empty() { Ok(value()) } else { Err(self) }
    }
}

/// JSON body extractor that reports unreadable bodies as validation failures.
///
/// An empty body reads as `{}`, so a bodiless request reaches the field rules
/// instead of failing on a missing `Content-Type`.
pub struct JsonBody(pub Value);

impl<S: Send + Sync> FromRequest<S> for JsonBody {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ValidationErrors::single("body", rejection.body_text()))?;
        Ok(JsonBody(parse_body(&bytes)?))
    }
}

fn parse_body(bytes: &[u8]) -> Result<Value, ValidationErrors> {
    if bytes.trim_ascii().is_empty() {
        return Ok(Value::Object(Map::new()));
    }
    let Json(value) = Json::<Value>::from_bytes(bytes)
        .map_err(|rejection| ValidationErrors::single("body", rejection.body_text()))?;
    Ok(value)
}

fn as_object(body: &Value) -> Result<&Map<String, Value>, ValidationErrors> {
    body.as_object()
        .ok_or_else(|| ValidationErrors::single("body", "The request body must be a JSON object."))
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Present, non-null, non-blank.
fn required<'a>(
    body: &'a Map<String, Value>,
    field: &str,
    errors: &mut ValidationErrors,
) -> Option<&'a Value> {
    match body.get(field) {
        Some(value) if !is_blank(value) => Some(value),
        _ => {
            errors.add(field, format!("The {field} field is required."));
            None
        }
    }
}

fn string(
    field: &str,
    value: &Value,
    max_chars: Option<usize>,
    errors: &mut ValidationErrors,
) -> Option<String> {
    let Value::String(s) = value else {
        errors.add(field, format!("The {field} field must be a string."));
        return None;
    };
    if let Some(max) = max_chars {
        if s.chars().count() > max {
            errors.add(
                field,
                format!("The {field} field must not be greater than {max} characters."),
            );
            return None;
        }
    }
    Some(s.clone())
}

/// Accepts JSON numbers and strings holding a finite number.
fn numeric(field: &str, value: &Value, errors: &mut ValidationErrors) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(n) if n.is_finite() => Some(n),
        _ => {
            errors.add(field, format!("The {field} field must be a number."));
            None
        }
    }
}

/// `None` when absent, `Some(None)` when null or blank.
fn nullable_string(
    body: &Map<String, Value>,
    field: &str,
    errors: &mut ValidationErrors,
) -> Option<Option<String>> {
    match body.get(field)? {
        value if is_blank(value) => Some(None),
        value => string(field, value, None, errors).map(Some),
    }
}
