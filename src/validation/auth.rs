use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::{as_object, required, string, ValidationErrors};

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

const NAME_MAX_CHARS: usize = 255;
const EMAIL_MAX_CHARS: usize = 255;
pub const PASSWORD_MIN_CHARS: usize = 8;

#[derive(Debug, Clone, PartialEq)]
pub struct Registration {
    pub name: String,
    /// Trimmed and lower-cased.
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Emails are compared and stored in this form.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn registration(body: &Value) -> Result<Registration, ValidationErrors> {
    let body = as_object(body)?;
    let mut errors = ValidationErrors::default();

    let name = required(body, "name", &mut errors)
        .and_then(|v| string("name", v, Some(NAME_MAX_CHARS), &mut errors));

    let email = required(body, "email", &mut errors)
        .and_then(|v| string("email", v, Some(EMAIL_MAX_CHARS), &mut errors))
        .map(|e| normalize_email(&e))
        .and_then(|e| {
            if EMAIL_RE.is_match(&e) {
                Some(e)
            } else {
                errors.add("email", "The email field must be a valid email address.");
                None
            }
        });

    let password = required(body, "password", &mut errors)
        .and_then(|v| string("password", v, None, &mut errors))
        .and_then(|p| {
            if p.chars().count() < PASSWORD_MIN_CHARS {
                errors.add(
                    "password",
                    format!("The password field must be at least {PASSWORD_MIN_CHARS} characters."),
                );
                return None;
            }
            match body.get("password_confirmation") {
                Some(Value::String(confirmation)) if *confirmation == p => Some(p),
                _ => {
                    errors.add("password", "The password field confirmation does not match.");
                    None
                }
            }
        });

    errors.finish(|| Registration {
        name: name.unwrap_or_default(),
        email: email.unwrap_or_default(),
        password: password.unwrap_or_default(),
    })
}

pub fn credentials(body: &Value) -> Result<Credentials, ValidationErrors> {
    let body = as_object(body)?;
    let mut errors = ValidationErrors::default();

    let email = required(body, "email", &mut errors)
        .and_then(|v| string("email", v, None, &mut errors))
        .map(|e| normalize_email(&e));
    let password = required(body, "password", &mut errors)
        .and_then(|v| string("password", v, None, &mut errors));

    errors.finish(|| Credentials {
        email: email.unwrap_or_default(),
        password: password.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid() -> Value {
        json!({
            "name": "Neshia Hilton",
            "email": "  Neshia@Mail.com ",
            "password": "rahasia123",
            "password_confirmation": "rahasia123",
        })
    }

    #[test]
    fn accepts_valid_registration_and_normalizes_email() {
        let reg = registration(&valid()).unwrap();
        assert_eq!(reg.name, "Neshia Hilton");
        assert_eq!(reg.email, "neshia@mail.com");
        assert_eq!(reg.password, "rahasia123");
    }

    #[test]
    fn rejects_mismatched_confirmation() {
        let mut body = valid();
        body["password_confirmation"] = json!("rahasia124");
        let errors = registration(&body).unwrap_err();
        assert_eq!(
            errors.get("password").unwrap(),
            ["The password field confirmation does not match."]
        );
    }

    #[test]
    fn rejects_missing_confirmation() {
        let mut body = valid();
        body.as_object_mut().unwrap().remove("password_confirmation");
        assert!(registration(&body).unwrap_err().get("password").is_some());
    }

    #[test]
    fn rejects_short_password() {
        let mut body = valid();
        body["password"] = json!("short");
        body["password_confirmation"] = json!("short");
        let errors = registration(&body).unwrap_err();
        assert_eq!(
            errors.get("password").unwrap(),
            ["The password field must be at least 8 characters."]
        );
    }

    #[test]
    fn rejects_malformed_email() {
        let mut body = valid();
        body["email"] = json!("not-an-email");
        assert!(registration(&body).unwrap_err().get("email").is_some());
    }

    #[test]
    fn credentials_require_both_fields() {
        let errors = credentials(&json!({})).unwrap_err();
        assert!(errors.get("email").is_some());
        assert!(errors.get("password").is_some());

        let creds = credentials(&json!({ "email": "A@B.io", "password": "x" })).unwrap();
        assert_eq!(creds.email, "a@b.io");
    }
}
