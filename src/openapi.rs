//! OpenAPI document for the API, served as `GET /openapi.json`.
//!
//! Request bodies are validated from raw JSON (see [`crate::validation`]), so
//! the request structs here only describe the accepted shapes.

use std::collections::HashMap;

use axum::Json;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

use crate::models::{BouquetResponse, UserResponse};
use crate::routes::auth::{MessageResponse, TokenResponse};
use crate::routes::{auth, bouquets};

#[derive(OpenApi)]
#[openapi(
    info(title = "Cherie Blossom API", version = "1.0.0"),
    paths(
        bouquets::list,
        bouquets::create,
        bouquets::show,
        bouquets::update,
        bouquets::delete,
        auth::register,
        auth::login,
        auth::logout,
        auth::whoami
    ),
    components(schemas(
        BouquetResponse,
        UserResponse,
        TokenResponse,
        MessageResponse,
        ErrorBody,
        CreateBouquetBody,
        UpdateBouquetBody,
        RegisterBody,
        LoginBody
    )),
    modifiers(&BearerAuth),
    tags(
        (name = "Bouquets", description = "Bouquet catalog"),
        (name = "User", description = "Registration and sessions"),
    )
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Error envelope. `fields` is present on 422 only.
#[allow(dead_code)]
#[derive(ToSchema)]
pub struct ErrorBody {
    #[schema(example = "The name field is required.")]
    pub error: String,
    pub fields: Option<HashMap<String, Vec<String>>>,
}

#[allow(dead_code)]
#[derive(ToSchema)]
pub struct CreateBouquetBody {
    #[schema(max_length = 255, example = "Cherry Blossom")]
    pub name: String,
    pub description: Option<String>,
    /// A number or a numeric string.
    #[schema(example = 250000)]
    pub price: f64,
    pub image: Option<String>,
}

/// Every field is optional. Absent fields keep their stored value.
#[allow(dead_code)]
#[derive(ToSchema)]
pub struct UpdateBouquetBody {
    #[schema(max_length = 255)]
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub image: Option<String>,
}

#[allow(dead_code)]
#[derive(ToSchema)]
pub struct RegisterBody {
    #[schema(max_length = 255, example = "Neshia Hilton")]
    pub name: String,
    #[schema(max_length = 255, example = "neshia@mail.com")]
    pub email: String,
    #[schema(min_length = 8)]
    pub password: String,
    pub password_confirmation: String,
}

#[allow(dead_code)]
#[derive(ToSchema)]
pub struct LoginBody {
    #[schema(example = "neshia@mail.com")]
    pub email: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_api_route() {
        let doc = ApiDoc::openapi();
        let mut paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        paths.sort_unstable();
        assert_eq!(
            paths,
            [
                "/bouquets",
                "/bouquets/{id}",
                "/user/login",
                "/user/logout",
                "/user/register",
                "/user/whoami",
            ]
        );
    }

    #[test]
    fn names_schemas_after_resources() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let schemas = &doc["components"]["schemas"];
        assert!(schemas["Bouquet"]["properties"]["price"].is_object());
        assert!(schemas["User"]["properties"]["email"].is_object());
        assert!(schemas["User"]["properties"].get("password_hash").is_none());
        assert_eq!(doc["components"]["securitySchemes"]["bearer"]["scheme"], "bearer");
    }
}
