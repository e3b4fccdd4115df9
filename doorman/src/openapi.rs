//! OpenAPI documentation configuration.
//!
//! The generated document covers the upload form and the three analyze
//! endpoints and is served interactively with Scalar at `/docs`.

use utoipa::{
    Modify, OpenApi,
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
};

use crate::api::models::analyze::{AnalyzeJsonRequest, AnalyzeTextForm};
use crate::screening::ScreeningOutcome;

/// Security scheme for the header-authenticated batch endpoint.
struct AccessTokenAddon;

impl Modify for AccessTokenAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.security_schemes.insert(
                "AccessToken".to_string(),
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                    "x-access-token",
                    "Shared-secret access token. The form endpoints carry the same token as the \
                     `access_token` form field instead.",
                ))),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "doorman",
        description = "Compliance-screening gateway: relays profile photos and contact text to a \
                       vision/language model and returns its verdict envelope."
    ),
    paths(
        crate::api::handlers::pages::upload_form,
        crate::api::handlers::analyze::analyze_photo,
        crate::api::handlers::analyze::analyze_photo_batch,
        crate::api::handlers::analyze::analyze_text,
    ),
    components(schemas(AnalyzeJsonRequest, AnalyzeTextForm, ScreeningOutcome)),
    modifiers(&AccessTokenAddon),
    tags(
        (name = "analyze", description = "Compliance screening endpoints"),
        (name = "pages", description = "Manual upload form")
    )
)]
pub struct ApiDoc;
