use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// JSON body for the pre-encoded image batch endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AnalyzeJsonRequest {
    /// One or more base64-encoded images. A missing or empty list is rejected
    /// with 400 before any provider call.
    #[serde(default)]
    pub images_base64: Vec<String>,
}

/// Form body for the free-text endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AnalyzeTextForm {
    /// The "reason for calling" text to screen
    pub text: String,
    /// Shared-secret access token
    pub access_token: Option<String>,
}
