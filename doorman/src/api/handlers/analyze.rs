//! Compliance-screening endpoints.

use axum::{
    Form, Json,
    extract::{Multipart, State},
    http::HeaderMap,
};
use bytes::Bytes;

use crate::AppState;
use crate::api::models::analyze::{AnalyzeJsonRequest, AnalyzeTextForm};
use crate::auth::verify_access_token;
use crate::errors::{Error, Result};
use crate::screening::{ScreeningOutcome, messages};

#[utoipa::path(
    post,
    path = "/analyze",
    tag = "analyze",
    summary = "Screen an uploaded profile photo",
    description = "Accepts a single image via multipart form-data and relays the provider's \
                   compliance verdict. The access token travels as the `access_token` form field.",
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Screening outcome envelope", body = ScreeningOutcome),
        (status = 401, description = "Invalid or missing access token"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn analyze_photo(State(state): State<AppState>, mut multipart: Multipart) -> Result<Json<ScreeningOutcome>> {
    let mut file: Option<Bytes> = None;
    let mut access_token: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| Error::BadRequest {
        message: format!("Failed to parse multipart data: {}", e),
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "file" => {
                file = Some(field.bytes().await.map_err(|e| Error::BadRequest {
                    message: format!("Failed to read uploaded file: {}", e),
                })?);
            }
            "access_token" => {
                access_token = Some(field.text().await.map_err(|e| Error::BadRequest {
                    message: format!("Failed to read access token field: {}", e),
                })?);
            }
            _ => {}
        }
    }

    // Guard before any provider work
    verify_access_token(access_token.as_deref(), &state.config.access_token)?;

    let file = file.ok_or_else(|| Error::BadRequest {
        message: "Missing file field".to_string(),
    })?;

    tracing::debug!(bytes = file.len(), "Screening uploaded photo");

    let messages = messages::photo_messages(&file);
    Ok(Json(state.screening.evaluate(messages).await))
}

#[utoipa::path(
    post,
    path = "/analyze-json",
    tag = "analyze",
    summary = "Screen a batch of pre-encoded photos",
    description = "Accepts base64-encoded images in a JSON body. The access token travels in the \
                   `x-access-token` header.",
    request_body = AnalyzeJsonRequest,
    responses(
        (status = 200, description = "Screening outcome envelope", body = ScreeningOutcome),
        (status = 400, description = "Missing or empty images_base64 list"),
        (status = 401, description = "Invalid or missing access token"),
    ),
    security(("AccessToken" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn analyze_photo_batch(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<AnalyzeJsonRequest>,
) -> Result<Json<ScreeningOutcome>> {
    let presented = headers.get("x-access-token").and_then(|value| value.to_str().ok());
    verify_access_token(presented, &state.config.access_token)?;

    if body.images_base64.is_empty() {
        return Err(Error::BadRequest {
            message: "images_base64 must contain at least one image".to_string(),
        });
    }

    tracing::debug!(images = body.images_base64.len(), "Screening photo batch");

    let messages = messages::photo_batch_messages(&body.images_base64);
    Ok(Json(state.screening.evaluate(messages).await))
}

#[utoipa::path(
    post,
    path = "/analyze_text",
    tag = "analyze",
    summary = "Screen a reason-for-calling text",
    description = "Accepts form fields `text` and `access_token` and relays the provider's \
                   verdict on whether the text is an appropriate reason for contact.",
    responses(
        (status = 200, description = "Screening outcome envelope", body = ScreeningOutcome),
        (status = 401, description = "Invalid or missing access token"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn analyze_text(State(state): State<AppState>, Form(form): Form<AnalyzeTextForm>) -> Result<Json<ScreeningOutcome>> {
    verify_access_token(form.access_token.as_deref(), &state.config.access_token)?;

    tracing::debug!(chars = form.text.len(), "Screening contact text");

    let messages = messages::text_messages(&form.text);
    Ok(Json(state.screening.evaluate(messages).await))
}
