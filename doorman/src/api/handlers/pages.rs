//! The manual upload form.

use axum::response::Html;

#[utoipa::path(
    get,
    path = "/",
    tag = "pages",
    summary = "Upload form",
    description = "Static HTML page with manual upload forms for the photo and text endpoints. \
                   Served without authentication; the forms carry the access token as a field.",
    responses(
        (status = 200, description = "HTML upload form"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn upload_form() -> Html<&'static str> {
    Html(include_str!("upload.html"))
}
