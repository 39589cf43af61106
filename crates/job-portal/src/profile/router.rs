use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{ProfileAction, ProfileDraft};

#[derive(Debug, Deserialize)]
pub(crate) struct DraftEditRequest {
    #[serde(default)]
    pub(crate) draft: ProfileDraft,
    #[serde(default)]
    pub(crate) actions: Vec<ProfileAction>,
}

/// Stateless endpoint replaying form edits against a posted draft.
pub fn profile_router() -> Router {
    Router::new().route("/api/v1/profile/draft", post(apply_draft_handler))
}

pub(crate) async fn apply_draft_handler(
    axum::Json(request): axum::Json<DraftEditRequest>,
) -> Response {
    let DraftEditRequest { mut draft, actions } = request;

    match draft.apply_all(actions) {
        Ok(()) => (StatusCode::OK, axum::Json(draft)).into_response(),
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
    }
}
