//! HTTP endpoint handlers. These are thin wrappers that forward to core
//! logic and map failures onto status codes + JSON error bodies.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    Json,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::logic::{submit_plan, SubmitError, MSG_GENERATION_FAILED, MSG_REQUIRED};
use crate::protocol::*;
use crate::render::{render_page, Tab};
use crate::state::AppState;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse {
    Json(HealthOut { ok: true })
}

/// Submit the form: validate, generate once, store the session.
#[instrument(level = "info", skip(state, body), fields(subject = %body.subject, topic = %body.topic))]
pub async fn http_create_plan(
    State(state): State<Arc<AppState>>,
    Json(body): Json<crate::domain::UserInput>,
) -> impl IntoResponse {
    match submit_plan(&state, body).await {
        Ok(plan_id) => {
            info!(target: "generator", %plan_id, "HTTP plan created");
            (StatusCode::OK, Json(PlanCreated { plan_id })).into_response()
        }
        Err(SubmitError::Validation(_)) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorOut { message: MSG_REQUIRED.into() }),
        )
            .into_response(),
        Err(SubmitError::NoGenerator) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorOut { message: MSG_GENERATION_FAILED.into() }),
        )
            .into_response(),
        Err(SubmitError::Generation(_)) => (
            StatusCode::BAD_GATEWAY,
            Json(ErrorOut { message: MSG_GENERATION_FAILED.into() }),
        )
            .into_response(),
    }
}

#[instrument(level = "info", skip(state), fields(%id))]
pub async fn http_get_plan(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match state.get_session(&id).await {
        Some(s) => (StatusCode::OK, Json(to_summary(id, &s))).into_response(),
        None => not_found_json(),
    }
}

/// "Back" navigation: discard the session. Idempotent from the client's
/// point of view; a second delete simply reports 404.
#[instrument(level = "info", skip(state), fields(%id))]
pub async fn http_delete_plan(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    if state.remove_session(&id).await {
        info!(target: "rppm_backend", %id, "Plan session discarded");
        StatusCode::NO_CONTENT.into_response()
    } else {
        not_found_json()
    }
}

/// One of the four document views over a stored session. Rendering never
/// re-invokes the generator; tab switches are plain reads.
#[instrument(level = "info", skip(state), fields(%id, %tab))]
pub async fn http_view_plan(
    State(state): State<Arc<AppState>>,
    Path((id, tab)): Path<(Uuid, String)>,
) -> impl IntoResponse {
    let tab = match tab.as_str() {
        "rppm" => Tab::Rppm,
        "modul" => Tab::Modul,
        "lkpd" => Tab::Lkpd,
        "media" => Tab::Media,
        _ => return not_found_html(),
    };
    match state.get_session(&id).await {
        Some(session) => Html(render_page(id, tab, &session)).into_response(),
        None => not_found_html(),
    }
}

fn not_found_json() -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorOut { message: "Rencana tidak ditemukan.".into() }),
    )
        .into_response()
}

fn not_found_html() -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Html(
            r#"<!DOCTYPE html><html lang="id"><body style="font-family:sans-serif;text-align:center;padding:40px">
<h2>Rencana tidak ditemukan</h2>
<p>Sesi mungkin sudah dihapus. <a href="/">Kembali ke formulir</a>.</p>
</body></html>"#,
        ),
    )
        .into_response()
}
