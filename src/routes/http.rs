//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.

use std::sync::Arc;
use axum::{extract::{Path, Query, State}, http::StatusCode, response::IntoResponse, Json};
use tracing::{info, instrument};

use crate::domain::LevelStep;
use crate::error::ApiError;
use crate::logic::*;
use crate::protocol::*;
use crate::state::{AppState, ReviewScope};

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state), fields(subject = %q.subject))]
pub async fn http_get_areas(
  State(state): State<Arc<AppState>>,
  Query(q): Query<AreasQuery>,
) -> impl IntoResponse {
  let scope = ReviewScope { subject: q.subject, semester: q.semester, area_ids: None };
  Json(state.areas_for(&scope).await)
}

#[instrument(level = "info")]
pub async fn http_get_level_step(Path(step): Path<u8>) -> Result<Json<LevelStepOut>, ApiError> {
  let level_step = LevelStep::try_from(step).map_err(|_| ApiError::BadLevelStep(step))?;
  Ok(Json(LevelStepOut { level_step: step, options: level_step.options() }))
}

#[instrument(level = "info", skip(body), fields(student = %body.student_id, regenerate_count = body.regenerate_count))]
pub async fn http_post_comment(Json(body): Json<CommentIn>) -> impl IntoResponse {
  Json(CommentOut { comment: comment_from_request(&body) })
}

#[instrument(level = "info", skip(state), fields(subject = %q.subject))]
pub async fn http_get_review(
  State(state): State<Arc<AppState>>,
  Query(q): Query<ReviewQuery>,
) -> impl IntoResponse {
  let students = build_review(&state, &q.to_scope()).await;
  info!(target: "comment", subject = %q.subject, students = students.len(), "HTTP review served");
  Json(ReviewOut { students })
}

#[instrument(level = "info", skip(state, body), fields(student = %body.student_id))]
pub async fn http_post_regenerate(
  State(state): State<Arc<AppState>>,
  Json(body): Json<RegenerateIn>,
) -> Result<Json<ReviewEntry>, ApiError> {
  let entry = regenerate(&state, &body.student_id, &body.scope.to_scope()).await?;
  Ok(Json(entry))
}

#[instrument(level = "info", skip(state, body))]
pub async fn http_post_reset(
  State(state): State<Arc<AppState>>,
  Json(body): Json<ResetIn>,
) -> Result<StatusCode, ApiError> {
  reset(&state, body.student_id.as_ref()).await?;
  Ok(StatusCode::NO_CONTENT)
}
