//! Core behaviors shared by both HTTP and WebSocket handlers.
//!
//! This includes:
//!   - resolving a student's ratings into ordered (area, level) pairs
//!   - building the review (one comment per student) for a subject
//!   - regenerating / resetting a student's comment variant
//!   - stateless generation from a caller-supplied pool

use std::collections::HashMap;

use tracing::{debug, info, instrument};

use crate::config::{MissingRatingPolicy, ReviewSettings};
use crate::domain::{Area, AreaLevel, Student, StudentId, Template};
use crate::error::ApiError;
use crate::generator::{generate_comment, generate_comment_lines, join_lines, GenerateOptions};
use crate::protocol::{CommentIn, ReviewEntry};
use crate::state::{AppState, ReviewScope};
use crate::util::trunc_for_log;

/// Pairs each area (in the given order) with the student's level, applying the
/// missing-rating policy for unrated areas.
pub fn resolve_area_levels(
  areas: &[Area],
  ratings: &HashMap<String, String>,
  settings: &ReviewSettings,
) -> Vec<AreaLevel> {
  areas
    .iter()
    .filter_map(|a| match ratings.get(&a.id) {
      Some(level) => Some(AreaLevel::new(a.id.clone(), level.clone())),
      None => match settings.missing_rating {
        MissingRatingPolicy::AssumeDefault => Some(AreaLevel::new(a.id.clone(), settings.fallback_level())),
        MissingRatingPolicy::Skip => None,
      },
    })
    .collect()
}

#[instrument(level = "info", skip(req), fields(student = %req.student_id, areas = req.area_levels.len(), templates = req.templates.len()))]
pub fn comment_from_request(req: &CommentIn) -> String {
  let options = GenerateOptions::new(req.student_id.clone()).with_regenerate_count(req.regenerate_count);
  let comment = generate_comment(&req.area_levels, &req.templates, &options);
  debug!(target: "comment", comment = %trunc_for_log(&comment, 40), "Stateless comment generated");
  comment
}

async fn entry_for(
  state: &AppState,
  student: Student,
  areas: &[Area],
  templates: &[Template],
) -> ReviewEntry {
  let ratings = state.ratings_for(&student.id).await;
  let area_levels = resolve_area_levels(areas, &ratings, &state.review);
  let regenerate_count = state.regenerate_count(&student.id).await;
  let options = GenerateOptions::new(student.id.clone()).with_regenerate_count(regenerate_count);
  let lines = generate_comment_lines(&area_levels, templates, &options);
  let comment = join_lines(&lines);
  debug!(
    target: "comment",
    student = %student.id,
    regenerate_count,
    lines = lines.len(),
    skipped = area_levels.len() - lines.len(),
    "Comment assembled"
  );
  ReviewEntry {
    student_id: student.id,
    number: student.number,
    name: student.name,
    regenerate_count,
    comment,
    lines,
  }
}

/// One entry per student, ordered by roll number.
#[instrument(level = "info", skip(state), fields(subject = %scope.subject))]
pub async fn build_review(state: &AppState, scope: &ReviewScope) -> Vec<ReviewEntry> {
  let areas = state.areas_for(scope).await;
  let templates = state.templates_for(&areas).await;
  let mut out = Vec::new();
  for student in state.students().await {
    out.push(entry_for(state, student, &areas, &templates).await);
  }
  let empty = out.iter().filter(|e| e.comment.is_empty()).count();
  info!(target: "comment", subject = %scope.subject, areas = areas.len(), students = out.len(), empty, "Review built");
  out
}

#[instrument(level = "info", skip(state), fields(subject = %scope.subject, %student_id))]
pub async fn review_student(state: &AppState, student_id: &StudentId, scope: &ReviewScope) -> Result<ReviewEntry, ApiError> {
  let student = state
    .get_student(student_id)
    .await
    .ok_or_else(|| ApiError::UnknownStudent(student_id.clone()))?;
  let areas = state.areas_for(scope).await;
  let templates = state.templates_for(&areas).await;
  Ok(entry_for(state, student, &areas, &templates).await)
}

/// Bump the student's counter and return the new variant.
#[instrument(level = "info", skip(state), fields(subject = %scope.subject, %student_id))]
pub async fn regenerate(state: &AppState, student_id: &StudentId, scope: &ReviewScope) -> Result<ReviewEntry, ApiError> {
  if state.get_student(student_id).await.is_none() {
    return Err(ApiError::UnknownStudent(student_id.clone()));
  }
  let n = state.bump_regenerate(student_id).await;
  info!(target: "comment", %student_id, regenerate_count = n, "Regenerate requested");
  review_student(state, student_id, scope).await
}

#[instrument(level = "info", skip(state))]
pub async fn reset(state: &AppState, student_id: Option<&StudentId>) -> Result<(), ApiError> {
  if let Some(id) = student_id {
    if state.get_student(id).await.is_none() {
      return Err(ApiError::UnknownStudent(id.clone()));
    }
  }
  state.reset_regenerate(student_id).await;
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn area(id: &str, order_index: i32) -> Area {
    Area { id: id.into(), subject: "국어".into(), name: id.into(), order_index, semester: None }
  }

  fn settings(policy: MissingRatingPolicy) -> ReviewSettings {
    ReviewSettings { missing_rating: policy, ..Default::default() }
  }

  #[test]
  fn unrated_area_gets_default_level() {
    let areas = [area("a1", 1), area("a2", 2)];
    let ratings = HashMap::from([("a2".to_string(), "1".to_string())]);
    let out = resolve_area_levels(&areas, &ratings, &settings(MissingRatingPolicy::AssumeDefault));
    assert_eq!(out, vec![AreaLevel::new("a1", "2"), AreaLevel::new("a2", "1")]);
  }

  #[test]
  fn unrated_area_is_skipped_under_skip_policy() {
    let areas = [area("a1", 1), area("a2", 2)];
    let ratings = HashMap::from([("a2".to_string(), "3".to_string())]);
    let out = resolve_area_levels(&areas, &ratings, &settings(MissingRatingPolicy::Skip));
    assert_eq!(out, vec![AreaLevel::new("a2", "3")]);
  }

  #[tokio::test]
  async fn seed_review_applies_default_level() {
    let state = AppState::from_config(None);
    let scope = ReviewScope { subject: "국어".into(), ..Default::default() };
    let review = build_review(&state, &scope).await;
    assert_eq!(review.len(), 3);
    // seed-s3 has no kor-2 rating; default level "2" has a single template
    let s3 = &review[2];
    assert_eq!(s3.student_id, StudentId::from("seed-s3"));
    let kor2 = s3.lines.iter().find(|l| l.area_id == "kor-2").unwrap();
    assert_eq!(kor2.level, "2");
    assert_eq!(kor2.template_id, "t-kor-2-2a");
    assert_eq!(s3.lines.len(), 3);
  }

  #[tokio::test]
  async fn regenerate_unknown_student_fails() {
    let state = AppState::from_config(None);
    let scope = ReviewScope { subject: "국어".into(), ..Default::default() };
    let err = regenerate(&state, &"nobody".into(), &scope).await.unwrap_err();
    assert!(matches!(err, ApiError::UnknownStudent(_)));
  }

  #[tokio::test]
  async fn regenerate_is_reproducible_after_reset() {
    let state = AppState::from_config(None);
    let scope = ReviewScope { subject: "국어".into(), ..Default::default() };
    let id = StudentId::from("seed-s1");
    let first = review_student(&state, &id, &scope).await.unwrap();
    let bumped = regenerate(&state, &id, &scope).await.unwrap();
    assert_eq!(bumped.regenerate_count, 1);
    reset(&state, Some(&id)).await.unwrap();
    let again = review_student(&state, &id, &scope).await.unwrap();
    assert_eq!(again.comment, first.comment);
    assert_eq!(again.regenerate_count, 0);
  }
}
