//! Application state: in-memory classroom stores, review settings, and the
//! per-student regeneration counters.
//!
//! This module owns:
//!   - areas, students, templates (read-mostly, from TOML or built-in seeds)
//!   - ratings keyed by (student, area)
//!   - the regeneration counter per student; it lives only as long as the process
//!
//! Entries that fail caller-side validation (blank sentences, unknown areas or
//! students, levels outside the configured level step) are dropped at startup.

use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::config::{load_config_from_env, ReportConfig, ReviewSettings, TemplateCfg};
use crate::domain::{Area, Rating, Student, StudentId, Template};
use crate::seeds::{seed_areas, seed_ratings, seed_students, seed_templates};
use crate::util::clean_sentence;

type RatingKey = (StudentId, String);

#[derive(Clone)]
pub struct AppState {
    pub areas: Arc<RwLock<Vec<Area>>>,
    pub students: Arc<RwLock<Vec<Student>>>,
    pub templates: Arc<RwLock<Vec<Template>>>,
    pub ratings: Arc<RwLock<HashMap<RatingKey, String>>>,
    pub regenerate_counts: Arc<RwLock<HashMap<StudentId, u32>>>,
    pub review: ReviewSettings,
}

/// Which areas a review covers.
#[derive(Clone, Debug, Default)]
pub struct ReviewScope {
    pub subject: String,
    pub semester: Option<u8>,
    /// Restrict to these area ids (the teacher's unit selection). `None` keeps all.
    pub area_ids: Option<Vec<String>>,
}

impl AppState {
    /// Build state from env: load config if present, otherwise fall back to the built-in classroom.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        Self::from_config(load_config_from_env())
    }

    pub fn from_config(cfg: Option<ReportConfig>) -> Self {
        let cfg = cfg.unwrap_or_default();
        let review = validate_review(cfg.review.clone());

        let (areas, students, ratings, templates) = if cfg.areas.is_empty() {
            info!(target: "reportmate_backend", "No areas configured; using built-in demo classroom.");
            let templates = seed_templates()
                .into_iter()
                .map(|t| TemplateCfg { id: Some(t.id), area_id: t.area_id, level: t.level, sentence: t.sentence })
                .collect();
            (seed_areas(), seed_students(), seed_ratings(), templates)
        } else {
            (cfg.areas, cfg.students, cfg.ratings, cfg.templates)
        };

        let templates = validate_templates(&areas, templates);
        let ratings = index_ratings(&review, &areas, &students, ratings);

        let mut per_subject: HashMap<&str, usize> = HashMap::new();
        for a in &areas {
            *per_subject.entry(a.subject.as_str()).or_default() += 1;
        }
        for (subject, count) in per_subject {
            info!(target: "reportmate_backend", %subject, areas = count, "Startup area inventory");
        }
        info!(
            target: "reportmate_backend",
            students = students.len(),
            templates = templates.len(),
            ratings = ratings.len(),
            level_step = u8::from(review.level_step),
            missing_rating = ?review.missing_rating,
            "Classroom loaded"
        );

        Self {
            areas: Arc::new(RwLock::new(areas)),
            students: Arc::new(RwLock::new(students)),
            templates: Arc::new(RwLock::new(templates)),
            ratings: Arc::new(RwLock::new(ratings)),
            regenerate_counts: Arc::new(RwLock::new(HashMap::new())),
            review,
        }
    }

    /// Areas in display order (`order_index`, ties keep stored order).
    #[instrument(level = "debug", skip(self), fields(subject = %scope.subject))]
    pub async fn areas_for(&self, scope: &ReviewScope) -> Vec<Area> {
        let areas = self.areas.read().await;
        let mut out: Vec<Area> = areas
            .iter()
            .filter(|a| a.subject == scope.subject)
            .filter(|a| match (scope.semester, a.semester) {
                (Some(want), Some(have)) => want == have,
                _ => true,
            })
            .filter(|a| scope.area_ids.as_ref().map_or(true, |ids| ids.contains(&a.id)))
            .cloned()
            .collect();
        out.sort_by_key(|a| a.order_index);
        out
    }

    /// Templates belonging to any of `areas`, in stored order.
    pub async fn templates_for(&self, areas: &[Area]) -> Vec<Template> {
        let templates = self.templates.read().await;
        templates
            .iter()
            .filter(|t| areas.iter().any(|a| a.id == t.area_id))
            .cloned()
            .collect()
    }

    /// Students ordered by roll number.
    pub async fn students(&self) -> Vec<Student> {
        let mut out = self.students.read().await.clone();
        out.sort_by_key(|s| s.number);
        out
    }

    pub async fn get_student(&self, id: &StudentId) -> Option<Student> {
        self.students.read().await.iter().find(|s| &s.id == id).cloned()
    }

    /// Area id -> level for one student.
    pub async fn ratings_for(&self, student: &StudentId) -> HashMap<String, String> {
        let ratings = self.ratings.read().await;
        ratings
            .iter()
            .filter(|((sid, _), _)| sid == student)
            .map(|((_, area), level)| (area.clone(), level.clone()))
            .collect()
    }

    pub async fn regenerate_count(&self, student: &StudentId) -> u32 {
        self.regenerate_counts.read().await.get(student).copied().unwrap_or(0)
    }

    /// Increment and return the student's counter.
    #[instrument(level = "debug", skip(self), fields(%student))]
    pub async fn bump_regenerate(&self, student: &StudentId) -> u32 {
        let mut counts = self.regenerate_counts.write().await;
        let n = counts.entry(student.clone()).or_insert(0);
        *n = n.saturating_add(1);
        *n
    }

    /// Reset one student's counter, or everyone's when `student` is `None`.
    #[instrument(level = "debug", skip(self))]
    pub async fn reset_regenerate(&self, student: Option<&StudentId>) {
        let mut counts = self.regenerate_counts.write().await;
        match student {
            Some(id) => {
                counts.remove(id);
            }
            None => counts.clear(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::from_config(None)
    }
}

/// Drops a `default_level` outside the level step so unrated areas fall back to its middle level.
fn validate_review(mut review: ReviewSettings) -> ReviewSettings {
    if let Some(level) = review.default_level.as_deref() {
        if !review.level_step.contains(level) {
            warn!(
                target: "reportmate_backend",
                default_level = %level,
                level_step = u8::from(review.level_step),
                fallback = review.level_step.middle().value,
                "Ignoring default level outside level step"
            );
            review.default_level = None;
        }
    }
    review
}

fn validate_templates(areas: &[Area], templates: Vec<TemplateCfg>) -> Vec<Template> {
    templates
        .into_iter()
        .filter_map(|t| {
            if !areas.iter().any(|a| a.id == t.area_id) {
                warn!(target: "reportmate_backend", area_id = %t.area_id, "Skipping template for unknown area");
                return None;
            }
            let Some(sentence) = clean_sentence(&t.sentence) else {
                warn!(target: "reportmate_backend", area_id = %t.area_id, level = %t.level, "Skipping template with blank sentence");
                return None;
            };
            Some(Template {
                id: t.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
                area_id: t.area_id,
                level: t.level,
                sentence,
            })
        })
        .collect()
}

/// One level per (student, area); later entries overwrite earlier ones.
fn index_ratings(
    review: &ReviewSettings,
    areas: &[Area],
    students: &[Student],
    ratings: Vec<Rating>,
) -> HashMap<RatingKey, String> {
    let mut out = HashMap::new();
    for r in ratings {
        if !review.level_step.contains(&r.level) {
            warn!(target: "reportmate_backend", student = %r.student_id, area_id = %r.area_id, level = %r.level, "Skipping rating outside level step");
            continue;
        }
        if !students.iter().any(|s| s.id == r.student_id) || !areas.iter().any(|a| a.id == r.area_id) {
            warn!(target: "reportmate_backend", student = %r.student_id, area_id = %r.area_id, "Skipping rating for unknown student or area");
            continue;
        }
        out.insert((r.student_id, r.area_id), r.level);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;

    fn scope(subject: &str) -> ReviewScope {
        ReviewScope { subject: subject.into(), ..Default::default() }
    }

    #[tokio::test]
    async fn seeds_are_used_without_config() {
        let state = AppState::from_config(None);
        let areas = state.areas_for(&scope("국어")).await;
        let ids: Vec<_> = areas.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, ["kor-1", "kor-2", "kor-3"]);
        assert_eq!(state.students().await.len(), 3);
    }

    #[tokio::test]
    async fn invalid_entries_are_dropped() {
        let src = r#"
            [review]
            level_step = 2

            [[areas]]
            id = "b"
            subject = "수학"
            name = "B"
            order_index = 2

            [[areas]]
            id = "a"
            subject = "수학"
            name = "A"
            order_index = 1
            semester = 2

            [[students]]
            id = "s1"
            number = 1
            name = "가"

            [[ratings]]
            student_id = "s1"
            area_id = "a"
            level = "3"

            [[ratings]]
            student_id = "ghost"
            area_id = "a"
            level = "1"

            [[ratings]]
            student_id = "s1"
            area_id = "b"
            level = "1"

            [[templates]]
            area_id = "a"
            level = "1"
            sentence = "   "

            [[templates]]
            area_id = "zzz"
            level = "1"
            sentence = "unknown area"

            [[templates]]
            area_id = "b"
            level = "1"
            sentence = " 잘함. "
        "#;
        let state = AppState::from_config(Some(parse_config(src, "inline").unwrap()));

        let templates = state.templates.read().await.clone();
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].sentence, "잘함.");
        assert!(!templates[0].id.is_empty());

        let ratings = state.ratings_for(&"s1".into()).await;
        assert_eq!(ratings.len(), 1);
        assert_eq!(ratings.get("b").map(String::as_str), Some("1"));

        let ordered: Vec<_> = state.areas_for(&scope("수학")).await.into_iter().map(|a| a.id).collect();
        assert_eq!(ordered, ["a", "b"]);

        let sem1 = ReviewScope { subject: "수학".into(), semester: Some(1), area_ids: None };
        let ids: Vec<_> = state.areas_for(&sem1).await.into_iter().map(|a| a.id).collect();
        assert_eq!(ids, ["b"]);
    }

    #[test]
    fn default_level_outside_step_is_replaced() {
        let bad = parse_config("[review]\nlevel_step = 3\ndefault_level = \"9\"\n", "inline").unwrap();
        let state = AppState::from_config(Some(bad));
        assert_eq!(state.review.default_level, None);
        assert_eq!(state.review.fallback_level(), "2");

        let good = parse_config("[review]\nlevel_step = 4\ndefault_level = \"3\"\n", "inline").unwrap();
        let state = AppState::from_config(Some(good));
        assert_eq!(state.review.fallback_level(), "3");
    }

    #[tokio::test]
    async fn counters_bump_and_reset() {
        let state = AppState::from_config(None);
        let a: StudentId = "seed-s1".into();
        let b: StudentId = "seed-s2".into();
        assert_eq!(state.regenerate_count(&a).await, 0);
        assert_eq!(state.bump_regenerate(&a).await, 1);
        assert_eq!(state.bump_regenerate(&a).await, 2);
        assert_eq!(state.bump_regenerate(&b).await, 1);
        state.reset_regenerate(Some(&a)).await;
        assert_eq!(state.regenerate_count(&a).await, 0);
        assert_eq!(state.regenerate_count(&b).await, 1);
        state.reset_regenerate(None).await;
        assert_eq!(state.regenerate_count(&b).await, 0);
    }
}
