//! Loading the review settings and classroom bank (areas, students, ratings,
//! templates) from TOML.
//!
//! Expected schema:
//!
//! ```toml
//! [review]
//! level_step = 3                 # 2, 3 or 4
//! missing_rating = "assume_default"   # or "skip"
//! default_level = "2"            # optional; the middle level of the step when omitted
//!
//! [[areas]]
//! id = "kor-1"
//! subject = "국어"
//! name = "1. 시를 즐겨요"
//! order_index = 1
//! semester = 1
//!
//! [[students]]
//! id = "s1"
//! number = 1
//! name = "김하늘"
//!
//! [[ratings]]
//! student_id = "s1"
//! area_id = "kor-1"
//! level = "1"
//!
//! [[templates]]
//! area_id = "kor-1"
//! level = "1"
//! sentence = "시의 분위기를 살려 낭송함."
//! ```

use serde::Deserialize;
use tracing::{error, info};

use crate::domain::{Area, LevelStep, Rating, Student};
use crate::error::ConfigError;

pub const CONFIG_PATH_ENV: &str = "REPORTMATE_CONFIG_PATH";

#[derive(Clone, Debug, Deserialize, Default)]
pub struct ReportConfig {
  #[serde(default)]
  pub review: ReviewSettings,
  #[serde(default)]
  pub areas: Vec<Area>,
  #[serde(default)]
  pub students: Vec<Student>,
  #[serde(default)]
  pub ratings: Vec<Rating>,
  #[serde(default)]
  pub templates: Vec<TemplateCfg>,
}

/// What to do with an area the student has no rating for.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum MissingRatingPolicy {
  /// Use the configured default level for the area.
  #[default]
  AssumeDefault,
  /// Leave the area out of the comment.
  Skip,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ReviewSettings {
  #[serde(default)]
  pub level_step: LevelStep,
  #[serde(default)]
  pub missing_rating: MissingRatingPolicy,
  /// Must be one of the level step's values; see [`ReviewSettings::fallback_level`].
  #[serde(default)]
  pub default_level: Option<String>,
}

impl Default for ReviewSettings {
  fn default() -> Self {
    Self {
      level_step: LevelStep::default(),
      missing_rating: MissingRatingPolicy::default(),
      default_level: None,
    }
  }
}

impl ReviewSettings {
  /// Level assumed for unrated areas: `default_level` when set, otherwise the
  /// middle of the level step.
  pub fn fallback_level(&self) -> &str {
    self.default_level.as_deref().unwrap_or(self.level_step.middle().value)
  }
}

/// Template entry accepted in TOML. `id` is optional; a random one is assigned
/// when missing since ids never take part in selection.
#[derive(Clone, Debug, Deserialize)]
pub struct TemplateCfg {
  #[serde(default)] pub id: Option<String>,
  pub area_id: String,
  pub level: String,
  pub sentence: String,
}

pub fn parse_config(src: &str, path: &str) -> Result<ReportConfig, ConfigError> {
  toml::from_str::<ReportConfig>(src).map_err(|source| ConfigError::Parse { path: path.to_string(), source })
}

pub fn load_config(path: &str) -> Result<ReportConfig, ConfigError> {
  let src = std::fs::read_to_string(path).map_err(|source| ConfigError::Read { path: path.to_string(), source })?;
  parse_config(&src, path)
}

/// Attempt to load `ReportConfig` from REPORTMATE_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_config_from_env() -> Option<ReportConfig> {
  let path = std::env::var(CONFIG_PATH_ENV).ok()?;
  match load_config(&path) {
    Ok(cfg) => {
      info!(
        target: "reportmate_backend",
        %path,
        areas = cfg.areas.len(),
        students = cfg.students.len(),
        templates = cfg.templates.len(),
        "Loaded report config (TOML)"
      );
      Some(cfg)
    }
    Err(e) => {
      error!(target: "reportmate_backend", %path, error = %e, "Failed to load report config");
      None
    }
  }
}
