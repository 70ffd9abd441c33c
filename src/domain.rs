//! Domain models: students, evaluation areas, ratings, sentence templates and level steps.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Student identity. Stores hand out either text ids ("s1", uuids) or plain
/// integers; both render to the same text used in selection keys.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StudentId {
  Number(i64),
  Text(String),
}

impl fmt::Display for StudentId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      StudentId::Number(n) => write!(f, "{n}"),
      StudentId::Text(s) => f.write_str(s),
    }
  }
}

impl From<&str> for StudentId {
  fn from(s: &str) -> Self { StudentId::Text(s.to_string()) }
}
impl From<String> for StudentId {
  fn from(s: String) -> Self { StudentId::Text(s) }
}
impl From<i64> for StudentId {
  fn from(n: i64) -> Self { StudentId::Number(n) }
}

/// An evaluation unit within a subject (e.g. a curriculum chapter).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Area {
  pub id: String,
  pub subject: String,
  pub name: String,
  #[serde(default)] pub order_index: i32,
  /// 1 or 2; areas without a semester show up in both.
  #[serde(default)] pub semester: Option<u8>,
}

/// Candidate sentence for one (area, level) pair.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Template {
  pub id: String,
  #[serde(alias = "areaId")] pub area_id: String,
  pub level: String,
  pub sentence: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Student {
  pub id: StudentId,
  /// Class roll number, used for display order.
  pub number: u32,
  pub name: String,
}

/// Level a student holds in one area.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rating {
  #[serde(alias = "studentId")] pub student_id: StudentId,
  #[serde(alias = "areaId")] pub area_id: String,
  pub level: String,
}

/// A resolved (area, level) pair handed to the comment generator.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AreaLevel {
  #[serde(alias = "area_id")] pub area_id: String,
  pub level: String,
}

impl AreaLevel {
  pub fn new(area_id: impl Into<String>, level: impl Into<String>) -> Self {
    Self { area_id: area_id.into(), level: level.into() }
  }
}

/// How many proficiency levels the teacher rates with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum LevelStep {
  Two,
  Three,
  Four,
}

impl Default for LevelStep {
  fn default() -> Self { LevelStep::Three }
}

impl TryFrom<u8> for LevelStep {
  type Error = String;
  fn try_from(n: u8) -> Result<Self, Self::Error> {
    match n {
      2 => Ok(LevelStep::Two),
      3 => Ok(LevelStep::Three),
      4 => Ok(LevelStep::Four),
      other => Err(format!("unsupported level step {other} (expected 2, 3 or 4)")),
    }
  }
}

impl From<LevelStep> for u8 {
  fn from(step: LevelStep) -> u8 {
    match step {
      LevelStep::Two => 2,
      LevelStep::Three => 3,
      LevelStep::Four => 4,
    }
  }
}

/// One selectable level: the stored value and its display label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct LevelOption {
  pub value: &'static str,
  pub label: &'static str,
}

impl LevelStep {
  /// Options from highest to lowest proficiency.
  pub fn options(self) -> &'static [LevelOption] {
    const TWO: &[LevelOption] = &[
      LevelOption { value: "1", label: "잘함" },
      LevelOption { value: "2", label: "노력요함" },
    ];
    const THREE: &[LevelOption] = &[
      LevelOption { value: "1", label: "잘함" },
      LevelOption { value: "2", label: "보통" },
      LevelOption { value: "3", label: "노력요함" },
    ];
    const FOUR: &[LevelOption] = &[
      LevelOption { value: "1", label: "매우잘함" },
      LevelOption { value: "2", label: "잘함" },
      LevelOption { value: "3", label: "보통" },
      LevelOption { value: "4", label: "노력요함" },
    ];
    match self {
      LevelStep::Two => TWO,
      LevelStep::Three => THREE,
      LevelStep::Four => FOUR,
    }
  }

  /// Middle option, rounding toward the higher level for even steps.
  pub fn middle(self) -> LevelOption {
    let opts = self.options();
    opts[(opts.len() - 1) / 2]
  }

  pub fn contains(self, level: &str) -> bool {
    self.options().iter().any(|o| o.value == level)
  }
}
