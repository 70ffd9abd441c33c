//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).

use serde::{Deserialize, Serialize};

use crate::domain::{AreaLevel, LevelOption, StudentId, Template};
use crate::generator::CommentLine;
use crate::state::ReviewScope;

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    Generate(CommentIn),
    Review(ReviewQuery),
    Regenerate(RegenerateIn),
    Reset(ResetIn),
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    Comment { comment: String },
    Review { students: Vec<ReviewEntry> },
    ReviewEntry { entry: ReviewEntry },
    ResetDone,
    Error { message: String },
}

/// Stateless generation request: the caller supplies everything.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentIn {
    pub area_levels: Vec<AreaLevel>,
    pub templates: Vec<Template>,
    pub student_id: StudentId,
    #[serde(default)]
    pub regenerate_count: u32,
}

#[derive(Debug, Serialize)]
pub struct CommentOut {
    pub comment: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreasQuery {
    pub subject: String,
    #[serde(default)]
    pub semester: Option<u8>,
}

/// `areaIds` is a comma-separated list in query strings.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReviewQuery {
    pub subject: String,
    #[serde(default)]
    pub semester: Option<u8>,
    #[serde(default)]
    pub area_ids: Option<String>,
}

impl ReviewQuery {
    pub fn to_scope(&self) -> ReviewScope {
        let area_ids = self.area_ids.as_deref().map(|s| {
            s.split(',')
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_string)
                .collect()
        });
        ReviewScope { subject: self.subject.clone(), semester: self.semester, area_ids }
    }
}

/// One student's generated comment in a review.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewEntry {
    pub student_id: StudentId,
    pub number: u32,
    pub name: String,
    pub regenerate_count: u32,
    pub comment: String,
    pub lines: Vec<CommentLine>,
}

#[derive(Debug, Serialize)]
pub struct ReviewOut {
    pub students: Vec<ReviewEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegenerateIn {
    pub student_id: StudentId,
    #[serde(flatten)]
    pub scope: ReviewQuery,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ResetIn {
    #[serde(default)]
    pub student_id: Option<StudentId>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelStepOut {
    pub level_step: u8,
    pub options: &'static [LevelOption],
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}
