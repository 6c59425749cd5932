// libs/evaluation-cell/src/models.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A completed self-assessment questionnaire result. Scoring happens in the
/// external assessment service; this core only reads the outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub id: Uuid,
    pub student_id: Uuid,
    /// Instrument identifier, e.g. "PHQ-9" or "GAD-7".
    pub instrument: String,
    pub score: i32,
    /// Severity band label produced by the instrument's scoring rules.
    pub band: String,
    pub taken_at: DateTime<Utc>,
}
