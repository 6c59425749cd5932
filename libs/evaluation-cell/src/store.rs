// libs/evaluation-cell/src/store.rs
use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::Evaluation;

/// Read-only view onto the self-assessment service.
#[async_trait]
pub trait EvaluationStore: Send + Sync {
    /// All evaluations recorded for a student, newest first.
    async fn list_for_student(&self, student_id: Uuid) -> Result<Vec<Evaluation>>;
}

/// In-process stand-in for the live assessment service.
pub struct InMemoryEvaluationStore {
    entries: RwLock<HashMap<Uuid, Vec<Evaluation>>>,
}

impl InMemoryEvaluationStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub async fn record(&self, evaluation: Evaluation) {
        self.entries
            .write()
            .await
            .entry(evaluation.student_id)
            .or_default()
            .push(evaluation);
    }
}

impl Default for InMemoryEvaluationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EvaluationStore for InMemoryEvaluationStore {
    async fn list_for_student(&self, student_id: Uuid) -> Result<Vec<Evaluation>> {
        let mut evaluations = self
            .entries
            .read()
            .await
            .get(&student_id)
            .cloned()
            .unwrap_or_default();
        evaluations.sort_by(|a, b| b.taken_at.cmp(&a.taken_at));
        Ok(evaluations)
    }
}
