// libs/professional-cell/src/directory.rs
use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::models::Professional;

/// Read-only view onto the professional profile service. Profiles and their
/// availability templates are owned there; this core never writes them.
#[async_trait]
pub trait ProfessionalDirectory: Send + Sync {
    async fn get(&self, id: Uuid) -> Result<Option<Professional>>;
    async fn list(&self) -> Result<Vec<Professional>>;
}

/// In-process directory backed by a profile export, used for wiring and
/// tests in place of the live profile service.
pub struct InMemoryProfessionalDirectory {
    entries: RwLock<HashMap<Uuid, Professional>>,
}

impl InMemoryProfessionalDirectory {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub async fn upsert(&self, professional: Professional) {
        debug!("Loading professional profile: {}", professional.id);
        self.entries
            .write()
            .await
            .insert(professional.id, professional);
    }

    pub async fn load(&self, professionals: Vec<Professional>) {
        let mut entries = self.entries.write().await;
        for professional in professionals {
            entries.insert(professional.id, professional);
        }
    }
}

impl Default for InMemoryProfessionalDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProfessionalDirectory for InMemoryProfessionalDirectory {
    async fn get(&self, id: Uuid) -> Result<Option<Professional>> {
        Ok(self.entries.read().await.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Professional>> {
        let mut professionals: Vec<Professional> =
            self.entries.read().await.values().cloned().collect();
        professionals.sort_by(|a, b| a.display_name.cmp(&b.display_name));
        Ok(professionals)
    }
}
