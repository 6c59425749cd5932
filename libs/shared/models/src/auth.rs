use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub role: Option<String>,
    pub exp: Option<u64>,
    pub iat: Option<u64>,
}

/// Which side of a session the caller is on. Session issuance lives in an
/// external identity service; this core only reads the validated claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    Student,
    Professional,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub id: Uuid,
    pub role: ActorRole,
}

impl Actor {
    pub fn is_student(&self) -> bool {
        self.role == ActorRole::Student
    }

    pub fn is_professional(&self) -> bool {
        self.role == ActorRole::Professional
    }
}
