use std::sync::Arc;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use serde_json::json;
use sha2::Sha256;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::auth::{Actor, ActorRole};

pub struct TestConfig {
    pub jwt_secret: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "test-secret-key-for-jwt-validation-must-be-long-enough".to_string(),
        }
    }
}

impl TestConfig {
    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            jwt_secret: self.jwt_secret.clone(),
            bind_port: 0,
            professional_seed_path: None,
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

pub struct TestActor {
    pub id: Uuid,
    pub role: String,
}

impl TestActor {
    pub fn student() -> Self {
        Self {
            id: Uuid::new_v4(),
            role: "student".to_string(),
        }
    }

    pub fn professional() -> Self {
        Self {
            id: Uuid::new_v4(),
            role: "professional".to_string(),
        }
    }

    pub fn with_id(id: Uuid, role: &str) -> Self {
        Self {
            id,
            role: role.to_string(),
        }
    }

    pub fn to_actor(&self) -> Actor {
        Actor {
            id: self.id,
            role: match self.role.as_str() {
                "professional" => ActorRole::Professional,
                _ => ActorRole::Student,
            },
        }
    }
}

pub struct JwtTestUtils;

impl JwtTestUtils {
    pub fn create_test_token(actor: &TestActor, secret: &str, exp_hours: Option<i64>) -> String {
        let now = Utc::now();
        let exp = now + Duration::hours(exp_hours.unwrap_or(24));

        let header = json!({
            "alg": "HS256",
            "typ": "JWT"
        });

        let payload = json!({
            "sub": actor.id.to_string(),
            "role": actor.role,
            "iat": now.timestamp(),
            "exp": exp.timestamp()
        });

        let header_encoded = URL_SAFE_NO_PAD.encode(header.to_string());
        let payload_encoded = URL_SAFE_NO_PAD.encode(payload.to_string());

        let signing_input = format!("{}.{}", header_encoded, payload_encoded);

        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(signing_input.as_bytes());
        let signature = mac.finalize().into_bytes();
        let signature_encoded = URL_SAFE_NO_PAD.encode(signature);

        format!("{}.{}", signing_input, signature_encoded)
    }

    pub fn create_expired_token(actor: &TestActor, secret: &str) -> String {
        Self::create_test_token(actor, secret, Some(-1))
    }
}
