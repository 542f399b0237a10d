//! In-memory fakes shared by unit tests.
use super::*;
use chrono::TimeZone;
use chrono::Utc;
use spv_core::ID;
use std::sync::Arc;
use std::sync::Mutex;

pub const TTL: std::time::Duration = std::time::Duration::from_secs(60 * 60);
pub const KEY: &[u8] = b"test-signing-key";

/// Credential store backed by a vector; optionally fails every call.
#[derive(Default)]
pub struct Memory {
    users: Mutex<Vec<Credentials>>,
    failing: bool,
}

impl Memory {
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }
}

#[async_trait::async_trait]
impl AuthRepository for Memory {
    async fn get_by_username(&self, username: &str) -> anyhow::Result<Option<Credentials>> {
        if self.failing {
            anyhow::bail!("database unavailable");
        }
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.identity().username() == username)
            .cloned())
    }

    async fn insert(
        &self,
        username: &str,
        hashword: &str,
        salt: &str,
    ) -> anyhow::Result<Credentials> {
        if self.failing {
            anyhow::bail!("database unavailable");
        }
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|c| c.identity().username() == username) {
            anyhow::bail!("duplicate username {}", username);
        }
        let credentials = Credentials::new(
            Identity::new(
                ID::from(users.len() as i64 + 1),
                username.to_string(),
                Utc::now(),
            ),
            hashword.to_string(),
            salt.to_string(),
        );
        users.push(credentials.clone());
        Ok(credentials)
    }
}

/// Cheap Argon2 parameters so tests do not allocate 64 MiB per hash.
pub fn light() -> Hasher {
    Hasher::new(argon2::Params::new(256, 1, 1, Some(spv_core::DIGEST_LENGTH)).unwrap())
}

pub fn crypto() -> Crypto {
    Crypto::new(KEY, TTL).unwrap().with_hasher(light())
}

pub fn authenticator() -> Authenticator {
    Authenticator::new(Arc::new(Memory::default()), crypto())
}

pub fn alice() -> Identity {
    Identity::new(
        ID::from(1),
        "alice".into(),
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    )
}
