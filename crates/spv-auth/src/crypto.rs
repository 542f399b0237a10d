use super::*;
use chrono::TimeDelta;
use spv_core::SESSION_TTL_MAX_SECONDS;

/// Process-wide authentication parameters.
///
/// Built once at startup and shared read-only by every request. Changing the
/// signing key invalidates every outstanding session at once.
#[derive(Debug, Clone)]
pub struct Crypto {
    signer: Signer,
    hasher: Hasher,
    ttl: TimeDelta,
}

impl Crypto {
    /// Rejects a zero TTL and any TTL longer than
    /// [`SESSION_TTL_MAX_SECONDS`], so every issued expiry fits a cookie.
    pub fn new(secret: &[u8], ttl: std::time::Duration) -> anyhow::Result<Self> {
        if ttl.is_zero() || ttl > std::time::Duration::from_secs(SESSION_TTL_MAX_SECONDS) {
            anyhow::bail!(
                "session ttl must be between 1 and {} seconds",
                SESSION_TTL_MAX_SECONDS
            );
        }
        Ok(Self {
            signer: Signer::new(secret),
            hasher: Hasher::default(),
            ttl: TimeDelta::from_std(ttl)?,
        })
    }
    pub fn with_hasher(self, hasher: Hasher) -> Self {
        Self { hasher, ..self }
    }
    pub fn signer(&self) -> &Signer {
        &self.signer
    }
    pub fn hasher(&self) -> &Hasher {
        &self.hasher
    }
    pub fn ttl(&self) -> TimeDelta {
        self.ttl
    }
}
