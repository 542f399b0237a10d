use super::*;
use chrono::DateTime;
use chrono::Utc;

/// Signed, time-bounded assertion that an identity authenticated.
///
/// Never stored server-side and never mutated once signed. The signature
/// is base64 text and is not part of the bytes it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user: Identity,
    expires_at: DateTime<Utc>,
    signature: String,
}

/// The signed portion of a session, in its canonical serialized shape.
#[derive(serde::Serialize)]
pub struct Claims<'a> {
    user: &'a Identity,
    expires_at: &'a DateTime<Utc>,
}

impl Session {
    /// Unsigned session.
    pub fn new(user: Identity, expires_at: DateTime<Utc>) -> Self {
        Self {
            user,
            expires_at,
            signature: String::new(),
        }
    }
    pub fn signed(self, signature: String) -> Self {
        Self { signature, ..self }
    }
    pub fn user(&self) -> &Identity {
        &self.user
    }
    pub fn into_user(self) -> Identity {
        self.user
    }
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
    pub fn signature(&self) -> &str {
        &self.signature
    }
    pub fn expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
    pub fn claims(&self) -> Claims<'_> {
        Claims {
            user: &self.user,
            expires_at: &self.expires_at,
        }
    }
}
