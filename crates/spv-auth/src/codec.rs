use super::*;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::DateTime;
use chrono::Utc;

/// Separates the payload from the signature in a session token.
const SEPARATOR: char = ':';

/// Why a token string could not be turned back into a session.
#[derive(Debug)]
pub enum TokenError {
    /// Not exactly one separator.
    Shape,
    Base64(base64::DecodeError),
    Json(serde_json::Error),
    /// Payload decodes but is not in the form the encoder produces.
    Canonical,
}

impl std::fmt::Display for TokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Shape => write!(f, "malformed token: expected payload:signature"),
            Self::Base64(e) => write!(f, "malformed token payload: {}", e),
            Self::Json(e) => write!(f, "malformed token claims: {}", e),
            Self::Canonical => write!(f, "malformed token: non-canonical claims"),
        }
    }
}

impl std::error::Error for TokenError {}

#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct Payload {
    user: Identity,
    expires_at: DateTime<Utc>,
}

impl Session {
    /// Cookie-safe token: `base64(json(claims)) + ":" + signature`.
    pub fn token(&self) -> Result<String, TokenError> {
        serde_json::to_vec(&self.claims())
            .map(|claims| format!("{}{}{}", BASE64.encode(claims), SEPARATOR, self.signature()))
            .map_err(TokenError::Json)
    }
}

/// Parses a token without judging its signature; see [`Signer::verify`].
impl TryFrom<&str> for Session {
    type Error = TokenError;
    fn try_from(token: &str) -> Result<Self, Self::Error> {
        let mut parts = token.split(SEPARATOR);
        let (Some(payload), Some(signature), None) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(TokenError::Shape);
        };
        let bytes = BASE64.decode(payload).map_err(TokenError::Base64)?;
        let Payload { user, expires_at } =
            serde_json::from_slice(&bytes).map_err(TokenError::Json)?;
        let session = Session::new(user, expires_at).signed(signature.to_string());
        match serde_json::to_vec(&session.claims()).map_err(TokenError::Json)? == bytes {
            true => Ok(session),
            false => Err(TokenError::Canonical),
        }
    }
}
