use super::*;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use hmac::Hmac;
use hmac::Mac;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Why a signature could not be produced or did not check out.
#[derive(Debug)]
pub enum SignError {
    Serialize(serde_json::Error),
    Key,
    Encoding(base64::DecodeError),
    Mismatch,
}

impl std::fmt::Display for SignError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Serialize(e) => write!(f, "cannot serialize claims: {}", e),
            Self::Key => write!(f, "unusable signing key"),
            Self::Encoding(e) => write!(f, "signature is not base64: {}", e),
            Self::Mismatch => write!(f, "signature mismatch"),
        }
    }
}

impl std::error::Error for SignError {}

/// HMAC-SHA256 over the canonical claims of a session.
#[derive(Clone)]
pub struct Signer {
    key: Vec<u8>,
}

impl Signer {
    pub fn new(key: &[u8]) -> Self {
        Self { key: key.to_vec() }
    }
    fn mac(&self, session: &Session) -> Result<HmacSha256, SignError> {
        let claims = serde_json::to_vec(&session.claims()).map_err(SignError::Serialize)?;
        let mut mac = HmacSha256::new_from_slice(&self.key).map_err(|_| SignError::Key)?;
        mac.update(&claims);
        Ok(mac)
    }
    /// Raw signature bytes. Equal claims under an equal key always yield
    /// equal bytes; the session's current signature is ignored.
    pub fn sign(&self, session: &Session) -> Result<Vec<u8>, SignError> {
        self.mac(session)
            .map(|mac| mac.finalize().into_bytes().to_vec())
    }
    /// Checks the session's stored signature in constant time.
    pub fn verify(&self, session: &Session) -> Result<(), SignError> {
        let signature = BASE64
            .decode(session.signature())
            .map_err(SignError::Encoding)?;
        self.mac(session)?
            .verify_slice(&signature)
            .map_err(|_| SignError::Mismatch)
    }
}

impl std::fmt::Debug for Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signer").finish_non_exhaustive()
    }
}
