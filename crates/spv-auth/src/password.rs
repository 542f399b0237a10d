use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use spv_core::*;
use subtle::ConstantTimeEq;

/// Failure to produce a fresh digest.
#[derive(Debug)]
pub enum HashError {
    Random(String),
    Argon2(argon2::Error),
}

impl std::fmt::Display for HashError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Random(e) => write!(f, "random source failed: {}", e),
            Self::Argon2(e) => write!(f, "argon2 failed: {}", e),
        }
    }
}

impl std::error::Error for HashError {}

impl From<argon2::Error> for HashError {
    fn from(e: argon2::Error) -> Self {
        Self::Argon2(e)
    }
}

/// Argon2id password hasher with fixed parameters.
///
/// The same `Hasher` (or one with equal parameters) must be used to verify
/// a digest that it produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Hasher {
    params: Params,
}

impl Default for Hasher {
    fn default() -> Self {
        Self::new(
            Params::new(
                ARGON2_MEMORY_KIB,
                ARGON2_ITERATIONS,
                ARGON2_LANES,
                Some(DIGEST_LENGTH),
            )
            .unwrap_or(Params::DEFAULT),
        )
    }
}

impl Hasher {
    pub fn new(params: Params) -> Self {
        Self { params }
    }
    fn argon(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Fresh salt from the operating system CSPRNG.
    pub fn salt() -> Result<[u8; SALT_LENGTH], HashError> {
        use rand::TryRngCore;
        let mut bytes = [0u8; SALT_LENGTH];
        rand::rngs::OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| HashError::Random(e.to_string()))?;
        Ok(bytes)
    }

    /// Raw digest of `password` under `salt`.
    pub fn hash(&self, password: &[u8], salt: &[u8]) -> Result<Vec<u8>, argon2::Error> {
        let mut digest = vec![0u8; self.params.output_len().unwrap_or(DIGEST_LENGTH)];
        self.argon()
            .hash_password_into(password, salt, &mut digest)
            .map(|_| digest)
    }

    /// Digest a new password under a fresh salt.
    /// Returns `(hashword, salt)` as base64 text, ready for storage.
    pub fn digest(&self, password: &str) -> Result<(String, String), HashError> {
        let salt = Self::salt()?;
        let hashword = self.hash(password.as_bytes(), &salt)?;
        Ok((BASE64.encode(hashword), BASE64.encode(salt)))
    }

    /// Whether `candidate` matches the stored digest.
    /// Corrupt stored values verify as `false`.
    pub fn verify(&self, hashword: &str, salt: &str, candidate: &str) -> bool {
        let (Ok(hashword), Ok(salt)) = (BASE64.decode(hashword), BASE64.decode(salt)) else {
            return false;
        };
        self.hash(candidate.as_bytes(), &salt)
            .map(|computed| bool::from(computed.as_slice().ct_eq(hashword.as_slice())))
            .unwrap_or(false)
    }

    /// Spend the same work as a real verification and discard the result.
    /// Keeps lookups of unknown usernames as slow as wrong passwords.
    pub fn decoy(&self, candidate: &str) {
        let _ = self.hash(candidate.as_bytes(), &[0u8; SALT_LENGTH]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::light;

    #[test]
    fn verifies_own_digest() {
        let hasher = light();
        let (hashword, salt) = hasher.digest("correct-horse").unwrap();
        assert!(hasher.verify(&hashword, &salt, "correct-horse"));
    }

    #[test]
    fn rejects_wrong_password() {
        let hasher = light();
        let (hashword, salt) = hasher.digest("correct").unwrap();
        assert!(!hasher.verify(&hashword, &salt, "wrong"));
        assert!(!hasher.verify(&hashword, &salt, ""));
    }

    #[test]
    fn deterministic_under_same_salt() {
        let hasher = light();
        let salt = [7u8; SALT_LENGTH];
        assert_eq!(
            hasher.hash(b"password", &salt).unwrap(),
            hasher.hash(b"password", &salt).unwrap()
        );
    }

    #[test]
    fn salt_changes_digest() {
        let hasher = light();
        let a = hasher.hash(b"password", &[1u8; SALT_LENGTH]).unwrap();
        let b = hasher.hash(b"password", &[2u8; SALT_LENGTH]).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn salts_are_fresh() {
        let a = Hasher::salt().unwrap();
        let b = Hasher::salt().unwrap();
        assert_eq!(a.len(), SALT_LENGTH);
        assert_ne!(a, b);
    }

    #[test]
    fn corrupt_storage_verifies_false() {
        let hasher = light();
        let (hashword, salt) = hasher.digest("password").unwrap();
        assert!(!hasher.verify("not base64!", &salt, "password"));
        assert!(!hasher.verify(&hashword, "not base64!", "password"));
        assert!(!hasher.verify(&hashword, "", "password"));
        assert!(!hasher.verify("", &salt, "password"));
    }

    #[test]
    fn parameters_must_match() {
        let (hashword, salt) = light().digest("password").unwrap();
        let other = Hasher::new(Params::new(512, 1, 1, Some(DIGEST_LENGTH)).unwrap());
        assert!(!other.verify(&hashword, &salt, "password"));
    }

    #[test]
    fn default_uses_reference_parameters() {
        let params = Hasher::default().params;
        assert_eq!(params.m_cost(), ARGON2_MEMORY_KIB);
        assert_eq!(params.t_cost(), ARGON2_ITERATIONS);
        assert_eq!(params.p_cost(), ARGON2_LANES);
        assert_eq!(params.output_len(), Some(DIGEST_LENGTH));
    }

    #[test]
    fn reference_parameters() {
        let hasher = Hasher::default();
        let (hashword, salt) = hasher.digest("correct-horse").unwrap();
        assert_eq!(BASE64.decode(&hashword).unwrap().len(), DIGEST_LENGTH);
        assert_eq!(BASE64.decode(&salt).unwrap().len(), SALT_LENGTH);
        assert!(hasher.verify(&hashword, &salt, "correct-horse"));
    }
}
