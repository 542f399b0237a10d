/// Client-visible authentication outcome.
///
/// Everything that goes wrong while checking a password or a session
/// collapses into one of these two variants. Which of the two is the only
/// thing a caller learns; the underlying cause is logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown user, wrong password, or a malformed, expired, or forged session.
    InvalidCredentials,
    /// Storage, serialization, or random-source failure.
    Internal,
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCredentials => write!(f, "invalid credentials"),
            Self::Internal => write!(f, "internal server error"),
        }
    }
}

impl std::error::Error for AuthError {}
