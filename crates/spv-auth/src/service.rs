use super::*;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::DateTime;
use chrono::Utc;
use spv_core::Unique;
use std::sync::Arc;

/// Sign-in, session issuance, and session validation.
///
/// This is the only place low-level hashing, signing, and storage failures
/// are translated into [`AuthError`]. Callers never learn more than
/// "invalid credentials" or "internal error"; details go to the log.
#[derive(Clone)]
pub struct Authenticator {
    repository: Arc<dyn AuthRepository>,
    crypto: Crypto,
}

impl Authenticator {
    pub fn new(repository: Arc<dyn AuthRepository>, crypto: Crypto) -> Self {
        Self { repository, crypto }
    }
    pub fn crypto(&self) -> &Crypto {
        &self.crypto
    }

    /// Checks a username and password.
    /// Unknown usernames and wrong passwords fail identically.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<Identity, AuthError> {
        match self.repository.get_by_username(username).await {
            Err(e) => {
                log::error!("failed to look up user: {:#}", e);
                Err(AuthError::Internal)
            }
            Ok(None) => {
                log::debug!("sign-in attempt for unknown user");
                self.crypto.hasher().decoy(password);
                Err(AuthError::InvalidCredentials)
            }
            Ok(Some(credentials)) => {
                let hasher = self.crypto.hasher();
                match hasher.verify(credentials.hashword(), credentials.salt(), password) {
                    true => Ok(credentials.into_identity()),
                    false => {
                        log::info!("wrong password for user {}", credentials.id());
                        Err(AuthError::InvalidCredentials)
                    }
                }
            }
        }
    }

    /// Registers a user under a freshly salted digest.
    pub async fn create_user(&self, username: &str, password: &str) -> Result<Identity, AuthError> {
        create_user(self.repository.as_ref(), self.crypto.hasher(), username, password).await
    }

    /// Issues a signed session for `user` that expires one TTL from now.
    pub fn create_session(&self, user: Identity) -> Result<Session, AuthError> {
        self.create_session_at(user, Utc::now())
    }

    /// Issues a signed session as if the current time were `now`.
    pub fn create_session_at(&self, user: Identity, now: DateTime<Utc>) -> Result<Session, AuthError> {
        let expires_at = now.checked_add_signed(self.crypto.ttl()).ok_or_else(|| {
            log::error!("session expiry overflows for ttl {}", self.crypto.ttl());
            AuthError::Internal
        })?;
        let session = Session::new(user, expires_at);
        let signature = self.crypto.signer().sign(&session).map_err(|e| {
            log::error!("failed to sign session: {}", e);
            AuthError::Internal
        })?;
        Ok(session.signed(BASE64.encode(signature)))
    }

    /// Checks expiry and signature against the current time.
    pub fn validate_session(&self, session: &Session) -> Result<(), AuthError> {
        self.validate_at(session, Utc::now())
    }

    /// Checks expiry and signature against `now`.
    /// A pure function of the session, the signing key, and `now`.
    pub fn validate_at(&self, session: &Session, now: DateTime<Utc>) -> Result<(), AuthError> {
        if session.expired(now) {
            log::debug!(
                "session for user {} expired at {}",
                session.user().id(),
                session.expires_at()
            );
            return Err(AuthError::InvalidCredentials);
        }
        self.crypto.signer().verify(session).map_err(|e| {
            log::warn!("rejected session for user {}: {}", session.user().id(), e);
            AuthError::InvalidCredentials
        })
    }

    /// Decodes and validates a token in one step.
    /// Malformed tokens are logged apart from expired or forged ones.
    pub fn resolve(&self, token: &str) -> Result<Identity, AuthError> {
        let session = Session::try_from(token).map_err(|e| {
            log::debug!("{}", e);
            AuthError::InvalidCredentials
        })?;
        self.validate_session(&session)
            .map(|_| session.into_user())
    }
}

/// Registers a user without a signing key; account provisioning never
/// issues sessions.
pub async fn create_user(
    repository: &dyn AuthRepository,
    hasher: &Hasher,
    username: &str,
    password: &str,
) -> Result<Identity, AuthError> {
    let (hashword, salt) = hasher.digest(password).map_err(|e| {
        log::error!("failed to hash password: {}", e);
        AuthError::Internal
    })?;
    repository
        .insert(username, &hashword, &salt)
        .await
        .map(Credentials::into_identity)
        .inspect(|identity| log::info!("created user {}", identity.id()))
        .map_err(|e| {
            log::error!("failed to insert user: {:#}", e);
            AuthError::Internal
        })
}
