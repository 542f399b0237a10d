use super::*;

/// Credential storage consumed by [`Authenticator`].
/// Abstracts SQL from the authentication logic.
#[async_trait::async_trait]
pub trait AuthRepository: Send + Sync {
    /// The stored credentials for `username`, if any. Usernames are
    /// matched case-sensitively.
    async fn get_by_username(&self, username: &str) -> anyhow::Result<Option<Credentials>>;
    /// Stores a new user and returns it with its assigned id.
    async fn insert(&self, username: &str, hashword: &str, salt: &str)
    -> anyhow::Result<Credentials>;
}
