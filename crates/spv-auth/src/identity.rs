use chrono::DateTime;
use chrono::Utc;
use spv_core::ID;
use spv_core::Unique;

/// Registered user as seen by the rest of the application.
/// Carries no secret material, so it is safe to embed in session tokens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Identity {
    id: ID<Self>,
    username: String,
    created_at: DateTime<Utc>,
}

impl Identity {
    pub fn new(id: ID<Self>, username: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            username,
            created_at,
        }
    }
    pub fn username(&self) -> &str {
        &self.username
    }
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Unique for Identity {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

/// User represents request authentication state: anonymous or authenticated.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum User {
    #[default]
    Anon,
    Auth(Identity),
}

impl User {
    pub fn id(&self) -> Option<ID<Identity>> {
        self.identity().map(Identity::id)
    }
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Auth(identity) => Some(identity),
            Self::Anon => None,
        }
    }
}

impl From<Identity> for User {
    fn from(identity: Identity) -> Self {
        Self::Auth(identity)
    }
}

impl From<Option<Identity>> for User {
    fn from(identity: Option<Identity>) -> Self {
        identity.map(Self::Auth).unwrap_or_default()
    }
}
