use super::*;
use spv_core::ID;
use spv_core::Unique;

/// Stored secret material for an identity.
/// Both the digest and the salt are kept as base64 text.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    identity: Identity,
    hashword: String,
    salt: String,
}

impl Credentials {
    pub fn new(identity: Identity, hashword: String, salt: String) -> Self {
        Self {
            identity,
            hashword,
            salt,
        }
    }
    pub fn identity(&self) -> &Identity {
        &self.identity
    }
    pub fn hashword(&self) -> &str {
        &self.hashword
    }
    pub fn salt(&self) -> &str {
        &self.salt
    }
    pub fn into_identity(self) -> Identity {
        self.identity
    }
}

impl Unique<Identity> for Credentials {
    fn id(&self) -> ID<Identity> {
        self.identity.id()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "database")]
mod schema {
    use super::*;
    use spv_pg::*;

    impl Schema for Credentials {
        fn name() -> &'static str {
            USERS
        }
        fn creates() -> &'static str {
            const_format::concatcp!(
                "CREATE TABLE IF NOT EXISTS ",
                USERS,
                " (
                    id          BIGSERIAL PRIMARY KEY,
                    username    VARCHAR(32) UNIQUE NOT NULL,
                    hashword    TEXT NOT NULL,
                    salt        TEXT NOT NULL,
                    created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );"
            )
        }
    }

    impl From<&tokio_postgres::Row> for Credentials {
        fn from(row: &tokio_postgres::Row) -> Self {
            Self::new(
                Identity::new(
                    ID::from(row.get::<_, i64>(0)),
                    row.get::<_, String>(1),
                    row.get::<_, chrono::DateTime<chrono::Utc>>(4),
                ),
                row.get::<_, String>(2),
                row.get::<_, String>(3),
            )
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_hides_secrets() {
        let credentials = Credentials::new(
            Identity::new(ID::from(1), "alice".into(), chrono::Utc::now()),
            "ZGlnZXN0".into(),
            "c2FsdA==".into(),
        );
        let debug = format!("{:?}", credentials);
        assert!(debug.contains("alice"));
        assert!(!debug.contains("ZGlnZXN0"));
        assert!(!debug.contains("c2FsdA=="));
    }
}
