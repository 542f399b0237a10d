use anyhow::Context;
use anyhow::bail;

/// Prefix shared by every environment variable the server reads.
const PREFIX: &str = "SPAROVEC";

/// HTTP listener settings.
#[derive(Debug, Clone)]
pub struct Api {
    pub listen_address: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
}

/// Session signing settings. Only `serve` needs the key.
#[derive(Clone)]
pub struct Auth {
    pub signing_key: Option<String>,
    pub session_ttl: std::time::Duration,
}

/// Database connection settings.
#[derive(Debug, Clone)]
pub struct Database {
    pub url: String,
}

/// Logging sinks.
#[derive(Debug, Clone)]
pub struct Observability {
    pub write_to_console: bool,
    pub write_to_file: bool,
    pub path: std::path::PathBuf,
}

/// Immutable process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub api: Api,
    pub auth: Auth,
    pub database: Database,
    pub observability: Observability,
}

impl std::fmt::Debug for Auth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Auth")
            .field("session_ttl", &self.session_ttl)
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Reads `SPAROVEC_<SECTION>_<KEY>` variables from the environment.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; `from_env` uses the process
    /// environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |section: &str, key: &str| {
            lookup(&format!("{}_{}_{}", PREFIX, section, key).to_uppercase())
                .filter(|value| !value.trim().is_empty())
        };
        let flag = |section: &str, key: &str, default: bool| -> anyhow::Result<bool> {
            match get(section, key) {
                None => Ok(default),
                Some(value) => match value.trim().to_lowercase().as_str() {
                    "1" | "true" | "yes" | "on" => Ok(true),
                    "0" | "false" | "no" | "off" => Ok(false),
                    other => bail!("{}_{}_{} is not a boolean: {}", PREFIX, section, key, other),
                },
            }
        };
        let port = get("api", "port")
            .map(|port| port.trim().parse::<u16>())
            .transpose()
            .context("SPAROVEC_API_PORT must be a port number")?
            .unwrap_or(8080);
        let session_ttl = get("auth", "session_ttl")
            .map(|ttl| ttl.trim().parse::<u64>())
            .transpose()
            .context("SPAROVEC_AUTH_SESSION_TTL must be a number of seconds")?
            .unwrap_or(spv_core::SESSION_TTL_SECONDS);
        if !(1..=spv_core::SESSION_TTL_MAX_SECONDS).contains(&session_ttl) {
            bail!(
                "SPAROVEC_AUTH_SESSION_TTL must be between 1 and {} seconds",
                spv_core::SESSION_TTL_MAX_SECONDS
            );
        }
        let signing_key = get("auth", "signing_key");
        Ok(Self {
            api: Api {
                listen_address: get("api", "listen_address").unwrap_or_else(|| "127.0.0.1".into()),
                port,
                cors_allowed_origins: get("api", "cors_allowed_origins")
                    .map(|origins| {
                        origins
                            .split(',')
                            .map(str::trim)
                            .filter(|origin| !origin.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
            auth: Auth {
                signing_key,
                session_ttl: std::time::Duration::from_secs(session_ttl),
            },
            database: Database {
                url: get("database", "url").unwrap_or_default(),
            },
            observability: Observability {
                write_to_console: flag("observability", "write_to_console", true)?,
                write_to_file: flag("observability", "write_to_file", false)?,
                path: get("observability", "path")
                    .unwrap_or_else(|| "logs".into())
                    .into(),
            },
        })
    }

    /// Database URL, required by every command that touches storage.
    pub fn database_url(&self) -> anyhow::Result<&str> {
        match self.database.url.as_str() {
            "" => bail!("SPAROVEC_DATABASE_URL must be set"),
            url => Ok(url),
        }
    }

    /// Signing key, TTL, and reference hashing parameters.
    /// Fails when no signing key is configured.
    pub fn crypto(&self) -> anyhow::Result<spv_auth::Crypto> {
        let key = self
            .auth
            .signing_key
            .as_deref()
            .context("SPAROVEC_AUTH_SIGNING_KEY must be set")?;
        spv_auth::Crypto::new(key.as_bytes(), self.auth.session_ttl)
    }

    /// Starts the configured log sinks.
    pub fn log(&self) -> anyhow::Result<()> {
        let directory = self
            .observability
            .write_to_file
            .then_some(self.observability.path.as_path());
        spv_core::log(self.observability.write_to_console, directory).context("initialize logger")
    }
}
