//! Core identifiers, constants, and runtime utilities for sparovec.
//!
//! This crate provides the foundational types and configuration parameters
//! shared by the persistence, authentication, and server layers.

// ============================================================================
// TRAITS
// ============================================================================
/// Unique identifier trait for domain entities.
pub trait Unique<T = Self> {
    fn id(&self) -> ID<T>;
}

// ============================================================================
// IDENTITY TYPES
// ============================================================================
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::hash::Hash;
use std::hash::Hasher;
use std::marker::PhantomData;

/// Generic ID wrapper providing compile-time type safety over the
/// database-assigned integer key.
pub struct ID<T> {
    inner: i64,
    marker: PhantomData<T>,
}

impl<T> From<i64> for ID<T> {
    fn from(inner: i64) -> Self {
        Self {
            inner,
            marker: PhantomData,
        }
    }
}

impl<T> Copy for ID<T> {}
impl<T> Clone for ID<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Eq for ID<T> {}
impl<T> PartialEq for ID<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T> Hash for ID<T> {
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        self.inner.hash(state);
    }
}

impl<T> Debug for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ID").field(&self.inner).finish()
    }
}
impl<T> Display for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.inner, f)
    }
}

/// Serialized as the bare integer so session payloads stay compact.
impl<T> serde::Serialize for ID<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_i64(self.inner)
    }
}
impl<'de, T> serde::Deserialize<'de> for ID<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        <i64 as serde::Deserialize>::deserialize(deserializer).map(Self::from)
    }
}

// ============================================================================
// ROUTING
// ============================================================================
/// Name of the cookie carrying the signed session token.
pub const SESSION_COOKIE: &str = "session";
/// Where unauthenticated page requests are sent.
pub const SIGN_IN_PATH: &str = "/auth/sign-in";
/// Where freshly signed-in users land.
pub const HOME_PATH: &str = "/";

// ============================================================================
// CREDENTIAL HASHING
// Argon2id. Parameters must match between hash time and verify time,
// otherwise every stored digest stops verifying.
// ============================================================================
/// Passes over memory.
pub const ARGON2_ITERATIONS: u32 = 1;
/// Memory cost in KiB (64 MiB).
pub const ARGON2_MEMORY_KIB: u32 = 64 * 1024;
/// Parallel lanes.
pub const ARGON2_LANES: u32 = 4;
/// Digest length in bytes.
pub const DIGEST_LENGTH: usize = 32;
/// Fresh random salt length in bytes.
pub const SALT_LENGTH: usize = 16;

// ============================================================================
// SESSIONS
// ============================================================================
/// Session lifetime when the deployment does not configure one (7 days).
pub const SESSION_TTL_SECONDS: u64 = 7 * 24 * 60 * 60;
/// Longest accepted session lifetime (one year).
pub const SESSION_TTL_MAX_SECONDS: u64 = 365 * 24 * 60 * 60;

// ============================================================================
// ACCOUNTS
// ============================================================================
/// Shortest accepted username.
pub const USERNAME_MIN: usize = 3;
/// Longest accepted username.
pub const USERNAME_MAX: usize = 32;
/// Shortest accepted password.
pub const PASSWORD_MIN: usize = 8;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize terminal and/or file logging.
/// The terminal logs INFO; the file, when a directory is given, logs DEBUG
/// into a timestamped file inside it.
#[cfg(feature = "server")]
pub fn log(console: bool, directory: Option<&std::path::Path>) -> std::io::Result<()> {
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let mut loggers: Vec<Box<dyn simplelog::SharedLogger>> = Vec::new();
    if console {
        loggers.push(simplelog::TermLogger::new(
            log::LevelFilter::Info,
            config.clone(),
            simplelog::TerminalMode::Mixed,
            simplelog::ColorChoice::Auto,
        ));
    }
    if let Some(directory) = directory {
        std::fs::create_dir_all(directory)?;
        let time = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        loggers.push(simplelog::WriteLogger::new(
            log::LevelFilter::Debug,
            config.clone(),
            std::fs::File::create(directory.join(format!("{}.log", time)))?,
        ));
    }
    simplelog::CombinedLogger::init(loggers).map_err(std::io::Error::other)
}
