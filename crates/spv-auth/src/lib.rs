//! Credentials, stateless signed sessions, and request identity.
//!
//! Argon2id password hashing plus HMAC-SHA256 signed session tokens that
//! carry all session state on the client. Nothing about a session is stored
//! server-side: a token is valid while it is unexpired and its signature
//! checks out under the process-wide signing key.
//!
//! ## Identity Types
//!
//! - [`Identity`]: Public, secret-free view of a registered user
//! - [`Credentials`]: Stored digest and salt for an identity
//! - [`User`]: Request identity: anonymous or authenticated
//! - [`Session`]: Signed, time-bounded assertion about an identity
//!
//! ## Security
//!
//! - [`Hasher`]: Argon2id hashing and constant-time verification
//! - [`Signer`]: HMAC-SHA256 session signatures
//! - [`Crypto`]: Immutable signing key, TTL, and hashing parameters
//! - [`Authenticator`]: Sign-in, session issuance, and validation
//!
//! ## Wire Format
//!
//! A session token is `base64(json({user, expires_at})) + ":" + signature`.
//! See [`Session::token`] and `Session::try_from(&str)`.
mod codec;
mod credentials;
mod crypto;
mod error;
mod identity;
mod password;
mod repository;
mod service;
mod session;
mod signer;

pub use codec::*;
pub use credentials::*;
pub use crypto::*;
pub use error::*;
pub use identity::*;
pub use password::*;
pub use repository::*;
pub use service::*;
pub use session::*;
pub use signer::*;

#[cfg(feature = "database")]
mod postgres;

#[cfg(feature = "server")]
mod dto;
#[cfg(feature = "server")]
mod handlers;
#[cfg(feature = "server")]
mod middleware;
#[cfg(feature = "server")]
pub mod view;
#[cfg(feature = "server")]
pub use dto::*;
#[cfg(feature = "server")]
pub use handlers::*;
#[cfg(feature = "server")]
pub use middleware::*;

#[cfg(test)]
mod testing;
