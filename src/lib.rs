//! Sparovec server.
//!
//! Wires the authentication core into an actix-web application and exposes
//! the command-line entry points.
//!
//! ## Submodules
//!
//! - [`config`]: Environment-driven, immutable process configuration
//! - [`server`]: HTTP server, middleware stack, and routes
//! - [`cli`]: `serve` and `create-user` commands
pub mod cli;
pub mod config;
pub mod server;

pub use cli::*;
pub use config::Config;
