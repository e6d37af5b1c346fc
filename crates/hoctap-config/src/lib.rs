//! # HocTap Config
//!
//! Configuration management for the HocTap user API.
//! Settings are layered from built-in defaults, an optional `config.env`
//! file, optional TOML files and environment variables.

mod app_config;
mod loader;
mod validation;

pub use app_config::*;
pub use loader::*;
pub use validation::*;
