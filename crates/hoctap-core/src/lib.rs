//! # HocTap Core
//!
//! Core types and error definitions for the HocTap user API.
//! Every other crate in the workspace speaks in terms of the [`User`]
//! entity, the typed [`UserId`] and the closed [`HoctapError`] taxonomy
//! defined here.

pub mod domain;
pub mod error;
pub mod id;
pub mod result;

pub use domain::*;
pub use error::*;
pub use id::*;
pub use result::*;
