//! # HocTap Server Library
//!
//! Composition root for the HocTap user API: logging setup, the
//! application lifecycle and startup reporting.

pub mod app;
pub mod logging;
pub mod startup;

pub use app::{serve, Application};
