//! # HocTap REST
//!
//! REST API layer using Axum for the HocTap user API.
//! Provides the user CRUD endpoints, health and welcome endpoints, the
//! static dashboard and the OpenAPI document.

pub mod controllers;
pub mod dto;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
