//! Request and response bodies.

mod user;

pub use user::*;
