//! DAO (Data Access Object) layer.
//!
//! DAOs provide low-level, single-source data access abstractions.
//!
//! Hierarchy:
//! ```text
//! REST → Repository (interface + impl) → DAO (interface + impl) → DB
//! ```

pub mod r#impl;
pub mod user_dao;

pub use r#impl::{InMemoryUserDaoImpl, MySqlUserDaoImpl};
#[cfg(test)]
pub use user_dao::MockUserDao;
pub use user_dao::UserDao;
