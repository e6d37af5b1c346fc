//! DAO implementations.
//!
//! Trait definitions live in the parent `dao/` module (e.g. `user_dao.rs`).
//! Implementations are organized by backing store.

pub mod memory;
pub mod mysql;

pub use memory::InMemoryUserDaoImpl;
pub use mysql::MySqlUserDaoImpl;
