//! Process-local DAOs for tests and database-less runs.

mod user_dao_impl;

pub use user_dao_impl::InMemoryUserDaoImpl;
