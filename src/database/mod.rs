//! PostgreSQL Database Module
//!
//! Provides the durable backend for rewards accounts. Optional: when
//! PostgreSQL is disabled in configuration the service runs on the
//! in-memory store instead.

pub mod accounts;
pub mod pool;

pub use accounts::AccountRepository;
pub use pool::DatabasePool;
