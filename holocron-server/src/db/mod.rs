//! Database layer - connection pool, migrations, and repositories
//!
//! # Design Principles
//!
//! - Connection pool (max 5 connections) - no Arc<Mutex<Connection>>
//! - Reads that need related rows use JOINs - no N+1 queries
//! - Multi-step mutations run inside explicit transactions
//! - Referential integrity is existence-checked in the repositories;
//!   SQLite foreign keys stay unenforced (see `pool`)

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::create_pool;
pub use repos::*;
