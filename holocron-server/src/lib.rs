//! holocron-server: Star Wars catalog HTTP API
//!
//! Exposes planets, people, users, and per-user favorites over HTTP,
//! backed by a SQLite store.

pub mod db;
pub mod http;
pub mod models;

pub use http::{build_router, run_server, ApiError, AppState, ServerConfig};
