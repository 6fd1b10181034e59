//! HTTP route handlers, one module per aggregate

pub mod favorites;
pub mod health;
pub mod people;
pub mod planets;
pub mod users;
