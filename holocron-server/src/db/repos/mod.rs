//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - References are resolved with existence checks inside the writing
//!   transaction, not with database-level cascades
//! - Reads that attach related rows use JOINs (no N+1)
//! - Favorite uniqueness is checked in the transaction and backstopped by
//!   a UNIQUE constraint

pub mod favorites;
pub mod people;
pub mod planets;
pub mod users;

pub use favorites::{FavoriteRepo, PeopleFavorite, PlanetFavorite};
pub use people::{PeopleRepo, Person, PersonWithPlanet};
pub use planets::{DbError, Planet, PlanetRepo};
pub use users::{User, UserRepo};
