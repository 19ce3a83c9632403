//! # cocktail-store
//!
//! Client-side state for the Cocktail Lab application.
//!
//! The crate holds the two reactive stores — the recipe collection with its
//! like engine ([`RecipeStore`]) and the authentication session
//! ([`AuthStore`]) — plus the pure popularity queries derived from them.
//! Every public mutator ends by writing the whole store state as a JSON
//! snapshot through an injectable [`SnapshotBackend`], so tests can run
//! against an in-memory fake while the application uses SQLite.

pub mod auth;
pub mod backend;
pub mod migrations;
pub mod ranking;
pub mod recipes;

mod error;

pub use auth::{AuthStore, SignupRequest};
pub use backend::{MemoryBackend, SnapshotBackend, SqliteBackend, AUTH_STORE_KEY, RECIPE_STORE_KEY};
pub use error::{Result, StoreError};
pub use ranking::RankedCocktail;
pub use recipes::{RecipeState, RecipeStore};
