//! # cocktail-shared
//!
//! Domain models and validation shared by every Cocktail Lab crate.
//!
//! The store, network and client layers all speak in these types: canonical
//! string identifiers, the [`Cocktail`] and [`User`] records, the lab-form
//! draft builder, and the error taxonomy for validation and authentication
//! failures.

pub mod constants;
pub mod draft;
pub mod models;
pub mod types;

mod error;

pub use draft::{CocktailDraft, IngredientEntry};
pub use error::{AuthError, ValidationError};
pub use models::{Cocktail, CocktailImage, CocktailPatch, NewCocktail, User};
pub use types::{CocktailId, StoreMode, UserId};
