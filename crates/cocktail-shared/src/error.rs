use thiserror::Error;

/// Draft and payload validation failures, raised before any mutation or
/// network call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Cocktail name must not be empty")]
    EmptyName,

    #[error("A cocktail needs at least one ingredient")]
    NoIngredients,

    #[error("Image source is {size} bytes, above the 5 MB cap")]
    ImageTooLarge { size: usize },
}

/// Authentication failures, returned as values, never panicked.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Username is already taken")]
    DuplicateUsername,

    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Failure reported by the remote member service, with its message.
    #[error("{0}")]
    Rejected(String),
}
