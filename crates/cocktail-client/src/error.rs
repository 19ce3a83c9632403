use thiserror::Error;

use cocktail_net::ServiceError;
use cocktail_shared::{AuthError, ValidationError};
use cocktail_store::StoreError;

/// Errors surfaced to the embedding application.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Payload rejected before any mutation or network call.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Typed auth failure (duplicate username, bad credentials, or a
    /// service-reported rejection).
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Transport or service failure from a remote-mode call.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// Local store failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}
