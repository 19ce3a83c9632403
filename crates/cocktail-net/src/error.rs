use thiserror::Error;

/// Errors produced by the remote recipe service client.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Network failure, non-JSON body, or other transport-level problem.
    #[error("Transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with `success: false`.
    #[error("Service rejected the request: {message}")]
    Api { message: String },

    /// A successful envelope arrived without its expected payload.
    #[error("Service response carried no data")]
    MissingData,
}
