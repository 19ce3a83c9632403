//! # cocktail-client
//!
//! Application layer of Cocktail Lab: wires the stores to a persistence
//! backend and, in remote mode, to the recipe service; dispatches auth
//! operations by mode; and drives the timed lab submission sequence.
//!
//! The UI (rendering, routing, input) sits above this crate and is not part
//! of it.

pub mod config;
pub mod lab;
pub mod remote;
pub mod state;

mod error;

pub use config::ClientConfig;
pub use error::ClientError;
pub use lab::{submit_cocktail, ShakeStage};
pub use remote::{RemoteBoard, SyncedCocktail};
pub use state::{AppState, RemoteHandle};

use tracing_subscriber::{fmt, EnvFilter};

/// Initialise the tracing subscriber for an embedding application.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("cocktail_client=debug,cocktail_net=debug,cocktail_store=info,warn")
    });

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    tracing::info!("Starting Cocktail Lab client");
}
