//! The lab submission sequence.
//!
//! Submitting a new cocktail runs a fixed, time-driven shaker sequence
//! before anything is committed: `idle → shake-first → flip → shake-second
//! → idle`, advancing on wall-clock delays rather than on any I/O. Once
//! started the sequence always runs to completion and always commits; there
//! is no abort path. The embedding UI suppresses dismissal while the stage
//! is not [`ShakeStage::Idle`].

use std::time::Duration;

use serde::Serialize;
use tokio::time::sleep;

use cocktail_shared::{Cocktail, CocktailDraft, UserId};
use cocktail_store::RecipeStore;

use crate::error::ClientError;

/// Stage durations of the shaker sequence.
pub const SHAKE_FIRST_DURATION: Duration = Duration::from_millis(1000);
pub const FLIP_DURATION: Duration = Duration::from_millis(500);
pub const SHAKE_SECOND_DURATION: Duration = Duration::from_millis(1000);

/// Current step of the shaker sequence, serialized in the form the UI's
/// animation classes expect.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ShakeStage {
    Idle,
    ShakeFirst,
    Flip,
    ShakeSecond,
}

/// Run the shaker sequence and commit the draft to the store at its
/// terminal step.
///
/// The draft is validated up front: a rejected draft never starts the
/// sequence. `on_stage` is invoked at every transition so the UI can drive
/// its animation.
pub async fn submit_cocktail(
    store: &mut RecipeStore,
    draft: CocktailDraft,
    owner: &UserId,
    mut on_stage: impl FnMut(ShakeStage),
) -> Result<Cocktail, ClientError> {
    let new = draft.prepare()?;

    on_stage(ShakeStage::ShakeFirst);
    sleep(SHAKE_FIRST_DURATION).await;

    on_stage(ShakeStage::Flip);
    sleep(FLIP_DURATION).await;

    on_stage(ShakeStage::ShakeSecond);
    sleep(SHAKE_SECOND_DURATION).await;

    // Commit only now, at the end of the final stage.
    let cocktail = store.add_cocktail(new, owner)?;
    tracing::info!(id = %cocktail.id, "lab submission committed");

    on_stage(ShakeStage::Idle);
    Ok(cocktail)
}
