//! The recipe store: user-authored cocktails, per-user like memberships and
//! the global like-event history.
//!
//! All state lives in one in-memory [`RecipeState`] container, so mutations
//! are applied atomically and are immediately visible to every derived read.
//! Each public mutator ends in exactly one snapshot commit; a mutator that
//! fails re-commits the pre-mutation snapshot instead. The commit itself is
//! fire-and-forget: a failed write is logged, never surfaced to the caller.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use cocktail_shared::{Cocktail, CocktailId, CocktailPatch, NewCocktail, UserId, ValidationError};

use crate::backend::{SnapshotBackend, RECIPE_STORE_KEY};
use crate::error::Result;
use crate::ranking::{self, RankedCocktail};

/// The serialized snapshot: the whole recipe store state.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RecipeState {
    /// Insertion-ordered collection; ranking tie-breaks rely on this order.
    pub cocktails: Vec<Cocktail>,
    /// Per-user like membership.
    pub liked_by: HashMap<UserId, BTreeSet<CocktailId>>,
    /// Append-only per-cocktail timestamp log. An entry's length is that
    /// cocktail's like count; drained entries are removed.
    pub like_history: HashMap<CocktailId, Vec<DateTime<Utc>>>,
}

/// The collection of user-authored cocktails with its like engine.
pub struct RecipeStore {
    state: RecipeState,
    backend: Arc<dyn SnapshotBackend>,
}

impl RecipeStore {
    /// Load the persisted snapshot, or start empty.
    ///
    /// An unreadable snapshot resets the store rather than failing startup.
    pub fn open(backend: Arc<dyn SnapshotBackend>) -> Result<Self> {
        let state = match backend.load(RECIPE_STORE_KEY)? {
            Some(json) => match serde_json::from_str(&json) {
                Ok(state) => state,
                Err(e) => {
                    tracing::warn!(error = %e, "recipe snapshot unreadable, starting fresh");
                    RecipeState::default()
                }
            },
            None => RecipeState::default(),
        };
        Ok(Self { state, backend })
    }

    // ------------------------------------------------------------------
    // Mutators
    // ------------------------------------------------------------------

    /// Validate and append a new cocktail owned by `owner`.
    pub fn add_cocktail(&mut self, new: NewCocktail, owner: &UserId) -> Result<Cocktail> {
        self.add_cocktail_at(new, owner, Utc::now())
    }

    /// [`Self::add_cocktail`] with an explicit clock, for tests.
    pub fn add_cocktail_at(
        &mut self,
        new: NewCocktail,
        owner: &UserId,
        now: DateTime<Utc>,
    ) -> Result<Cocktail> {
        let owner = owner.clone();
        self.commit(move |state| {
            new.validate()?;

            // Local ids are the creation timestamp in milliseconds, bumped
            // past any collision so they stay unique and monotonic.
            let mut millis = now.timestamp_millis();
            let mut id = CocktailId::from_timestamp_millis(millis);
            while state.cocktails.iter().any(|c| c.id == id) {
                millis += 1;
                id = CocktailId::from_timestamp_millis(millis);
            }

            let cocktail = Cocktail {
                id,
                name: new.name,
                description: new.description,
                ingredients: new.ingredients,
                instructions: new.instructions,
                image: new.image,
                owner,
                created_at: now,
                updated_at: None,
            };
            state.cocktails.push(cocktail.clone());
            Ok(cocktail)
        })
    }

    /// Merge `patch` into the cocktail with the given id and stamp the
    /// update time. An unknown id is a silent no-op returning `Ok(None)`.
    pub fn update_cocktail(
        &mut self,
        id: &CocktailId,
        patch: CocktailPatch,
    ) -> Result<Option<Cocktail>> {
        self.update_cocktail_at(id, patch, Utc::now())
    }

    /// [`Self::update_cocktail`] with an explicit clock, for tests.
    pub fn update_cocktail_at(
        &mut self,
        id: &CocktailId,
        patch: CocktailPatch,
        now: DateTime<Utc>,
    ) -> Result<Option<Cocktail>> {
        let id = id.clone();
        self.commit(move |state| {
            let Some(cocktail) = state.cocktails.iter_mut().find(|c| c.id == id) else {
                tracing::debug!(%id, "update for unknown cocktail ignored");
                return Ok(None);
            };

            let mut merged = cocktail.clone();
            if let Some(name) = patch.name {
                merged.name = name;
            }
            if let Some(description) = patch.description {
                merged.description = description;
            }
            if let Some(ingredients) = patch.ingredients {
                merged.ingredients = ingredients;
            }
            if let Some(instructions) = patch.instructions {
                merged.instructions = Some(instructions);
            }
            if let Some(image) = patch.image {
                merged.image = Some(image);
            }

            // The merged record must still satisfy the persistence invariant.
            if merged.name.trim().is_empty() {
                return Err(ValidationError::EmptyName.into());
            }
            if merged.ingredients.is_empty() {
                return Err(ValidationError::NoIngredients.into());
            }

            merged.updated_at = Some(now);
            *cocktail = merged;
            Ok(Some(cocktail.clone()))
        })
    }

    /// Remove a cocktail and every trace of it in the like engine.
    /// Deleting an unknown id is a no-op.
    pub fn delete_cocktail(&mut self, id: &CocktailId) -> Result<()> {
        let id = id.clone();
        self.commit(move |state| {
            state.cocktails.retain(|c| c.id != id);
            state.like_history.remove(&id);
            for liked in state.liked_by.values_mut() {
                liked.remove(&id);
            }
            state.liked_by.retain(|_, set| !set.is_empty());
            Ok(())
        })
    }

    /// Flip the like membership of `(user, cocktail)`.
    ///
    /// Anonymous actors cannot like: a `None` user is a no-op.
    pub fn toggle_like(&mut self, id: &CocktailId, user: Option<&UserId>) -> Result<()> {
        self.toggle_like_at(id, user, Utc::now())
    }

    /// [`Self::toggle_like`] with an explicit clock, for tests.
    pub fn toggle_like_at(
        &mut self,
        id: &CocktailId,
        user: Option<&UserId>,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let Some(user) = user else {
            return Ok(());
        };
        let (id, user) = (id.clone(), user.clone());
        self.commit(move |state| {
            let liked = state
                .liked_by
                .get(&user)
                .is_some_and(|set| set.contains(&id));

            if liked {
                if let Some(set) = state.liked_by.get_mut(&user) {
                    set.remove(&id);
                    if set.is_empty() {
                        state.liked_by.remove(&user);
                    }
                }
                // Cancelling drops the most recent timestamp in the log,
                // which is not necessarily this user's own entry.
                if let Some(log) = state.like_history.get_mut(&id) {
                    log.pop();
                    if log.is_empty() {
                        state.like_history.remove(&id);
                    }
                }
            } else {
                state.liked_by.entry(user).or_default().insert(id.clone());
                state.like_history.entry(id).or_default().push(now);
            }
            Ok(())
        })
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    pub fn cocktails(&self) -> &[Cocktail] {
        &self.state.cocktails
    }

    /// Cocktails authored by `owner`, in insertion order.
    pub fn user_cocktails(&self, owner: &UserId) -> Vec<&Cocktail> {
        self.state
            .cocktails
            .iter()
            .filter(|c| &c.owner == owner)
            .collect()
    }

    /// Membership lookup; always false for an anonymous actor.
    pub fn is_liked_by_user(&self, id: &CocktailId, user: Option<&UserId>) -> bool {
        user.is_some_and(|u| {
            self.state
                .liked_by
                .get(u)
                .is_some_and(|set| set.contains(id))
        })
    }

    /// Current like count: the length of the cocktail's timestamp log.
    pub fn like_count(&self, id: &CocktailId) -> usize {
        self.state.like_history.get(id).map_or(0, Vec::len)
    }

    pub fn state(&self) -> &RecipeState {
        &self.state
    }

    // ------------------------------------------------------------------
    // Derived popularity queries
    // ------------------------------------------------------------------

    pub fn total_popular(&self) -> Vec<RankedCocktail> {
        ranking::total_popular(&self.state)
    }

    pub fn weekly_popular(&self, now: DateTime<Utc>) -> Vec<RankedCocktail> {
        ranking::weekly_popular(&self.state, now)
    }

    pub fn daily_popular<Tz: TimeZone>(&self, now: DateTime<Tz>) -> Vec<RankedCocktail> {
        ranking::daily_popular(&self.state, now)
    }

    // ------------------------------------------------------------------
    // Commit
    // ------------------------------------------------------------------

    /// Apply a whole-state mutation and persist on every exit path.
    ///
    /// On error the pre-mutation state is restored, so the snapshot written
    /// is the one from before the failed call.
    fn commit<R>(&mut self, f: impl FnOnce(&mut RecipeState) -> Result<R>) -> Result<R> {
        let prior = self.state.clone();
        let out = f(&mut self.state);
        if out.is_err() {
            self.state = prior;
        }
        self.persist();
        out
    }

    fn persist(&self) {
        match serde_json::to_string(&self.state) {
            Ok(json) => {
                if let Err(e) = self.backend.save(RECIPE_STORE_KEY, &json) {
                    tracing::warn!(error = %e, "failed to persist recipe snapshot");
                }
            }
            Err(e) => tracing::warn!(error = %e, "failed to serialize recipe snapshot"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use crate::error::StoreError;

    fn store() -> RecipeStore {
        RecipeStore::open(Arc::new(MemoryBackend::new())).unwrap()
    }

    fn mojito() -> NewCocktail {
        NewCocktail {
            name: "Mojito".into(),
            description: "커스텀 칵테일".into(),
            ingredients: vec!["화이트 럼 2oz".into(), "라임".into()],
            instructions: None,
            image: None,
        }
    }

    #[test]
    fn add_cocktail_stores_draft_fields() {
        let mut store = store();
        let owner = UserId::from("u1");

        let cocktail = store.add_cocktail(mojito(), &owner).unwrap();
        assert_eq!(cocktail.name, "Mojito");
        assert_eq!(cocktail.ingredients, vec!["화이트 럼 2oz", "라임"]);
        assert_eq!(cocktail.owner, owner);
        assert_eq!(store.like_count(&cocktail.id), 0);
        assert_eq!(store.cocktails().len(), 1);
    }

    #[test]
    fn add_cocktail_rejects_invalid_payloads() {
        let mut store = store();
        let owner = UserId::from("u1");

        let invalid = NewCocktail {
            ingredients: vec![],
            ..mojito()
        };
        let err = store.add_cocktail(invalid, &owner).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Validation(ValidationError::NoIngredients)
        ));
        assert!(store.cocktails().is_empty());
    }

    #[test]
    fn colliding_creation_timestamps_get_distinct_ids() {
        let mut store = store();
        let owner = UserId::from("u1");
        let now = Utc::now();

        let a = store.add_cocktail_at(mojito(), &owner, now).unwrap();
        let b = store.add_cocktail_at(mojito(), &owner, now).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn toggle_like_is_an_involution() {
        let mut store = store();
        let owner = UserId::from("u1");
        let liker = UserId::from("u2");
        let cocktail = store.add_cocktail(mojito(), &owner).unwrap();

        store.toggle_like(&cocktail.id, Some(&liker)).unwrap();
        assert!(store.is_liked_by_user(&cocktail.id, Some(&liker)));
        assert_eq!(store.like_count(&cocktail.id), 1);

        store.toggle_like(&cocktail.id, Some(&liker)).unwrap();
        assert!(!store.is_liked_by_user(&cocktail.id, Some(&liker)));
        assert_eq!(store.like_count(&cocktail.id), 0);
    }

    #[test]
    fn anonymous_toggle_is_a_noop() {
        let mut store = store();
        let owner = UserId::from("u1");
        let cocktail = store.add_cocktail(mojito(), &owner).unwrap();

        store.toggle_like(&cocktail.id, None).unwrap();
        assert_eq!(store.like_count(&cocktail.id), 0);
        assert!(!store.is_liked_by_user(&cocktail.id, None));
    }

    #[test]
    fn cancelling_removes_the_latest_timestamp_globally() {
        let mut store = store();
        let owner = UserId::from("u1");
        let (u2, u3) = (UserId::from("u2"), UserId::from("u3"));
        let cocktail = store.add_cocktail(mojito(), &owner).unwrap();

        let t0 = Utc::now();
        let t1 = t0 + chrono::Duration::seconds(10);
        store.toggle_like_at(&cocktail.id, Some(&u2), t0).unwrap();
        store.toggle_like_at(&cocktail.id, Some(&u3), t1).unwrap();

        // u2 cancels, but the entry removed is u3's later timestamp.
        store.toggle_like(&cocktail.id, Some(&u2)).unwrap();
        assert_eq!(store.like_count(&cocktail.id), 1);
        assert_eq!(store.state().like_history[&cocktail.id], vec![t0]);
        assert!(store.is_liked_by_user(&cocktail.id, Some(&u3)));
        assert!(!store.is_liked_by_user(&cocktail.id, Some(&u2)));
    }

    #[test]
    fn delete_cascades_into_the_like_engine() {
        let mut store = store();
        let owner = UserId::from("u1");
        let liker = UserId::from("u2");
        let keep = store.add_cocktail(mojito(), &owner).unwrap();
        let gone = store.add_cocktail(mojito(), &owner).unwrap();

        store.toggle_like(&keep.id, Some(&liker)).unwrap();
        store.toggle_like(&gone.id, Some(&liker)).unwrap();

        store.delete_cocktail(&gone.id).unwrap();
        assert_eq!(store.cocktails().len(), 1);
        assert_eq!(store.like_count(&gone.id), 0);
        assert!(!store.is_liked_by_user(&gone.id, Some(&liker)));
        assert!(store.is_liked_by_user(&keep.id, Some(&liker)));

        // Idempotent.
        store.delete_cocktail(&gone.id).unwrap();
        assert_eq!(store.cocktails().len(), 1);
    }

    #[test]
    fn update_merges_patch_and_stamps_time() {
        let mut store = store();
        let owner = UserId::from("u1");
        let cocktail = store.add_cocktail(mojito(), &owner).unwrap();

        let updated = store
            .update_cocktail(
                &cocktail.id,
                CocktailPatch {
                    description: Some("상큼한 여름 칵테일".into()),
                    ..Default::default()
                },
            )
            .unwrap()
            .expect("known id");
        assert_eq!(updated.name, "Mojito");
        assert_eq!(updated.description, "상큼한 여름 칵테일");
        assert!(updated.updated_at.is_some());
    }

    #[test]
    fn update_of_unknown_id_is_a_silent_noop() {
        let mut store = store();
        let result = store
            .update_cocktail(&CocktailId::from("999"), CocktailPatch::default())
            .unwrap();
        assert_eq!(result, None);
    }

    #[test]
    fn update_cannot_break_the_persistence_invariant() {
        let mut store = store();
        let owner = UserId::from("u1");
        let cocktail = store.add_cocktail(mojito(), &owner).unwrap();

        let err = store
            .update_cocktail(
                &cocktail.id,
                CocktailPatch {
                    ingredients: Some(vec![]),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Validation(ValidationError::NoIngredients)
        ));
        // Prior state intact.
        assert_eq!(store.cocktails()[0].ingredients.len(), 2);
        assert_eq!(store.cocktails()[0].updated_at, None);
    }

    #[test]
    fn state_survives_a_reload_through_the_backend() {
        let backend = Arc::new(MemoryBackend::new());
        let liker = UserId::from("u2");

        let id = {
            let mut store = RecipeStore::open(backend.clone()).unwrap();
            let cocktail = store.add_cocktail(mojito(), &UserId::from("u1")).unwrap();
            store.toggle_like(&cocktail.id, Some(&liker)).unwrap();
            cocktail.id
        };

        let store = RecipeStore::open(backend).unwrap();
        assert_eq!(store.cocktails().len(), 1);
        assert_eq!(store.like_count(&id), 1);
        assert!(store.is_liked_by_user(&id, Some(&liker)));
    }

    #[test]
    fn corrupt_snapshot_resets_the_store() {
        let backend = Arc::new(MemoryBackend::new());
        backend.save(RECIPE_STORE_KEY, "not json").unwrap();

        let store = RecipeStore::open(backend).unwrap();
        assert!(store.cocktails().is_empty());
    }
}
