//! The remote-synchronized recipe board.
//!
//! In remote mode the service is the source of truth: every mutation is an
//! HTTP call whose response carries the authoritative like counters, and the
//! board mirrors those into its in-memory copy. The `loading` flag and
//! `error` slot exist for the UI; failures are recorded there and then
//! re-thrown to the caller.

use std::sync::Arc;

use serde::Serialize;

use cocktail_net::{CocktailDto, CocktailRequestDto, LikeDto, RecipeService, ServiceError};
use cocktail_shared::constants::DEFAULT_DESCRIPTION;
use cocktail_shared::{
    Cocktail, CocktailDraft, CocktailId, CocktailImage, CocktailPatch, NewCocktail, UserId,
    ValidationError,
};

use crate::error::ClientError;

/// A cocktail with the server's aggregate counters mirrored in.
///
/// Ids and timestamps are normalized at this boundary: the numeric
/// `cocktailNo` becomes a canonical string id, zone-less service timestamps
/// become UTC.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SyncedCocktail {
    pub cocktail: Cocktail,
    pub like_count: u32,
    pub is_liked: bool,
}

impl From<CocktailDto> for SyncedCocktail {
    fn from(dto: CocktailDto) -> Self {
        Self {
            cocktail: Cocktail {
                id: CocktailId::from(dto.cocktail_no),
                name: dto.cocktail_name,
                description: dto
                    .description
                    .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
                ingredients: dto.ingredients,
                instructions: dto.instructions,
                image: dto.cocktail_image_path.map(CocktailImage::from_raw),
                owner: UserId::from(dto.member_no),
                created_at: dto.created_at.and_utc(),
                updated_at: dto.updated_at.map(|ts| ts.and_utc()),
            },
            like_count: dto.like_count,
            is_liked: dto.is_liked,
        }
    }
}

/// Remote-mode counterpart of the recipe store.
pub struct RemoteBoard {
    service: Arc<RecipeService>,
    cocktails: Vec<SyncedCocktail>,
    /// A request is in flight.
    pub loading: bool,
    /// Last failure, kept until the next call starts.
    pub error: Option<String>,
}

impl RemoteBoard {
    pub fn new(service: Arc<RecipeService>) -> Self {
        Self {
            service,
            cocktails: Vec::new(),
            loading: false,
            error: None,
        }
    }

    pub fn cocktails(&self) -> &[SyncedCocktail] {
        &self.cocktails
    }

    pub fn get(&self, id: &CocktailId) -> Option<&SyncedCocktail> {
        self.cocktails.iter().find(|s| &s.cocktail.id == id)
    }

    /// Replace the mirror with the service's current collection.
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        self.begin();
        let result = self.service.list_cocktails().await;
        let dtos = self.settle(result, "refresh")?;
        self.cocktails = dtos.into_iter().map(SyncedCocktail::from).collect();
        Ok(())
    }

    /// Validate and submit a new cocktail. An invalid draft is recorded and
    /// re-thrown before any network I/O.
    pub async fn create(&mut self, draft: CocktailDraft) -> Result<SyncedCocktail, ClientError> {
        let new = match draft.prepare() {
            Ok(new) => new,
            Err(e) => return Err(self.reject(e)),
        };

        self.begin();
        let request = request_dto(&new);
        let result = self.service.create_cocktail(&request).await;
        let dto = self.settle(result, "create")?;

        let synced = SyncedCocktail::from(dto);
        self.cocktails.push(synced.clone());
        Ok(synced)
    }

    /// Merge a patch into the mirrored record and push the result to the
    /// service. An unknown id is a silent no-op, as in local mode.
    pub async fn update(
        &mut self,
        id: &CocktailId,
        patch: CocktailPatch,
    ) -> Result<Option<SyncedCocktail>, ClientError> {
        let merged = match self.get(id) {
            Some(existing) => {
                let mut merged = existing.cocktail.clone();
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
                merged
            }
            None => {
                tracing::debug!(%id, "update for unknown cocktail ignored");
                return Ok(None);
            }
        };

        // Must still be a valid payload before the call is made.
        if merged.name.trim().is_empty() {
            return Err(self.reject(ValidationError::EmptyName));
        }
        if merged.ingredients.is_empty() {
            return Err(self.reject(ValidationError::NoIngredients));
        }

        self.begin();
        let request = CocktailRequestDto {
            cocktail_name: merged.name,
            description: Some(merged.description),
            ingredients: merged.ingredients,
            instructions: merged.instructions,
            cocktail_image_path: merged.image.map(|i| i.as_str().to_string()),
        };
        let result = self.service.update_cocktail(id, &request).await;
        let dto = self.settle(result, "update")?;

        let synced = SyncedCocktail::from(dto);
        if let Some(slot) = self.cocktails.iter_mut().find(|s| &s.cocktail.id == id) {
            *slot = synced.clone();
        }
        Ok(Some(synced))
    }

    pub async fn delete(&mut self, id: &CocktailId) -> Result<(), ClientError> {
        self.begin();
        let result = self.service.delete_cocktail(id).await;
        self.settle(result, "delete")?;
        self.cocktails.retain(|s| &s.cocktail.id != id);
        Ok(())
    }

    /// Toggle a like server-side and mirror the authoritative counters.
    ///
    /// No ordering guarantee across rapid toggles: the last response wins,
    /// and the mirror may disagree with the server until the next refresh.
    pub async fn toggle_like(&mut self, id: &CocktailId) -> Result<LikeDto, ClientError> {
        self.begin();
        let result = self.service.toggle_like(id).await;
        let like = self.settle(result, "toggle-like")?;

        if let Some(slot) = self.cocktails.iter_mut().find(|s| &s.cocktail.id == id) {
            slot.like_count = like.like_count;
            slot.is_liked = like.is_liked;
        }
        Ok(like)
    }

    /// Fetch the cocktails authored by one member.
    pub async fn member_cocktails(
        &mut self,
        member_no: i64,
    ) -> Result<Vec<SyncedCocktail>, ClientError> {
        self.begin();
        let result = self.service.cocktails_by_member(member_no).await;
        let dtos = self.settle(result, "member-cocktails")?;
        Ok(dtos.into_iter().map(SyncedCocktail::from).collect())
    }

    fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    fn settle<T>(
        &mut self,
        result: Result<T, ServiceError>,
        action: &str,
    ) -> Result<T, ClientError> {
        self.loading = false;
        result.map_err(|e| {
            tracing::error!(error = %e, action, "remote board call failed");
            self.error = Some(e.to_string());
            e.into()
        })
    }

    fn reject(&mut self, e: ValidationError) -> ClientError {
        self.error = Some(e.to_string());
        e.into()
    }
}

fn request_dto(new: &NewCocktail) -> CocktailRequestDto {
    CocktailRequestDto {
        cocktail_name: new.name.clone(),
        description: Some(new.description.clone()),
        ingredients: new.ingredients.clone(),
        instructions: new.instructions.clone(),
        cocktail_image_path: new.image.as_ref().map(|i| i.as_str().to_string()),
    }
}
