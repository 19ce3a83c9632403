//! Domain model structs shared across the store, network and client layers.
//!
//! Every struct derives `Serialize` and `Deserialize` so it can be written
//! into a snapshot or handed to the UI layer as-is.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::MAX_IMAGE_BYTES;
use crate::error::ValidationError;
use crate::types::{CocktailId, UserId};

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// An identity record.
///
/// Created at signup and never mutated afterwards, except the nickname which
/// the remote service may update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    /// Canonical id: server-assigned member number or local monotonic token.
    pub id: UserId,
    /// Unique login name, case sensitive.
    pub username: String,
    /// Display name.
    pub nickname: String,
    pub email: Option<String>,
}

// ---------------------------------------------------------------------------
// Cocktail image
// ---------------------------------------------------------------------------

/// Recipe image attachment.
///
/// Local mode embeds the image as a base64 data URL; remote mode references
/// a server-side path. Both serialize as the raw string and a `data:` prefix
/// marks the inline variant on the way back in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CocktailImage {
    Inline(String),
    Path(String),
}

impl CocktailImage {
    pub fn from_raw(raw: String) -> Self {
        if raw.starts_with("data:") {
            Self::Inline(raw)
        } else {
            Self::Path(raw)
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Inline(s) | Self::Path(s) => s,
        }
    }

    /// Encode a source file as an inline data URL.
    ///
    /// The cap applies to the source file size, before base64 expansion.
    pub fn inline_from_bytes(bytes: &[u8], mime: &str) -> Result<Self, ValidationError> {
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(ValidationError::ImageTooLarge { size: bytes.len() });
        }
        let encoded = STANDARD.encode(bytes);
        Ok(Self::Inline(format!("data:{mime};base64,{encoded}")))
    }
}

impl Serialize for CocktailImage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CocktailImage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::from_raw(String::deserialize(deserializer)?))
    }
}

// ---------------------------------------------------------------------------
// Cocktail
// ---------------------------------------------------------------------------

/// A user-authored recipe.
///
/// Invariant: non-empty name and at least one ingredient entry. Each entry
/// is an ingredient name optionally suffixed with amount and unit; the glass
/// type, when chosen, rides along as a trailing pseudo-ingredient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Cocktail {
    pub id: CocktailId,
    pub name: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: Option<String>,
    pub image: Option<CocktailImage>,
    /// The creating user; only the owner may edit or delete.
    pub owner: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Validated creation payload, produced by [`crate::CocktailDraft::prepare`]
/// or built directly by remote-mode ingestion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewCocktail {
    pub name: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: Option<String>,
    pub image: Option<CocktailImage>,
}

impl NewCocktail {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.ingredients.is_empty() {
            return Err(ValidationError::NoIngredients);
        }
        Ok(())
    }
}

/// Partial update for an existing cocktail. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CocktailPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub ingredients: Option<Vec<String>>,
    pub instructions: Option<String>,
    pub image: Option<CocktailImage>,
}
