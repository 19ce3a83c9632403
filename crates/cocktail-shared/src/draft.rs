//! Lab form draft handling.
//!
//! The lab form collects free-form fields and a list of ingredient rows;
//! [`CocktailDraft::prepare`] turns that into a validated [`NewCocktail`],
//! rendering each ingredient row to its display string and appending the
//! chosen glass as a trailing pseudo-ingredient.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_DESCRIPTION;
use crate::error::ValidationError;
use crate::models::{CocktailImage, NewCocktail};

/// One ingredient row from the form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IngredientEntry {
    pub name: String,
    pub amount: Option<String>,
    pub unit: Option<String>,
}

impl IngredientEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            amount: None,
            unit: None,
        }
    }

    pub fn with_amount(name: impl Into<String>, amount: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            amount: Some(amount.into()),
            unit: Some(unit.into()),
        }
    }

    /// Render as `"{name} {amount}{unit}"`, or the bare name without an
    /// amount.
    pub fn render(&self) -> String {
        match &self.amount {
            Some(amount) => format!(
                "{} {}{}",
                self.name,
                amount,
                self.unit.as_deref().unwrap_or_default()
            ),
            None => self.name.clone(),
        }
    }
}

/// Raw lab form state, as entered by the user.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CocktailDraft {
    pub name: String,
    pub description: String,
    pub glass: String,
    pub instructions: String,
    pub image: Option<CocktailImage>,
    pub ingredients: Vec<IngredientEntry>,
}

impl CocktailDraft {
    /// Validate and normalize into a creation payload.
    ///
    /// Fails before anything else happens: an invalid draft never starts the
    /// submission sequence and never reaches the network.
    pub fn prepare(self) -> Result<NewCocktail, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.ingredients.is_empty() {
            return Err(ValidationError::NoIngredients);
        }

        let mut ingredients: Vec<String> =
            self.ingredients.iter().map(IngredientEntry::render).collect();

        let glass = self.glass.trim();
        if !glass.is_empty() {
            ingredients.push(glass.to_string());
        }

        let description = match self.description.trim() {
            "" => DEFAULT_DESCRIPTION.to_string(),
            d => d.to_string(),
        };

        let instructions = match self.instructions.trim() {
            "" => None,
            i => Some(i.to_string()),
        };

        Ok(NewCocktail {
            name: name.to_string(),
            description,
            ingredients,
            instructions,
            image: self.image,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_ingredient_lines_and_appends_glass() {
        let draft = CocktailDraft {
            name: " Mojito ".into(),
            description: String::new(),
            glass: "하이볼 글래스".into(),
            instructions: "  ".into(),
            image: None,
            ingredients: vec![
                IngredientEntry::with_amount("화이트 럼", "2", "oz"),
                IngredientEntry::new("라임"),
            ],
        };

        let new = draft.prepare().unwrap();
        assert_eq!(new.name, "Mojito");
        assert_eq!(new.description, DEFAULT_DESCRIPTION);
        assert_eq!(new.ingredients, vec!["화이트 럼 2oz", "라임", "하이볼 글래스"]);
        assert_eq!(new.instructions, None);
    }

    #[test]
    fn empty_name_rejected() {
        let draft = CocktailDraft {
            ingredients: vec![IngredientEntry::new("라임")],
            ..Default::default()
        };
        assert_eq!(draft.prepare(), Err(ValidationError::EmptyName));
    }

    #[test]
    fn no_ingredients_rejected() {
        let draft = CocktailDraft {
            name: "Mojito".into(),
            ..Default::default()
        };
        assert_eq!(draft.prepare(), Err(ValidationError::NoIngredients));
    }
}
