/*
 * Responsibility
 * - Drinks の request/response DTO
 * - short (public) / long (get:drinks-detail) の 2 つの表現
 */
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::repos::Drink;
use crate::services::recipe::{self, Ingredient, RecipeError};

/// POST /drinks and PATCH /drinks/{id}
///
/// Both fields are required on either route: PATCH replaces the drink wholesale.
#[derive(Debug, Deserialize)]
pub struct DrinkRequest {
    pub title: Option<String>,
    #[serde(default)]
    pub recipe: Value,
}

impl DrinkRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        match &self.title {
            Some(title) if !title.trim().is_empty() => {}
            _ => return Err("title is required"),
        }
        if self.recipe.is_null() {
            return Err("recipe is required");
        }
        Ok(())
    }

    /// Title plus the recipe text to persist.
    pub fn into_fields(self) -> Result<(String, String), RecipeError> {
        let recipe = recipe::normalize(&self.recipe)?;
        Ok((self.title.unwrap_or_default(), recipe))
    }
}

#[derive(Debug, Serialize)]
pub struct ShortIngredient {
    pub color: String,
    pub parts: Number,
}

impl From<Ingredient> for ShortIngredient {
    fn from(i: Ingredient) -> Self {
        Self {
            color: i.color,
            parts: i.parts,
        }
    }
}

/// Public projection: ingredient names are left out.
#[derive(Debug, Serialize)]
pub struct DrinkShort {
    pub id: i64,
    pub title: String,
    pub recipe: Vec<ShortIngredient>,
}

impl TryFrom<Drink> for DrinkShort {
    type Error = RecipeError;

    fn try_from(drink: Drink) -> Result<Self, Self::Error> {
        let recipe = recipe::parse(&drink.recipe)?
            .into_iter()
            .map(ShortIngredient::from)
            .collect();

        Ok(Self {
            id: drink.id,
            title: drink.title,
            recipe,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct DrinkLong {
    pub id: i64,
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

impl TryFrom<Drink> for DrinkLong {
    type Error = RecipeError;

    fn try_from(drink: Drink) -> Result<Self, Self::Error> {
        Ok(Self {
            id: drink.id,
            recipe: recipe::parse(&drink.recipe)?,
            title: drink.title,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct DrinksResponse<T> {
    pub success: bool,
    pub drinks: Vec<T>,
}

impl<T> DrinksResponse<T> {
    pub fn new(drinks: Vec<T>) -> Self {
        Self {
            success: true,
            drinks,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub delete: i64,
}
