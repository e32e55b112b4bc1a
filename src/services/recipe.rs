/*
 * Responsibility
 * - recipe (ingredient list) の正規化: client 入力 → 保存する JSON text
 * - 保存済み JSON text → Ingredient 一覧への復元
 *
 * Quote handling:
 * - A recipe sent as a string has every `'` replaced by `"` before parsing, so
 *   `[{'name':'water', ...}]` is accepted. Apostrophes inside values are
 *   corrupted by this; clients that need them must send a JSON array instead.
 */
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub color: String,
    pub parts: Number,
}

#[derive(Debug, Error)]
pub enum RecipeError {
    #[error("recipe is required")]
    Missing,
    #[error("recipe is not valid JSON")]
    InvalidJson(#[source] serde_json::Error),
    #[error("recipe must be a list of ingredients with name, color and parts")]
    InvalidIngredients(#[source] serde_json::Error),
    #[error("recipe must be a list of ingredients")]
    NotAList,
}

/// Turn the caller's `recipe` value into the JSON text that gets stored.
///
/// - string: quote-normalized, then must parse
/// - array / object: serialized as is
/// - a single ingredient object is wrapped into a one element list
pub fn normalize(raw: &Value) -> Result<String, RecipeError> {
    let text = match raw {
        Value::Null => return Err(RecipeError::Missing),
        Value::String(s) => s.replace('\'', "\""),
        Value::Array(_) | Value::Object(_) => raw.to_string(),
        _ => return Err(RecipeError::NotAList),
    };

    match serde_json::from_str::<Value>(&text).map_err(RecipeError::InvalidJson)? {
        Value::Array(_) => {
            parse(&text)?;
            Ok(text)
        }
        object @ Value::Object(_) => {
            let ingredient: Ingredient =
                serde_json::from_value(object).map_err(RecipeError::InvalidIngredients)?;
            serde_json::to_string(&[ingredient]).map_err(RecipeError::InvalidJson)
        }
        _ => Err(RecipeError::NotAList),
    }
}

/// Read a stored recipe back into ingredients.
pub fn parse(text: &str) -> Result<Vec<Ingredient>, RecipeError> {
    serde_json::from_str(text).map_err(RecipeError::InvalidIngredients)
}
