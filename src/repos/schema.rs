/*
 * Responsibility
 * - drinks テーブルの作成 (起動時, 存在しなければ)
 * - reset: DROP → CREATE → seed (初回起動用、全レコードが消える)
 */
use sqlx::PgPool;

use crate::repos::error::RepoError;

const CREATE_DRINKS: &str = r#"
    CREATE TABLE IF NOT EXISTS drinks (
        id BIGSERIAL PRIMARY KEY,
        title TEXT NOT NULL UNIQUE,
        recipe TEXT NOT NULL
    )
"#;

pub const SEED_TITLE: &str = "water";
pub const SEED_RECIPE: &str = r#"[{"name": "water", "color": "blue", "parts": 1}]"#;

pub async fn ensure_schema(pool: &PgPool) -> Result<(), RepoError> {
    sqlx::query(CREATE_DRINKS).execute(pool).await?;
    Ok(())
}

/// Drop every drink and start over with the single seed drink.
pub async fn reset(pool: &PgPool) -> Result<(), RepoError> {
    let mut tx = pool.begin().await?;

    sqlx::query("DROP TABLE IF EXISTS drinks")
        .execute(&mut *tx)
        .await?;
    sqlx::query(CREATE_DRINKS).execute(&mut *tx).await?;
    sqlx::query("INSERT INTO drinks (title, recipe) VALUES ($1, $2)")
        .bind(SEED_TITLE)
        .bind(SEED_RECIPE)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::warn!("drinks table reset and seeded");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::recipe;

    #[test]
    fn seed_recipe_is_a_valid_recipe() {
        let ingredients = recipe::parse(SEED_RECIPE).unwrap();
        assert_eq!(ingredients.len(), 1);
        assert_eq!(ingredients[0].name, SEED_TITLE);
    }
}
