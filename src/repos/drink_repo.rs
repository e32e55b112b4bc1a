/*
 * Responsibility
 * - drinks テーブル向け CRUD (DrinkRepo trait + SQLx 実装)
 * - update/delete は取得済みの Drink を受け取る (fetch → mutate → update)
 * - DB エラーは RepoError で返す (上位で 400 に変換)
 */
use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use crate::repos::error::RepoError;

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Drink {
    pub id: i64,
    pub title: String,
    // JSON text, normalized before it gets here
    pub recipe: String,
}

#[async_trait]
pub trait DrinkRepo: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Drink>, RepoError>;

    async fn get(&self, id: i64) -> Result<Option<Drink>, RepoError>;

    async fn create(&self, title: &str, recipe: &str) -> Result<Drink, RepoError>;

    /// Overwrite title and recipe of a previously fetched drink.
    async fn update(&self, drink: &Drink) -> Result<(), RepoError>;

    async fn delete(&self, drink: &Drink) -> Result<(), RepoError>;
}

#[derive(Clone, Debug)]
pub struct PgDrinkRepo {
    pool: PgPool,
}

impl PgDrinkRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DrinkRepo for PgDrinkRepo {
    async fn list_all(&self) -> Result<Vec<Drink>, RepoError> {
        let rows = sqlx::query_as::<_, Drink>(
            r#"
            SELECT id, title, recipe
            FROM drinks
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn get(&self, id: i64) -> Result<Option<Drink>, RepoError> {
        let row = sqlx::query_as::<_, Drink>(
            r#"
            SELECT id, title, recipe
            FROM drinks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn create(&self, title: &str, recipe: &str) -> Result<Drink, RepoError> {
        let row = sqlx::query_as::<_, Drink>(
            r#"
            INSERT INTO drinks (title, recipe)
            VALUES ($1, $2)
            RETURNING id, title, recipe
            "#,
        )
        .bind(title)
        .bind(recipe)
        .fetch_one(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row)
    }

    async fn update(&self, drink: &Drink) -> Result<(), RepoError> {
        let result = sqlx::query(
            r#"
            UPDATE drinks
            SET title = $2, recipe = $3
            WHERE id = $1
            "#,
        )
        .bind(drink.id)
        .bind(&drink.title)
        .bind(&drink.recipe)
        .execute(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        // Deleted between fetch and update.
        if result.rows_affected() == 0 {
            return Err(RepoError::Missing(drink.id));
        }

        Ok(())
    }

    async fn delete(&self, drink: &Drink) -> Result<(), RepoError> {
        let result = sqlx::query(
            r#"
            DELETE FROM drinks
            WHERE id = $1
            "#,
        )
        .bind(drink.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepoError::Missing(drink.id));
        }

        Ok(())
    }
}
