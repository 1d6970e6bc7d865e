//! Repository for the `dogs` table.

use dogbreed_core::types::DbId;
use sqlx::PgPool;

use crate::models::dog::{CreateDog, Dog, UpdateDog};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, breed, image_path, created_at, updated_at";

/// Provides CRUD operations for dogs. Every statement is parameterized.
pub struct DogRepo;

impl DogRepo {
    /// Insert a new dog, returning the created row with its generated id.
    pub async fn create(pool: &PgPool, input: &CreateDog) -> Result<Dog, sqlx::Error> {
        let query = format!(
            "INSERT INTO dogs (name, breed, image_path)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Dog>(&query)
            .bind(&input.name)
            .bind(&input.breed)
            .bind(&input.image_path)
            .fetch_one(pool)
            .await
    }

    /// Find a dog by its id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Dog>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM dogs WHERE id = $1");
        sqlx::query_as::<_, Dog>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every dog in insertion order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Dog>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM dogs ORDER BY id ASC");
        sqlx::query_as::<_, Dog>(&query).fetch_all(pool).await
    }

    /// Update a dog's name and breed, and its image path when one is given.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateDog,
    ) -> Result<Option<Dog>, sqlx::Error> {
        let query = format!(
            "UPDATE dogs SET
                name = $2,
                breed = $3,
                image_path = COALESCE($4, image_path),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Dog>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.breed)
            .bind(&input.image_path)
            .fetch_optional(pool)
            .await
    }

    /// Delete a dog by id. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM dogs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Number of dogs whose `image_path` equals the given path.
    pub async fn count_by_image_path(pool: &PgPool, image_path: &str) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM dogs WHERE image_path = $1")
            .bind(image_path)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
