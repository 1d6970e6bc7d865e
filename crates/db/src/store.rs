//! The repository seam injected into HTTP handlers.

use async_trait::async_trait;
use dogbreed_core::types::DbId;

use crate::error::StoreError;
use crate::models::dog::{CreateDog, Dog, UpdateDog};
use crate::repositories::DogRepo;
use crate::DbPool;

/// Storage access for dog records.
#[async_trait]
pub trait DogStore: Send + Sync {
    /// Every dog, in insertion order.
    async fn list(&self) -> Result<Vec<Dog>, StoreError>;

    /// One dog by id, or `None`.
    async fn get(&self, id: DbId) -> Result<Option<Dog>, StoreError>;

    /// Insert a dog; the store assigns the id.
    async fn insert(&self, input: &CreateDog) -> Result<Dog, StoreError>;

    /// Update an existing dog. `None` when the id is unknown.
    async fn update(&self, id: DbId, input: &UpdateDog) -> Result<Option<Dog>, StoreError>;

    /// Delete a dog. `false` when it was already gone.
    async fn delete(&self, id: DbId) -> Result<bool, StoreError>;

    /// How many dogs currently reference `image_path`.
    async fn count_image_references(&self, image_path: &str) -> Result<i64, StoreError>;

    /// Confirm the storage layer is reachable.
    async fn health_check(&self) -> Result<(), StoreError>;
}

/// PostgreSQL-backed [`DogStore`].
#[derive(Debug, Clone)]
pub struct PgDogStore {
    pool: DbPool,
}

impl PgDogStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl DogStore for PgDogStore {
    async fn list(&self) -> Result<Vec<Dog>, StoreError> {
        Ok(DogRepo::list(&self.pool).await?)
    }

    async fn get(&self, id: DbId) -> Result<Option<Dog>, StoreError> {
        Ok(DogRepo::find_by_id(&self.pool, id).await?)
    }

    async fn insert(&self, input: &CreateDog) -> Result<Dog, StoreError> {
        let dog = DogRepo::create(&self.pool, input).await?;
        tracing::debug!(dog_id = dog.id, "Inserted dog row");
        Ok(dog)
    }

    async fn update(&self, id: DbId, input: &UpdateDog) -> Result<Option<Dog>, StoreError> {
        Ok(DogRepo::update(&self.pool, id, input).await?)
    }

    async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(DogRepo::delete(&self.pool, id).await?)
    }

    async fn count_image_references(&self, image_path: &str) -> Result<i64, StoreError> {
        Ok(DogRepo::count_by_image_path(&self.pool, image_path).await?)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(crate::health_check(&self.pool).await?)
    }
}
