//! In-process [`DogStore`] for tests and database-less local runs.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use dogbreed_core::types::DbId;

use crate::error::StoreError;
use crate::models::dog::{CreateDog, Dog, UpdateDog};
use crate::store::DogStore;

#[derive(Default)]
struct Table {
    rows: BTreeMap<DbId, Dog>,
    last_id: DbId,
}

/// Keeps dogs in a `BTreeMap` keyed by id. Ids are handed out
/// monotonically and never reused, matching a BIGSERIAL column.
#[derive(Default)]
pub struct MemoryDogStore {
    inner: Mutex<Table>,
    offline: AtomicBool,
}

impl MemoryDogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with [`StoreError::Connection`]
    /// (or recover with `false`).
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// All rows currently held, in id order.
    pub fn snapshot(&self) -> Vec<Dog> {
        self.table().rows.values().cloned().collect()
    }

    fn table(&self) -> MutexGuard<'_, Table> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn connect(&self) -> Result<MutexGuard<'_, Table>, StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Connection(
                "memory store is offline".to_string(),
            ));
        }
        Ok(self.table())
    }
}

#[async_trait]
impl DogStore for MemoryDogStore {
    async fn list(&self) -> Result<Vec<Dog>, StoreError> {
        Ok(self.connect()?.rows.values().cloned().collect())
    }

    async fn get(&self, id: DbId) -> Result<Option<Dog>, StoreError> {
        Ok(self.connect()?.rows.get(&id).cloned())
    }

    async fn insert(&self, input: &CreateDog) -> Result<Dog, StoreError> {
        let mut table = self.connect()?;
        table.last_id += 1;
        let now = Utc::now();
        let dog = Dog {
            id: table.last_id,
            name: input.name.clone(),
            breed: input.breed.clone(),
            image_path: input.image_path.clone(),
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(dog.id, dog.clone());
        Ok(dog)
    }

    async fn update(&self, id: DbId, input: &UpdateDog) -> Result<Option<Dog>, StoreError> {
        let mut table = self.connect()?;
        let Some(dog) = table.rows.get_mut(&id) else {
            return Ok(None);
        };
        dog.name = input.name.clone();
        dog.breed = input.breed.clone();
        if let Some(path) = &input.image_path {
            dog.image_path = Some(path.clone());
        }
        dog.updated_at = Utc::now();
        Ok(Some(dog.clone()))
    }

    async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(self.connect()?.rows.remove(&id).is_some())
    }

    async fn count_image_references(&self, image_path: &str) -> Result<i64, StoreError> {
        let count = self
            .connect()?
            .rows
            .values()
            .filter(|dog| dog.image_path.as_deref() == Some(image_path))
            .count();
        Ok(count as i64)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        self.connect().map(|_| ())
    }
}
