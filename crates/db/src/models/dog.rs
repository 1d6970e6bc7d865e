//! Dog entity model and DTOs.

use dogbreed_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `dogs` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Dog {
    pub id: DbId,
    pub name: String,
    pub breed: String,
    pub image_path: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new dog.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDog {
    pub name: String,
    pub breed: String,
    pub image_path: Option<String>,
}

/// DTO for updating a dog. `name` and `breed` are always written;
/// `image_path` only when `Some`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateDog {
    pub name: String,
    pub breed: String,
    pub image_path: Option<String>,
}
