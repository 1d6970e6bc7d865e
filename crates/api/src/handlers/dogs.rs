//! Handlers for the dog catalog pages.
//!
//! Every handler runs one request to completion against the injected stores;
//! nothing is kept between requests. Successful writes redirect to the list.

use axum::extract::{Multipart, Query, State};
use axum::response::{Html, Redirect};
use dogbreed_core::error::CoreError;
use dogbreed_core::types::DbId;
use dogbreed_db::models::dog::{CreateDog, UpdateDog};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::forms::DogForm;
use crate::state::AppState;
use crate::views;

/// Query string carrying a record id, e.g. `?id=3`.
#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}

fn parse_id(raw: Option<&str>) -> AppResult<DbId> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing required parameter 'id'".into()))?;
    raw.parse::<DbId>()
        .map_err(|_| AppError::BadRequest(format!("Invalid id '{raw}'")))
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "dog", id })
}

/// Delete `image_path` from storage once no record references it any more.
///
/// Failures are logged and swallowed: the record change has already been
/// committed and the response should reflect that.
///
/// The count and the removal are not atomic. A concurrent create that
/// uploads identical bytes reuses the same content-keyed file (see
/// `LocalImageStore::save`); if it lands between the count and the removal,
/// its record ends up pointing at a deleted file. Requests are not
/// coordinated, so this window is accepted.
async fn release_image(state: &AppState, image_path: &str) {
    match state.dogs.count_image_references(image_path).await {
        Ok(0) => {
            if let Err(e) = state.images.remove(image_path).await {
                tracing::warn!(%image_path, error = %e, "Failed to remove unreferenced image");
            }
        }
        Ok(refs) => {
            tracing::debug!(%image_path, refs, "Image still referenced, keeping");
        }
        Err(e) => {
            tracing::warn!(%image_path, error = %e, "Could not count image references");
        }
    }
}

/// GET /
///
/// Render every dog as a table row, in insertion order.
pub async fn list(State(state): State<AppState>) -> AppResult<Html<String>> {
    let dogs = state.dogs.list().await?;
    Ok(Html(views::dog_list(&dogs).into_string()))
}

/// GET /add
pub async fn add_form() -> Html<String> {
    Html(views::add_form().into_string())
}

/// POST /add
///
/// Requires `name`, `breed` and an `image` file. The image is stored first;
/// the record is only inserted once the file is safely on disk.
pub async fn create(State(state): State<AppState>, multipart: Multipart) -> AppResult<Redirect> {
    let form = DogForm::from_multipart(multipart).await?;
    let (name, breed) = form.required_text()?;
    let image = form.image.ok_or_else(|| {
        CoreError::Validation("Missing required field 'image'".to_string())
    })?;

    let stored = state.images.save(&image.filename, &image.data).await?;

    let dog = state
        .dogs
        .insert(&CreateDog {
            name,
            breed,
            image_path: Some(stored.image_path),
        })
        .await?;

    tracing::info!(dog_id = dog.id, image_path = ?dog.image_path, "Created dog");
    Ok(Redirect::to("/"))
}

/// GET /edit?id={id}
///
/// Render the edit form for an existing dog. An unknown id never renders a form.
pub async fn edit_form(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> AppResult<Html<String>> {
    let id = parse_id(query.id.as_deref())?;
    let dog = state.dogs.get(id).await?.ok_or_else(|| not_found(id))?;
    Ok(Html(views::edit_form(&dog).into_string()))
}

/// POST /edit?id={id}
///
/// Updates `name` and `breed`. When a new image is supplied it is stored
/// first and the record's `image_path` is replaced in the same statement;
/// otherwise `image_path` is left untouched. A replaced image is removed
/// once nothing references it.
pub async fn update(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
    multipart: Multipart,
) -> AppResult<Redirect> {
    let form = DogForm::from_multipart(multipart).await?;
    let id = parse_id(query.id.as_deref().or(form.id.as_deref()))?;

    let existing = state.dogs.get(id).await?.ok_or_else(|| not_found(id))?;
    let (name, breed) = form.required_text()?;

    let new_image_path = match &form.image {
        Some(image) => Some(state.images.save(&image.filename, &image.data).await?.image_path),
        None => None,
    };

    let updated = state
        .dogs
        .update(
            id,
            &UpdateDog {
                name,
                breed,
                image_path: new_image_path,
            },
        )
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(dog_id = id, image_path = ?updated.image_path, "Updated dog");

    if let Some(old) = existing.image_path {
        if updated.image_path.as_deref() != Some(old.as_str()) {
            release_image(&state, &old).await;
        }
    }

    Ok(Redirect::to("/"))
}

/// GET /delete?id={id}
///
/// Remove a dog and, when nothing else references it, its image. Deleting
/// an id that is already gone is a no-op.
pub async fn delete(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> AppResult<Redirect> {
    let id = parse_id(query.id.as_deref())?;

    let existing = state.dogs.get(id).await?;
    if state.dogs.delete(id).await? {
        tracing::info!(dog_id = id, "Deleted dog");
        if let Some(path) = existing.and_then(|dog| dog.image_path) {
            release_image(&state, &path).await;
        }
    } else {
        tracing::debug!(dog_id = id, "Dog already absent, nothing to delete");
    }

    Ok(Redirect::to("/"))
}
