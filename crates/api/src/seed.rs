//! Catalog seeding from the public Dog CEO image API.
//!
//! Each iteration asks the API for a random image URL, downloads the image,
//! stores it through the [`ImageStore`] and inserts a record whose breed is
//! read from the URL path. A failed iteration is logged and skipped.

use dogbreed_core::error::CoreError;
use dogbreed_core::storage::ImageStore;
use dogbreed_db::models::dog::CreateDog;
use dogbreed_db::{DogStore, StoreError};
use serde::Deserialize;

/// Default endpoint returning one random image URL.
pub const DOG_CEO_RANDOM_URL: &str = "https://dog.ceo/api/breeds/image/random";

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Dog API error: {0}")]
    Api(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Deserialize)]
struct RandomImageResponse {
    message: String,
    status: String,
}

/// Seeding parameters loaded from the environment.
#[derive(Debug, Clone)]
pub struct SeedConfig {
    /// Number of images to fetch (`SEED_COUNT`, default `20`).
    pub count: u32,
    /// Random-image endpoint (`DOG_API_URL`).
    pub api_url: String,
}

impl SeedConfig {
    pub fn from_env() -> Self {
        let count: u32 = std::env::var("SEED_COUNT")
            .unwrap_or_else(|_| "20".into())
            .parse()
            .expect("SEED_COUNT must be a valid u32");

        let api_url =
            std::env::var("DOG_API_URL").unwrap_or_else(|_| DOG_CEO_RANDOM_URL.to_string());

        Self { count, api_url }
    }
}

/// Totals for one seeding run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub created: u32,
    pub failed: u32,
}

/// Human-readable breed from a Dog CEO image URL.
///
/// `.../breeds/hound-afghan/n02088094_1003.jpg` becomes `Afghan Hound`:
/// the API lists the main breed first and the sub-breed second.
pub fn breed_from_image_url(url: &str) -> Option<String> {
    let (_, rest) = url.split_once("/breeds/")?;
    let slug = rest.split('/').next().filter(|s| !s.is_empty())?;

    let words: Vec<String> = slug
        .split('-')
        .rev()
        .filter(|w| !w.is_empty())
        .map(capitalize)
        .collect();
    if words.is_empty() {
        return None;
    }
    Some(words.join(" "))
}

/// Last path segment of an image URL, used as the upload filename.
pub fn filename_from_url(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

async fn seed_one(
    client: &reqwest::Client,
    config: &SeedConfig,
    n: u32,
    dogs: &dyn DogStore,
    images: &dyn ImageStore,
) -> Result<(), SeedError> {
    let random: RandomImageResponse = client
        .get(&config.api_url)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    if random.status != "success" {
        return Err(SeedError::Api(format!(
            "unexpected status '{}'",
            random.status
        )));
    }

    let bytes = client
        .get(&random.message)
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await?;

    let stored = images
        .save(filename_from_url(&random.message), &bytes)
        .await?;
    let breed = breed_from_image_url(&random.message).unwrap_or_else(|| "Unknown".to_string());

    let dog = dogs
        .insert(&CreateDog {
            name: format!("Dog {n}"),
            breed,
            image_path: Some(stored.image_path),
        })
        .await?;
    tracing::info!(dog_id = dog.id, breed = %dog.breed, "Seeded dog");
    Ok(())
}

/// Fetch `config.count` random dogs into the catalog.
pub async fn run(
    client: &reqwest::Client,
    config: &SeedConfig,
    dogs: &dyn DogStore,
    images: &dyn ImageStore,
) -> SeedReport {
    let mut report = SeedReport::default();

    for n in 1..=config.count {
        match seed_one(client, config, n, dogs, images).await {
            Ok(()) => report.created += 1,
            Err(e) => {
                tracing::warn!(n, error = %e, "Failed to seed dog");
                report.failed += 1;
            }
        }
    }

    report
}
