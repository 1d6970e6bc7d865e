//! `dogbreed-seed` -- fill the catalog with random dogs.
//!
//! # Environment variables
//!
//! | Variable       | Required | Default                                   |
//! |----------------|----------|-------------------------------------------|
//! | `DATABASE_URL` | yes      | --                                        |
//! | `UPLOAD_DIR`   | no       | `uploads`                                 |
//! | `SEED_COUNT`   | no       | `20`                                      |
//! | `DOG_API_URL`  | no       | `https://dog.ceo/api/breeds/image/random` |

use dogbreed_core::storage::LocalImageStore;
use dogbreed_db::PgDogStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dogbreed_api::config::ServerConfig;
use dogbreed_api::seed::{self, SeedConfig};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dogbreed_api=info,dogbreed_seed=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let server_config = ServerConfig::from_env();
    let seed_config = SeedConfig::from_env();

    let database_url = std::env::var("DATABASE_URL").unwrap_or_else(|_| {
        tracing::error!("DATABASE_URL environment variable is required");
        std::process::exit(1);
    });

    let pool = dogbreed_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    dogbreed_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    let dogs = PgDogStore::new(pool);
    let images = LocalImageStore::new(&server_config.upload_dir);
    let client = reqwest::Client::new();

    tracing::info!(count = seed_config.count, api = %seed_config.api_url, "Seeding catalog");
    let report = seed::run(&client, &seed_config, &dogs, &images).await;
    tracing::info!(created = report.created, failed = report.failed, "Seeding finished");
}
