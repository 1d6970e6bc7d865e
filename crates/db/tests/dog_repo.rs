//! Integration tests for the `dogs` repository against a real database.

use dogbreed_db::models::dog::{CreateDog, UpdateDog};
use dogbreed_db::repositories::DogRepo;
use dogbreed_db::{DogStore, PgDogStore};
use sqlx::PgPool;

fn new_dog(name: &str, breed: &str, image_path: Option<&str>) -> CreateDog {
    CreateDog {
        name: name.to_string(),
        breed: breed.to_string(),
        image_path: image_path.map(str::to_string),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_assigns_id_and_persists_fields(pool: PgPool) {
    let dog = DogRepo::create(&pool, &new_dog("Rex", "Labrador", Some("uploads/rex.jpg")))
        .await
        .unwrap();

    assert!(dog.id > 0);
    let found = DogRepo::find_by_id(&pool, dog.id).await.unwrap().unwrap();
    assert_eq!(found.name, "Rex");
    assert_eq!(found.breed, "Labrador");
    assert_eq!(found.image_path.as_deref(), Some("uploads/rex.jpg"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_returns_rows_in_insertion_order(pool: PgPool) {
    DogRepo::create(&pool, &new_dog("Rex", "Labrador", None)).await.unwrap();
    DogRepo::create(&pool, &new_dog("Fido", "Beagle", None)).await.unwrap();
    DogRepo::create(&pool, &new_dog("Bella", "Poodle", None)).await.unwrap();

    let names: Vec<_> = DogRepo::list(&pool)
        .await
        .unwrap()
        .into_iter()
        .map(|d| d.name)
        .collect();
    assert_eq!(names, ["Rex", "Fido", "Bella"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_without_image_leaves_path(pool: PgPool) {
    let dog = DogRepo::create(&pool, &new_dog("Rex", "Labrador", Some("uploads/rex.jpg")))
        .await
        .unwrap();

    let updated = DogRepo::update(
        &pool,
        dog.id,
        &UpdateDog {
            name: "Rex2".into(),
            breed: "Labrador".into(),
            image_path: None,
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.name, "Rex2");
    assert_eq!(updated.image_path.as_deref(), Some("uploads/rex.jpg"));
    assert!(updated.updated_at >= dog.updated_at);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_with_image_replaces_path(pool: PgPool) {
    let dog = DogRepo::create(&pool, &new_dog("Rex", "Labrador", Some("uploads/old.jpg")))
        .await
        .unwrap();

    let updated = DogRepo::update(
        &pool,
        dog.id,
        &UpdateDog {
            name: "Rex".into(),
            breed: "Labrador".into(),
            image_path: Some("uploads/new.jpg".into()),
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.image_path.as_deref(), Some("uploads/new.jpg"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_missing_row_returns_none(pool: PgPool) {
    let result = DogRepo::update(
        &pool,
        999_999,
        &UpdateDog {
            name: "x".into(),
            breed: "y".into(),
            image_path: None,
        },
    )
    .await
    .unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_is_idempotent(pool: PgPool) {
    let dog = DogRepo::create(&pool, &new_dog("Rex", "Labrador", None)).await.unwrap();

    assert!(DogRepo::delete(&pool, dog.id).await.unwrap());
    assert!(!DogRepo::delete(&pool, dog.id).await.unwrap());
    assert!(DogRepo::find_by_id(&pool, dog.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn name_with_sql_metacharacters_is_stored_verbatim(pool: PgPool) {
    let name = "Rex'); DROP TABLE dogs; --";
    let dog = DogRepo::create(&pool, &new_dog(name, "Labrador", None)).await.unwrap();

    let found = DogRepo::find_by_id(&pool, dog.id).await.unwrap().unwrap();
    assert_eq!(found.name, name);
    assert_eq!(DogRepo::list(&pool).await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn store_counts_image_references(pool: PgPool) {
    let store = PgDogStore::new(pool);
    store.insert(&new_dog("A", "x", Some("uploads/same.jpg"))).await.unwrap();
    store.insert(&new_dog("B", "x", Some("uploads/same.jpg"))).await.unwrap();

    assert_eq!(store.count_image_references("uploads/same.jpg").await.unwrap(), 2);
    assert_eq!(store.count_image_references("uploads/none.jpg").await.unwrap(), 0);
    store.health_check().await.unwrap();
}
