//! End-to-end page tests against a real PostgreSQL database.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_text, build_test_app, create_dog, get, post_multipart, Part};
use dogbreed_db::{DogStore, PgDogStore};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_edit_delete_scenario(pool: PgPool) {
    let store = Arc::new(PgDogStore::new(pool));
    let app = build_test_app(store.clone());

    create_dog(&app, "Rex", "Labrador", "rex.jpg", b"rex").await;
    let dogs = store.list().await.unwrap();
    assert_eq!(dogs.len(), 1);
    let dog = dogs[0].clone();
    assert_eq!(dog.name, "Rex");

    let response = post_multipart(
        &app,
        &format!("/edit?id={}", dog.id),
        &[Part::Text("name", "Rex2"), Part::Text("breed", "Labrador")],
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let updated = store.get(dog.id).await.unwrap().unwrap();
    assert_eq!(updated.name, "Rex2");
    assert_eq!(updated.image_path, dog.image_path);

    let html = body_text(get(&app, "/").await).await;
    assert!(html.contains("<td>Rex2</td>"));

    let first = get(&app, &format!("/delete?id={}", dog.id)).await;
    let second = get(&app, &format!("/delete?id={}", dog.id)).await;
    assert_eq!(first.status(), StatusCode::SEE_OTHER);
    assert_eq!(second.status(), StatusCode::SEE_OTHER);
    assert!(store.list().await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn edit_unknown_id_is_not_found(pool: PgPool) {
    let app = build_test_app(Arc::new(PgDogStore::new(pool)));

    let response = get(&app, "/edit?id=123456").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(!body_text(response).await.contains("<form"));
}
