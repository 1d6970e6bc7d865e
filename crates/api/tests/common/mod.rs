#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use dogbreed_core::storage::LocalImageStore;
use dogbreed_db::{DogStore, MemoryDogStore};
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use dogbreed_api::config::ServerConfig;
use dogbreed_api::router::build_app_router;
use dogbreed_api::state::AppState;

const BOUNDARY: &str = "----dogbreed-test-boundary";

/// Build a test `ServerConfig` pointing at `upload_dir`.
pub fn test_config(upload_dir: &std::path::Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        upload_dir: upload_dir.to_path_buf(),
        max_upload_bytes: 1024 * 1024,
        request_timeout_secs: 30,
    }
}

/// A router wired to real stores, plus handles for inspecting them.
pub struct TestApp {
    pub router: Router,
    pub images: LocalImageStore,
    pub upload_dir: TempDir,
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Read a stored image back from disk by its recorded path.
    pub fn read_image(&self, image_path: &str) -> Vec<u8> {
        let key = image_path.rsplit('/').next().unwrap();
        std::fs::read(self.images.root().join(key)).unwrap()
    }

    pub fn image_on_disk(&self, image_path: &str) -> bool {
        let key = image_path.rsplit('/').next().unwrap();
        self.images.root().join(key).exists()
    }

    /// Replace the upload directory with a plain file so every save fails.
    pub fn break_upload_dir(&self) {
        std::fs::remove_dir_all(self.images.root()).unwrap();
        std::fs::write(self.images.root(), b"not a directory").unwrap();
    }

    /// Number of files in the upload directory.
    pub fn stored_file_count(&self) -> usize {
        match std::fs::read_dir(self.images.root()) {
            Ok(entries) => entries.count(),
            Err(_) => 0,
        }
    }
}

/// Build the full application router over `dogs` and a fresh upload directory.
pub fn build_test_app(dogs: Arc<dyn DogStore>) -> TestApp {
    let upload_dir = tempfile::tempdir().unwrap();
    let config = test_config(upload_dir.path());
    let images = LocalImageStore::new(upload_dir.path());

    let state = AppState {
        dogs,
        images: Arc::new(images.clone()),
        config: Arc::new(config.clone()),
    };

    TestApp {
        router: build_app_router(state, &config),
        images,
        upload_dir,
    }
}

/// Shorthand for a memory-backed app.
pub fn memory_app() -> (TestApp, Arc<MemoryDogStore>) {
    let store = Arc::new(MemoryDogStore::new());
    let app = build_test_app(store.clone());
    (app, store)
}

/// One multipart form part.
pub enum Part<'a> {
    Text(&'a str, &'a str),
    File(&'a str, &'a str, &'a [u8]),
}

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File(name, filename, data) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn multipart_request(uri: &str, parts: &[Part<'_>]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap()
}

pub async fn get(app: &TestApp, uri: &str) -> Response<Body> {
    app.send(get_request(uri)).await
}

pub async fn post_multipart(app: &TestApp, uri: &str, parts: &[Part<'_>]) -> Response<Body> {
    app.send(multipart_request(uri, parts)).await
}

/// Create a dog through the HTTP form and return nothing; callers inspect the store.
pub async fn create_dog(app: &TestApp, name: &str, breed: &str, filename: &str, data: &[u8]) {
    let response = post_multipart(
        app,
        "/add",
        &[
            Part::Text("name", name),
            Part::Text("breed", breed),
            Part::File("image", filename, data),
        ],
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::SEE_OTHER);
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("redirect must carry a Location header")
        .to_str()
        .unwrap()
}
