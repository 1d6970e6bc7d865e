//! Route definitions for the catalog pages.
//!
//! ```text
//! GET  /                list
//! GET  /add             add_form
//! POST /add             create
//! GET  /edit?id={id}    edit_form
//! POST /edit?id={id}    update
//! GET  /delete?id={id}  delete
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::dogs;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(dogs::list))
        .route("/add", get(dogs::add_form).post(dogs::create))
        .route("/edit", get(dogs::edit_form).post(dogs::update))
        .route("/delete", get(dogs::delete))
}
