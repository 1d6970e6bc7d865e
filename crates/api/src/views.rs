//! HTML views. `maud` escapes every spliced value, so record fields always
//! render as literal text.

use axum::http::StatusCode;
use dogbreed_db::models::dog::Dog;
use maud::{html, Markup, PreEscaped, DOCTYPE};

const BOOTSTRAP_CSS: &str =
    "https://cdn.jsdelivr.net/npm/bootstrap@5.3.0-alpha1/dist/css/bootstrap.min.css";
const BOOTSTRAP_JS: &str =
    "https://cdn.jsdelivr.net/npm/bootstrap@5.3.0-alpha1/dist/js/bootstrap.bundle.min.js";

const LIST_CSS: &str = "
    body { padding: 20px; background-color: #f8f9fa; }
    .table img { width: 100px; height: auto; border-radius: 8px; }
    .btn-add { margin-bottom: 20px; }
";

fn layout(title: &str, extra_css: Option<&str>, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                link href=(BOOTSTRAP_CSS) rel="stylesheet";
                @if let Some(css) = extra_css {
                    style { (PreEscaped(css)) }
                }
            }
            body {
                div.container {
                    (body)
                }
                script src=(BOOTSTRAP_JS) {}
            }
        }
    }
}

/// Browser-facing URL for a recorded image path.
fn image_src(image_path: &str) -> String {
    format!("/{}", image_path.trim_start_matches('/'))
}

/// The catalog table: id, name, breed, image, actions.
pub fn dog_list(dogs: &[Dog]) -> Markup {
    layout(
        "Dog Breeds",
        Some(LIST_CSS),
        html! {
            h1 class="text-center mb-4" { "Dog Breeds" }
            a.btn.btn-primary.btn-add href="/add" { "Add New Dog" }
            table.table.table-striped.table-bordered {
                thead.table-dark {
                    tr {
                        th { "ID" }
                        th { "Name" }
                        th { "Breed" }
                        th { "Image" }
                        th { "Actions" }
                    }
                }
                tbody {
                    @for dog in dogs {
                        tr {
                            td { (dog.id) }
                            td { (dog.name) }
                            td { (dog.breed) }
                            td {
                                @if let Some(path) = &dog.image_path {
                                    img src=(image_src(path)) alt=(dog.name);
                                }
                            }
                            td {
                                a.btn.btn-sm.btn-warning href=(format!("/edit?id={}", dog.id)) { "Edit" }
                                " "
                                a.btn.btn-sm.btn-danger href=(format!("/delete?id={}", dog.id)) { "Delete" }
                            }
                        }
                    }
                }
            }
        },
    )
}

/// Empty creation form; every field is required.
pub fn add_form() -> Markup {
    layout(
        "Add Dog",
        None,
        html! {
            h1 class="text-center my-4" { "Add New Dog" }
            form class="w-50 mx-auto" method="POST" action="/add" enctype="multipart/form-data" {
                div class="mb-3" {
                    label.form-label for="name" { "Name" }
                    input.form-control type="text" name="name" id="name" required;
                }
                div class="mb-3" {
                    label.form-label for="breed" { "Breed" }
                    input.form-control type="text" name="breed" id="breed" required;
                }
                div class="mb-3" {
                    label.form-label for="image" { "Image" }
                    input.form-control type="file" name="image" id="image" accept="image/*" required;
                }
                button.btn.btn-primary type="submit" { "Add Dog" }
            }
        },
    )
}

/// Edit form pre-filled with the current name and breed. The image is optional.
pub fn edit_form(dog: &Dog) -> Markup {
    layout(
        "Edit Dog",
        None,
        html! {
            h1 class="text-center my-4" { "Edit Dog" }
            form class="w-50 mx-auto" method="POST" action=(format!("/edit?id={}", dog.id)) enctype="multipart/form-data" {
                input type="hidden" name="id" value=(dog.id);
                div class="mb-3" {
                    label.form-label for="name" { "Name" }
                    input.form-control type="text" name="name" id="name" value=(dog.name) required;
                }
                div class="mb-3" {
                    label.form-label for="breed" { "Breed" }
                    input.form-control type="text" name="breed" id="breed" value=(dog.breed) required;
                }
                div class="mb-3" {
                    label.form-label for="image" { "Image" }
                    input.form-control type="file" name="image" id="image" accept="image/*";
                }
                button.btn.btn-success type="submit" { "Update" }
            }
        },
    )
}

/// Standalone diagnostic page rendered for any failed request.
pub fn error_page(status: StatusCode, message: &str) -> Markup {
    let title = status.canonical_reason().unwrap_or("Error");
    layout(
        title,
        None,
        html! {
            div class="alert alert-danger my-4" role="alert" {
                h4.alert-heading { (status.as_u16()) " " (title) }
                p { (message) }
            }
            a.btn.btn-secondary href="/" { "Back to list" }
        },
    )
}
