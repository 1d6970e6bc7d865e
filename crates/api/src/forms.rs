//! Multipart form decoding for the create and edit pages.

use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;
use dogbreed_core::error::CoreError;
use dogbreed_core::upload::sanitize_filename;

use crate::error::{AppError, AppResult};

/// An image part that actually carries a file.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Client-supplied filename, directory components already stripped.
    pub filename: String,
    pub data: Vec<u8>,
}

/// Fields posted by the add and edit forms.
#[derive(Debug, Default)]
pub struct DogForm {
    pub id: Option<String>,
    pub name: Option<String>,
    pub breed: Option<String>,
    pub image: Option<UploadedFile>,
}

impl DogForm {
    /// Drain a multipart body into a form. Unknown fields are ignored.
    ///
    /// An `image` part without a usable filename or without content is
    /// treated as "no file chosen", which is what browsers send for an
    /// empty file input.
    pub async fn from_multipart(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = DogForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(multipart_error)?
        {
            let name = field.name().unwrap_or("").to_string();
            match name.as_str() {
                "image" => {
                    let filename = field.file_name().and_then(sanitize_filename);
                    let data = field
                        .bytes()
                        .await
                        .map_err(multipart_error)?;
                    form.image = match filename {
                        Some(filename) if !data.is_empty() => Some(UploadedFile {
                            filename,
                            data: data.to_vec(),
                        }),
                        _ => None,
                    };
                }
                "id" | "name" | "breed" => {
                    let text = field
                        .text()
                        .await
                        .map_err(multipart_error)?;
                    match name.as_str() {
                        "id" => form.id = Some(text),
                        "name" => form.name = Some(text),
                        _ => form.breed = Some(text),
                    }
                }
                _ => {}
            }
        }

        Ok(form)
    }

    /// The trimmed `name` and `breed`, both of which must be non-blank.
    pub fn required_text(&self) -> Result<(String, String), CoreError> {
        let name = required(self.name.as_deref(), "name")?;
        let breed = required(self.breed.as_deref(), "breed")?;
        Ok((name, breed))
    }
}

/// Keep the status multer assigns, so an oversized body reports 413.
fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::BadRequest(err.body_text())
    }
}

fn required(value: Option<&str>, field: &str) -> Result<String, CoreError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(CoreError::Validation(format!(
            "Missing required field '{field}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn required_text_trims_values() {
        let form = DogForm {
            name: Some("  Rex ".into()),
            breed: Some("Labrador".into()),
            ..Default::default()
        };
        assert_eq!(
            form.required_text().unwrap(),
            ("Rex".to_string(), "Labrador".to_string())
        );
    }

    #[test]
    fn blank_or_missing_fields_are_rejected() {
        let blank = DogForm {
            name: Some("   ".into()),
            breed: Some("Labrador".into()),
            ..Default::default()
        };
        assert_matches!(blank.required_text(), Err(CoreError::Validation(msg)) if msg.contains("name"));

        let missing = DogForm {
            name: Some("Rex".into()),
            ..Default::default()
        };
        assert_matches!(missing.required_text(), Err(CoreError::Validation(msg)) if msg.contains("breed"));
    }
}
