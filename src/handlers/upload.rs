use axum::{extract::Multipart, http::StatusCode};
use std::collections::HashMap;
use tracing::{debug, error};

use crate::clients::ai_gateway_client::ImageData;
use crate::models::{error_response, ApiError};
use crate::services::validation::{image_mime_type, is_allowed_image, ALLOWED_IMAGE_EXTENSIONS};

pub const FILE_FIELD: &str = "file";

/// A file part of a multipart form
pub struct UploadedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// All parts of a multipart form, text fields keyed by name
#[derive(Default)]
pub struct UploadForm {
    pub file: Option<UploadedFile>,
    pub fields: HashMap<String, String>,
}

impl UploadForm {
    /// Drain the multipart stream
    pub async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = UploadForm::default();
        loop {
            let field = match multipart.next_field().await {
                Ok(Some(field)) => field,
                Ok(None) => break,
                Err(e) => {
                    error!("Failed to read multipart body: {}", e);
                    return Err(error_response(e.status(), e.body_text()));
                }
            };

            let name = field.name().unwrap_or_default().to_string();
            let filename = field.file_name().map(str::to_string);
            if name == FILE_FIELD {
                let bytes = field.bytes().await.map_err(|e| {
                    error!("Failed to read uploaded file: {}", e);
                    error_response(e.status(), e.body_text())
                })?;
                debug!("Received upload '{}' ({} bytes)", filename.as_deref().unwrap_or(""), bytes.len());
                form.file = Some(UploadedFile {
                    filename: filename.unwrap_or_default(),
                    bytes: bytes.to_vec(),
                });
            } else {
                let text = field.text().await.map_err(|e| error_response(e.status(), e.body_text()))?;
                form.fields.insert(name, text);
            }
        }
        Ok(form)
    }

    /// Trimmed, non-empty text field
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(|v| v.trim()).filter(|v| !v.is_empty())
    }

    /// Take the uploaded image, checking presence, extension, size and content
    pub fn take_image(&mut self) -> Result<ImageData, ApiError> {
        let file = self.file.take().ok_or_else(|| {
            error_response(StatusCode::BAD_REQUEST, "Missing image file (field name: file).")
        })?;

        let mime_type = match image_mime_type(&file.filename) {
            Some(mime) if is_allowed_image(&file.filename) => mime,
            _ => {
                return Err(error_response(
                    StatusCode::BAD_REQUEST,
                    format!("Please upload a valid image ({}).", ALLOWED_IMAGE_EXTENSIONS.join("/")),
                ))
            }
        };

        if file.bytes.is_empty() {
            return Err(error_response(StatusCode::BAD_REQUEST, "Uploaded image is empty."));
        }

        // The content has to decode as the type its extension claims
        let detected = infer::get(&file.bytes).map(|kind| kind.mime_type());
        if detected != Some(mime_type) {
            error!(
                "Upload '{}' claims {} but content looks like {}",
                file.filename, mime_type, detected.unwrap_or("unknown data")
            );
            return Err(error_response(
                StatusCode::BAD_REQUEST,
                format!("Unable to read image: '{}' is not a valid {} file.", file.filename, mime_type),
            ));
        }

        Ok(ImageData { mime_type: mime_type.to_string(), bytes: file.bytes })
    }
}
