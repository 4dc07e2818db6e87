use std::{collections::HashMap, path::Path};

use axum::extract::Multipart;
use chrono::Utc;
use tokio::fs;
use tracing::error;

use crate::{Error, Result};

/// Form field name the upload widget posts the image under.
pub const IMAGE_FIELD: &str = "myImage";

/// Text fields plus the stored filename of an uploaded image, if one came
/// in. Repeated fields (category checkboxes) keep every value.
pub struct SubmittedForm {
    fields: HashMap<String, Vec<String>>,
    pub image: Option<String>,
}

impl SubmittedForm {
    pub fn value(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    pub fn value_or_default(&self, name: &str) -> String {
        self.value(name).unwrap_or_default().to_string()
    }

    pub fn require(&self, name: &str) -> Result<String> {
        self.value(name)
            .map(str::to_string)
            .ok_or_else(|| Error::BadRequest(format!("Missing field: {name}")))
    }

    pub fn values(&self, name: &str) -> Vec<String> {
        self.fields.get(name).cloned().unwrap_or_default()
    }
}

/// Drain a multipart submission, storing the image (if any) into
/// `uploads_dir` under a multer-style `field_timestamp.ext` name. Files
/// that do not decode as images are rejected outright.
pub async fn read_form(mut multipart: Multipart, uploads_dir: &str) -> Result<SubmittedForm> {
    let mut fields: HashMap<String, Vec<String>> = HashMap::new();
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| Error::BadRequest(err.to_string()))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        let file_name = field.file_name().map(str::to_string);

        match file_name {
            // Only the upload widget's field carries a file. A part with an
            // empty filename is a form submitted with no file selected.
            Some(file_name) if name == IMAGE_FIELD && !file_name.is_empty() => {
                let data = field
                    .bytes()
                    .await
                    .map_err(|err| Error::BadRequest(err.to_string()))?;
                if data.is_empty() {
                    continue;
                }
                if image::guess_format(&data).is_err() {
                    return Err(Error::BadRequest(
                        "Uploaded file is not an image".to_string(),
                    ));
                }

                let ext = Path::new(&file_name)
                    .extension()
                    .and_then(|e| e.to_str())
                    .map(|e| format!(".{e}"))
                    .unwrap_or_default();
                let stored = format!("{}_{}{}", name, Utc::now().timestamp_millis(), ext);

                fs::create_dir_all(uploads_dir).await.map_err(|err| {
                    error!("Failed to create upload dir: {:?}", err);
                    Error::InternalServerError
                })?;
                fs::write(Path::new(uploads_dir).join(&stored), &data)
                    .await
                    .map_err(|err| {
                        error!("Failed to store upload: {:?}", err);
                        Error::InternalServerError
                    })?;

                image = Some(stored);
            }
            _ => {
                let text = field
                    .text()
                    .await
                    .map_err(|err| Error::BadRequest(err.to_string()))?;
                fields.entry(name).or_default().push(text);
            }
        }
    }

    Ok(SubmittedForm { fields, image })
}
