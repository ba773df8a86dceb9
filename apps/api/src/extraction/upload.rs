use std::collections::HashMap;

use axum::extract::Multipart;
use bytes::Bytes;

use crate::errors::AppError;

pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// A drained multipart form: the first `file` part plus every text field.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub file: Option<UploadedFile>,
    pub fields: HashMap<String, String>,
}

impl UploadForm {
    /// Non-blank text field, trimmed.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

pub async fn read_upload(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if name == "file" && form.file.is_none() {
            let file_name = field.file_name().unwrap_or("upload").to_string();
            let content_type = field.content_type().map(str::to_string);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Invalid file: {e}")))?;
            if bytes.len() > MAX_UPLOAD_BYTES {
                return Err(AppError::Validation(
                    "File too large. Maximum size is 10MB".to_string(),
                ));
            }
            form.file = Some(UploadedFile {
                file_name,
                content_type,
                bytes,
            });
        } else {
            let text = field
                .text()
                .await
                .map_err(|e| AppError::Validation(format!("Invalid field {name}: {e}")))?;
            form.fields.insert(name, text);
        }
    }

    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_ignores_blank_values() {
        let mut form = UploadForm::default();
        form.fields.insert("user_id".to_string(), "  u1 ".to_string());
        form.fields.insert("note".to_string(), "   ".to_string());
        assert_eq!(form.field("user_id"), Some("u1"));
        assert_eq!(form.field("note"), None);
        assert_eq!(form.field("missing"), None);
    }
}
