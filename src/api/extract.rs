//! Request body resolution
//!
//! Resolves an incoming request into one [`RequestBody`] shape before any
//! field is consulted: multipart, urlencoded form, or JSON. JSON bodies are
//! parsed from the raw bytes regardless of the declared content type, so
//! clients that send JSON as `text/plain` still normalize correctly.

use std::collections::HashMap;

use axum::body::to_bytes;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;

use crate::api::types::ApiError;
use crate::domain::input::{RequestBody, UploadedFile};

/// Upper bound for buffered bodies (logo uploads included)
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Resolve the request into its body shape
pub async fn resolve_body(req: Request) -> Result<RequestBody, ApiError> {
    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_ascii_lowercase();

    if content_type.starts_with("multipart/form-data") {
        let multipart = Multipart::from_request(req, &())
            .await
            .map_err(|e| ApiError::bad_request(format!("Malformed multipart body: {e}")))?;
        return collect_multipart(multipart).await;
    }

    let bytes = to_bytes(req.into_body(), MAX_BODY_BYTES)
        .await
        .map_err(|e| ApiError::bad_request(format!("Failed to read request body: {e}")))?;

    if content_type.starts_with("application/x-www-form-urlencoded") {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(&bytes)
            .map_err(|e| ApiError::bad_request(format!("Malformed form body: {e}")))?;
        return Ok(RequestBody::Form(pairs.into_iter().collect()));
    }

    Ok(parse_json_fields(&bytes))
}

async fn collect_multipart(mut multipart: Multipart) -> Result<RequestBody, ApiError> {
    let mut fields = HashMap::new();
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Malformed multipart part: {e}")))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        // A part with a filename is a file upload, everything else is text
        if field.file_name().is_some() {
            let file_name = field.file_name().map(str::to_string);
            let content_type = field.content_type().map(str::to_string);
            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::bad_request(format!("Failed to read upload: {e}")))?;

            files.push(UploadedFile {
                field: name,
                file_name,
                content_type,
                data,
            });
        } else {
            let text = field
                .text()
                .await
                .map_err(|e| ApiError::bad_request(format!("Failed to read field: {e}")))?;
            fields.insert(name, text);
        }
    }

    Ok(RequestBody::Multipart { fields, files })
}

/// Parse bytes as a JSON object, stringifying scalar values.
///
/// Anything that is not a JSON object (including an unparseable or empty
/// body) yields an empty field set; the service layer then reports which
/// required fields are missing.
fn parse_json_fields(bytes: &[u8]) -> RequestBody {
    let mut fields = HashMap::new();

    if let Ok(serde_json::Value::Object(map)) = serde_json::from_slice(bytes) {
        for (key, value) in map {
            let text = match value {
                serde_json::Value::String(s) => s,
                serde_json::Value::Number(n) => n.to_string(),
                serde_json::Value::Bool(b) => b.to_string(),
                // null and nested values carry no usable field text
                _ => continue,
            };
            fields.insert(key, text);
        }
    }

    RequestBody::Json(fields)
}
