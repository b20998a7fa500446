//! JSON body extractor - Accepts any JSON document, or nothing at all.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, HeaderMap},
};
use serde_json::{Map, Value};

use crate::errors::AppError;

/// Raw JSON request body.
///
/// Only bodies sent as `application/json` are parsed. Anything else (no
/// content type, another content type, or an empty body) is read as `{}`.
/// A JSON body that does not parse is rejected with `400 BAD_REQUEST` before
/// the handler runs.
///
/// # Example
///
/// ```rust,ignore
/// use user_crud::api::extractors::JsonBody;
///
/// async fn echo(JsonBody(body): JsonBody) -> axum::Json<serde_json::Value> {
///     axum::Json(body)
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct JsonBody(pub Value);

#[async_trait]
impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !is_json_content(req.headers()) {
            return Ok(JsonBody(Value::Object(Map::new())));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::bad_request(e.body_text()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(JsonBody(Value::Object(Map::new())));
        }

        serde_json::from_slice(&bytes)
            .map(JsonBody)
            .map_err(|e| AppError::bad_request(format!("Malformed JSON body: {}", e)))
    }
}

fn is_json_content(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<mime::Mime>().ok())
        .is_some_and(|content_type| content_type.essence_str() == mime::APPLICATION_JSON.essence_str())
}
