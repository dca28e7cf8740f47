use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// The uniform response wrapper used by every vending endpoint:
///
/// ```json
/// {"status": "success", "data": {"post": {...}}, "message": "..."}
/// ```
///
/// Write operations carry their payload under `data.post`, reads under
/// `data.get`, and deletes carry `data: null`. The `status` field is always
/// `"success"`; failures never construct an envelope and instead surface as a
/// [`crate::ServiceError`] response.
#[derive(Debug, Serialize)]
pub struct Envelope {
    pub status: &'static str,
    pub data: Option<EnvelopeData>,
    pub message: String,
}

/// Payload slot of an [`Envelope`]. Serializes as `{"post": ...}` or
/// `{"get": ...}`.
#[derive(Debug, Serialize)]
pub enum EnvelopeData {
    #[serde(rename = "post")]
    Post(serde_json::Value),
    #[serde(rename = "get")]
    Get(serde_json::Value),
}

impl Envelope {
    /// Envelope for a write operation.
    pub fn post(payload: serde_json::Value, message: impl Into<String>) -> Self {
        Self {
            status: "success",
            data: Some(EnvelopeData::Post(payload)),
            message: message.into(),
        }
    }

    /// Envelope for a read operation.
    pub fn get(payload: serde_json::Value, message: impl Into<String>) -> Self {
        Self {
            status: "success",
            data: Some(EnvelopeData::Get(payload)),
            message: message.into(),
        }
    }

    /// Envelope for a delete operation: `data` is `null`.
    pub fn deleted(message: impl Into<String>) -> Self {
        Self {
            status: "success",
            data: None,
            message: message.into(),
        }
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        axum::Json(self).into_response()
    }
}

/// Re-add an identity field to a `to_dict` projection.
///
/// Machine and product projections intentionally leave `id` out; response
/// payloads put it back at the call site.
pub fn with_id(id: i64, dict: serde_json::Value) -> serde_json::Value {
    match dict {
        serde_json::Value::Object(mut map) => {
            map.insert("id".to_string(), id.into());
            serde_json::Value::Object(map)
        }
        other => other,
    }
}
