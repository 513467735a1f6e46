use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};

/// Uniform response body: `data` on success, `error` on failure, never both.
///
/// The fields are private so the only way to build one is through
/// [`Envelope::success`] or [`Envelope::failure`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    success: bool,
    // No `default` here: it would bound `T: Default`
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Split into the two outcomes a caller can act on
    pub fn into_result(self) -> Result<T, String> {
        match (self.success, self.data, self.error) {
            (true, Some(data), _) => Ok(data),
            (_, _, Some(error)) => Err(error),
            (true, None, None) => Err("success envelope without data".to_string()),
            (false, _, None) => Err("failure envelope without error message".to_string()),
        }
    }
}

/// Wrapper for handler results that adds the success envelope
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a successful API response (200)
    pub fn success(data: T) -> Self {
        Self { data }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        // Serialize up front so a bad payload still yields a well-formed failure envelope
        match serde_json::to_value(&self.data) {
            Ok(value) => (StatusCode::OK, Json(Envelope::success(value))).into_response(),
            Err(e) => {
                tracing::error!("Failed to serialize response data: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(Envelope::<()>::failure("Failed to serialize response data")),
                )
                    .into_response()
            }
        }
    }
}

pub type ApiResult<T> = Result<ApiResponse<T>, crate::error::ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_serializes_without_error_key() {
        let body = serde_json::to_value(Envelope::success(json!({"id": 1}))).unwrap();
        assert_eq!(body, json!({"success": true, "data": {"id": 1}}));
    }

    #[test]
    fn failure_serializes_without_data_key() {
        let body = serde_json::to_value(Envelope::<()>::failure("nope")).unwrap();
        assert_eq!(body, json!({"success": false, "error": "nope"}));
    }

    #[test]
    fn into_result_splits_outcomes() {
        let ok: Envelope<u32> = serde_json::from_value(json!({"success": true, "data": 5})).unwrap();
        assert_eq!(ok.into_result(), Ok(5));

        let err: Envelope<u32> = serde_json::from_value(json!({"error": "boom"})).unwrap();
        assert_eq!(err.into_result(), Err("boom".to_string()));
    }

    // Payload types without a Default impl, like the billing records
    #[derive(Debug, PartialEq, Deserialize)]
    struct Receipt {
        id: String,
        amount: i64,
    }

    fn decode<T: serde::de::DeserializeOwned>(body: serde_json::Value) -> Envelope<T> {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn decodes_payloads_without_default() {
        let ok: Envelope<Receipt> = decode(json!({"success": true, "data": {"id": "in_1", "amount": 1500}}));
        assert_eq!(ok.into_result(), Ok(Receipt { id: "in_1".into(), amount: 1500 }));

        let denied: Envelope<crate::billing::Invoice> = decode(json!({"success": false, "error": "Forbidden"}));
        assert_eq!(denied.error(), Some("Forbidden"));
    }
}
