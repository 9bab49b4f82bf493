//! JSON envelope shared by every menu route.
//!
//! Successful calls carry `data`, failed ones an `error` with a stable
//! machine-readable code; the absent half is left out of the body.

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
    pub served_at: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            served_at: Utc::now(),
        }
    }

    pub fn error(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ErrorBody {
                code,
                message: message.into(),
            }),
            served_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_envelope_omits_data() {
        let value = serde_json::to_value(ApiResponse::<()>::error("NOT_FOUND", "no such menu item")).unwrap();

        assert_eq!(value["success"], false);
        assert_eq!(value["error"]["code"], "NOT_FOUND");
        assert!(value.get("data").is_none());
        assert!(value["served_at"].is_string());
    }

    #[test]
    fn test_success_envelope_omits_error() {
        let value = serde_json::to_value(ApiResponse::success(vec!["imprint"])).unwrap();

        assert_eq!(value["data"][0], "imprint");
        assert!(value.get("error").is_none());
    }
}
