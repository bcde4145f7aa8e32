//! Common JSON envelope

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Envelope written for error responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonResponse {
    pub error: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonResponse {
    /// Create an error envelope without a payload
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: true,
            message: message.into(),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_envelope_omits_data() {
        let json = serde_json::to_value(JsonResponse::error("boom")).unwrap();
        assert_eq!(json, serde_json::json!({"error": true, "message": "boom"}));
    }
}
