use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use service::ServiceError;
use tracing::error;

use crate::metrics;

/// JSON error body: `{"error": "...", "detail": "..."}`
#[derive(Debug, Serialize)]
pub struct JsonApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: impl Into<String>, detail: Option<String>) -> Self {
        Self { status, error: error.into(), detail }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match &e {
            ServiceError::NotFound(entity) => {
                metrics::NOT_FOUND_TOTAL.inc();
                let msg = match entity.as_str() {
                    "user" => "User not found",
                    "complaint" => "Complaint not found",
                    _ => "Not Found",
                };
                JsonApiError::new(StatusCode::NOT_FOUND, msg, None)
            }
            ServiceError::DuplicateSecret | ServiceError::DuplicateId { .. } | ServiceError::Poisoned => {
                error!(err = %e, code = e.code(), "store invariant failure");
                JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", Some(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use service::RecordKind;

    #[test]
    fn not_found_maps_to_404_with_entity_message() {
        let e: JsonApiError = ServiceError::user_not_found().into();
        assert_eq!(e.status, StatusCode::NOT_FOUND);
        assert_eq!(e.error, "User not found");
        let e: JsonApiError = ServiceError::complaint_not_found().into();
        assert_eq!(e.error, "Complaint not found");
    }

    #[test]
    fn invariant_failures_map_to_500() {
        for err in [
            ServiceError::DuplicateSecret,
            ServiceError::DuplicateId { kind: RecordKind::User, id: "u1".into() },
            ServiceError::Poisoned,
        ] {
            let e: JsonApiError = err.into();
            assert_eq!(e.status, StatusCode::INTERNAL_SERVER_ERROR);
            assert!(e.detail.is_some());
        }
    }

    #[test]
    fn body_omits_empty_detail() {
        let e = JsonApiError::new(StatusCode::NOT_FOUND, "User not found", None);
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json, serde_json::json!({"error": "User not found"}));
    }
}
