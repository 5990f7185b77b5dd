//! HTTP error responses.
//!
//! Every error leaves the server as `{"detail": "..."}` with a status code
//! chosen from the error kind.

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use payment_domain::DomainError;
use serde_json::json;

use crate::infrastructure::ports::RepoError;
use crate::use_cases::{EvidenceError, ImportError, PaymentError};

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    PayloadTooLarge(String),
    Unprocessable(String),
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match self {
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Request failed");
                "Internal server error".to_string()
            }
            ApiError::BadRequest(msg)
            | ApiError::NotFound(msg)
            | ApiError::PayloadTooLarge(msg)
            | ApiError::Unprocessable(msg) => msg,
        };
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

impl From<RepoError> for ApiError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::NotFound { entity_type, .. } => {
                ApiError::NotFound(format!("{} not found", entity_type))
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

/// Malformed ids in the path.
impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        ApiError::BadRequest(e.detail())
    }
}

impl From<PaymentError> for ApiError {
    fn from(e: PaymentError) -> Self {
        match e {
            PaymentError::NotFound(_) => ApiError::NotFound("Payment not found".to_string()),
            PaymentError::InvalidInput(msg) => ApiError::BadRequest(msg),
            PaymentError::Repo(e) => e.into(),
        }
    }
}

impl From<ImportError> for ApiError {
    fn from(e: ImportError) -> Self {
        match e {
            ImportError::Repo(e) => e.into(),
            other => ApiError::BadRequest(other.to_string()),
        }
    }
}

impl From<EvidenceError> for ApiError {
    fn from(e: EvidenceError) -> Self {
        match e {
            EvidenceError::InvalidInput(msg) => ApiError::BadRequest(msg),
            EvidenceError::PaymentNotFound | EvidenceError::EvidenceNotFound => {
                ApiError::NotFound(e.to_string())
            }
            EvidenceError::Repo(e) => e.into(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Unprocessable(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Unprocessable(rejection.body_text())
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        ApiError::Unprocessable(rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(e: MultipartError) -> Self {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(e.body_text())
        } else {
            ApiError::BadRequest(e.body_text())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use payment_domain::PaymentId;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn errors_render_detail_body() {
        let response = ApiError::BadRequest("File must be a CSV".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({ "detail": "File must be a CSV" }));
    }

    #[tokio::test]
    async fn internal_errors_hide_the_cause() {
        let response = ApiError::from(RepoError::database("payments.list", "disk I/O error"))
            .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({ "detail": "Internal server error" })
        );
    }

    #[test]
    fn use_case_errors_map_to_statuses() {
        let not_found = ApiError::from(PaymentError::NotFound(PaymentId::new()));
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let rule = ApiError::from(PaymentError::invalid(
            "Evidence file is required for completed status",
        ));
        assert_eq!(rule.status(), StatusCode::BAD_REQUEST);

        let missing = ApiError::from(EvidenceError::EvidenceNotFound);
        assert!(matches!(missing, ApiError::NotFound(ref m) if m == "Evidence file not found"));

        let bad_row = ApiError::from(ImportError::invalid_field(3, "due_amount", "oops"));
        assert!(matches!(bad_row, ApiError::BadRequest(ref m) if m == "Row 3: due_amount: oops"));
    }

    #[test]
    fn repo_not_found_is_404() {
        let err = ApiError::from(RepoError::not_found("Payment", PaymentId::new()));
        assert!(matches!(err, ApiError::NotFound(ref m) if m == "Payment not found"));
    }
}
