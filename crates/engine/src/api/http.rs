//! HTTP routes.

use axum::{
    extract::{
        multipart::MultipartRejection, rejection::JsonRejection, rejection::QueryRejection,
        Multipart, Path, Query, State,
    },
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use payment_domain::{common::none_if_blank, NewPayment, PaymentId, PaymentStatus, PaymentUpdate};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use super::error::ApiError;
use crate::app::App;
use crate::use_cases::payments::PaymentPage;

const DEFAULT_PAGE: u64 = 1;
const DEFAULT_LIMIT: u64 = 10;

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/test-connection", get(test_connection))
        .route("/payments", get(list_payments).post(create_payment))
        .route("/payments/upload-csv", post(upload_csv))
        .route(
            "/payments/{payment_id}",
            put(update_payment).delete(delete_payment),
        )
        .route(
            "/payments/{payment_id}/evidence",
            post(upload_evidence).get(download_evidence),
        )
}

async fn health() -> &'static str {
    "OK"
}

async fn test_connection(State(app): State<Arc<App>>) -> Json<Value> {
    match app.use_cases.health.execute().await {
        Ok(()) => Json(json!({ "status": "Database connection successful" })),
        Err(e) => Json(json!({ "error": format!("Failed to connect to database: {}", e) })),
    }
}

fn parse_payment_id(raw: &str) -> Result<PaymentId, ApiError> {
    Ok(raw.parse::<PaymentId>()?)
}

// =============================================================================
// Payments
// =============================================================================

#[derive(Debug, Deserialize)]
struct ListParams {
    page: Option<u64>,
    limit: Option<u64>,
    status: Option<String>,
    search: Option<String>,
}

async fn list_payments(
    State(app): State<Arc<App>>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<PaymentPage>, ApiError> {
    let Query(params) = params?;

    let page = params.page.unwrap_or(DEFAULT_PAGE);
    if page == 0 {
        return Err(ApiError::Unprocessable(
            "page must be greater than 0".to_string(),
        ));
    }
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT);
    if limit == 0 {
        return Err(ApiError::Unprocessable(
            "limit must be greater than 0".to_string(),
        ));
    }
    let status = params
        .status
        .as_deref()
        .and_then(none_if_blank)
        .map(str::parse::<PaymentStatus>)
        .transpose()
        .map_err(|e| ApiError::Unprocessable(e.detail()))?;
    let search = params
        .search
        .as_deref()
        .and_then(none_if_blank)
        .map(str::to_string);

    let result = app
        .use_cases
        .payments
        .list
        .execute(page, limit, status, search)
        .await?;
    Ok(Json(result))
}

async fn create_payment(
    State(app): State<Arc<App>>,
    body: Result<Json<NewPayment>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(new) = body?;
    let id = app.use_cases.payments.create.execute(new).await?;
    Ok(Json(json!({ "id": id.to_string() })))
}

async fn update_payment(
    State(app): State<Arc<App>>,
    Path(payment_id): Path<String>,
    body: Result<Json<PaymentUpdate>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_payment_id(&payment_id)?;
    let Json(update) = body?;
    app.use_cases.payments.update.execute(id, update).await?;
    Ok(Json(json!({ "message": "Payment updated successfully" })))
}

async fn delete_payment(
    State(app): State<Arc<App>>,
    Path(payment_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_payment_id(&payment_id)?;
    app.use_cases.payments.delete.execute(id).await?;
    Ok(Json(json!({ "message": "Payment deleted successfully" })))
}

// =============================================================================
// Uploads
// =============================================================================

/// The `file` part of a multipart form.
struct UploadedFile {
    filename: String,
    content_type: String,
    data: Vec<u8>,
}

async fn read_file_field(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<UploadedFile, ApiError> {
    let mut multipart = multipart?;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let data = field.bytes().await?.to_vec();
        return Ok(UploadedFile {
            filename,
            content_type,
            data,
        });
    }
    Err(ApiError::Unprocessable(
        "Multipart field 'file' is required".to_string(),
    ))
}

async fn upload_csv(
    State(app): State<Arc<App>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Value>, ApiError> {
    let file = read_file_field(multipart).await?;
    let inserted = app
        .use_cases
        .import
        .execute(&file.filename, &file.data)
        .await?;
    Ok(Json(json!({ "message": format!("Inserted {} records", inserted) })))
}

async fn upload_evidence(
    State(app): State<Arc<App>>,
    Path(payment_id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_payment_id(&payment_id)?;
    let file = read_file_field(multipart).await?;
    let evidence_id = app
        .use_cases
        .evidence
        .upload
        .execute(id, &file.filename, &file.content_type, file.data)
        .await?;
    Ok(Json(json!({
        "message": "Evidence file uploaded successfully",
        "evidence_id": evidence_id.to_string()
    })))
}

async fn download_evidence(
    State(app): State<Arc<App>>,
    Path(payment_id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_payment_id(&payment_id)?;
    let evidence = app.use_cases.evidence.download.execute(id).await?;

    let disposition = content_disposition(&evidence.attachment_filename());
    let headers = [
        (
            header::CONTENT_TYPE,
            HeaderValue::from_static(evidence.content_type.as_mime()),
        ),
        (header::CONTENT_DISPOSITION, disposition),
    ];
    Ok((headers, evidence.data).into_response())
}

/// `attachment` header with a quoted ASCII filename, plus an RFC 5987
/// `filename*` when the name has characters the quoted form cannot carry.
fn content_disposition(filename: &str) -> HeaderValue {
    let mut ascii = String::with_capacity(filename.len());
    for c in filename.chars() {
        match c {
            '"' | '\\' => {
                ascii.push('\\');
                ascii.push(c);
            }
            ' '..='~' => ascii.push(c),
            _ => ascii.push('_'),
        }
    }

    let mut value = format!("attachment; filename=\"{}\"", ascii);
    if !filename.chars().all(|c| matches!(c, ' '..='~')) {
        value.push_str("; filename*=UTF-8''");
        value.push_str(&utf8_percent_encode(filename, NON_ALPHANUMERIC).to_string());
    }
    HeaderValue::from_str(&value).unwrap_or_else(|_| HeaderValue::from_static("attachment"))
}
