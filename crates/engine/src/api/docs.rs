//! API documentation: an OpenAPI description plus Swagger UI and Redoc pages.

use axum::{response::Html, routing::get, Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::app::App;

const SWAGGER_UI: &str = r##"<!DOCTYPE html>
<html>
<head>
  <title>Payment Management API - Swagger UI</title>
  <meta charset="utf-8"/>
  <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/swagger-ui-dist@5/swagger-ui.css">
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://cdn.jsdelivr.net/npm/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
  <script>
    SwaggerUIBundle({ url: "/openapi.json", dom_id: "#swagger-ui" });
  </script>
</body>
</html>
"##;

const REDOC: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title>Payment Management API - ReDoc</title>
  <meta charset="utf-8"/>
</head>
<body>
  <redoc spec-url="/openapi.json"></redoc>
  <script src="https://cdn.jsdelivr.net/npm/redoc@2/bundles/redoc.standalone.js"></script>
</body>
</html>
"#;

pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/docs", get(swagger_ui))
        .route("/redoc", get(redoc))
        .route("/openapi.json", get(openapi_json))
}

async fn swagger_ui() -> Html<&'static str> {
    Html(SWAGGER_UI)
}

async fn redoc() -> Html<&'static str> {
    Html(REDOC)
}

async fn openapi_json() -> Json<Value> {
    Json(openapi_spec())
}

fn payment_id_param() -> Value {
    json!({
        "name": "payment_id",
        "in": "path",
        "required": true,
        "schema": { "type": "string", "format": "uuid" }
    })
}

fn file_upload_body() -> Value {
    json!({
        "required": true,
        "content": {
            "multipart/form-data": {
                "schema": {
                    "type": "object",
                    "required": ["file"],
                    "properties": { "file": { "type": "string", "format": "binary" } }
                }
            }
        }
    })
}

fn json_body(schema: &str) -> Value {
    json!({
        "required": true,
        "content": {
            "application/json": { "schema": { "$ref": format!("#/components/schemas/{}", schema) } }
        }
    })
}

fn message_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": {
            "application/json": { "schema": { "$ref": "#/components/schemas/Message" } }
        }
    })
}

fn error_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": {
            "application/json": { "schema": { "$ref": "#/components/schemas/Error" } }
        }
    })
}

fn payment_properties(include_server_fields: bool) -> Value {
    let mut props = json!({
        "payee_first_name": { "type": "string", "maxLength": 200 },
        "payee_last_name": { "type": "string", "maxLength": 200 },
        "payee_payment_status": { "$ref": "#/components/schemas/PaymentStatus" },
        "payee_added_date_utc": { "type": "string", "format": "date-time" },
        "payee_due_date": { "type": "string", "format": "date" },
        "payee_address_line_1": { "type": "string" },
        "payee_address_line_2": { "type": "string", "nullable": true },
        "payee_city": { "type": "string" },
        "payee_country": { "type": "string", "description": "ISO 3166-1 alpha-2" },
        "payee_province_or_state": { "type": "string", "nullable": true },
        "payee_postal_code": { "type": "string" },
        "payee_phone_number": { "type": "string", "description": "E.164, e.g. +14155550100" },
        "payee_email": { "type": "string", "format": "email" },
        "currency": { "type": "string", "description": "ISO 4217" },
        "discount_percent": { "type": "number", "minimum": 0, "maximum": 100, "nullable": true },
        "tax_percent": { "type": "number", "minimum": 0, "nullable": true },
        "due_amount": { "type": "number", "minimum": 0 }
    });
    if include_server_fields {
        if let Some(map) = props.as_object_mut() {
            map.insert("_id".into(), json!({ "type": "string", "format": "uuid" }));
            map.insert("total_due".into(), json!({ "type": "number" }));
            map.insert(
                "evidence_file_id".into(),
                json!({ "type": "string", "format": "uuid", "nullable": true }),
            );
        }
    }
    props
}

fn payment_page_response() -> Value {
    json!({
        "description": "One page of payments",
        "content": {
            "application/json": { "schema": { "$ref": "#/components/schemas/PaymentPage" } }
        }
    })
}

fn list_parameters() -> Value {
    json!([
        { "name": "page", "in": "query", "schema": { "type": "integer", "minimum": 1, "default": 1 } },
        { "name": "limit", "in": "query", "schema": { "type": "integer", "minimum": 1, "default": 10 } },
        { "name": "status", "in": "query", "schema": { "$ref": "#/components/schemas/PaymentStatus" } },
        { "name": "search", "in": "query", "schema": { "type": "string" } }
    ])
}

fn payments_collection() -> Value {
    json!({
        "get": {
            "summary": "List payments",
            "parameters": list_parameters(),
            "responses": {
                "200": payment_page_response(),
                "422": error_response("Invalid query parameters")
            }
        },
        "post": {
            "summary": "Create a payment",
            "requestBody": json_body("NewPayment"),
            "responses": {
                "200": {
                    "description": "Created",
                    "content": {
                        "application/json": {
                            "schema": { "type": "object", "properties": { "id": { "type": "string" } } }
                        }
                    }
                },
                "422": error_response("Validation failed")
            }
        }
    })
}

fn payment_item() -> Value {
    json!({
        "put": {
            "summary": "Update a payment",
            "parameters": [payment_id_param()],
            "requestBody": json_body("PaymentUpdate"),
            "responses": {
                "200": message_response("Updated"),
                "400": error_response("Invalid id or business rule violated"),
                "404": error_response("Payment not found"),
                "422": error_response("Validation failed")
            }
        },
        "delete": {
            "summary": "Delete a payment",
            "parameters": [payment_id_param()],
            "responses": {
                "200": message_response("Deleted"),
                "404": error_response("Payment not found")
            }
        }
    })
}

fn evidence_item() -> Value {
    json!({
        "post": {
            "summary": "Attach a PDF, PNG or JPEG evidence file",
            "parameters": [payment_id_param()],
            "requestBody": file_upload_body(),
            "responses": {
                "200": message_response("Uploaded"),
                "400": error_response("File type not allowed"),
                "404": error_response("Payment not found")
            }
        },
        "get": {
            "summary": "Download the evidence file",
            "parameters": [payment_id_param()],
            "responses": {
                "200": { "description": "The stored file, served as an attachment" },
                "404": error_response("Evidence file not found")
            }
        }
    })
}

fn csv_upload() -> Value {
    json!({
        "post": {
            "summary": "Bulk import payments from a CSV file",
            "requestBody": file_upload_body(),
            "responses": {
                "200": message_response("Rows inserted"),
                "400": error_response("Not a CSV file or invalid row")
            }
        }
    })
}

fn schemas() -> Value {
    let mut update_properties = payment_properties(false);
    if let Some(map) = update_properties.as_object_mut() {
        map.insert(
            "evidence_file_id".into(),
            json!({ "type": "string", "format": "uuid" }),
        );
    }

    json!({
        "PaymentStatus": {
            "type": "string",
            "enum": ["completed", "due_now", "overdue", "pending"]
        },
        "NewPayment": {
            "type": "object",
            "required": [
                "payee_first_name", "payee_last_name", "payee_payment_status",
                "payee_added_date_utc", "payee_due_date", "payee_address_line_1",
                "payee_city", "payee_country", "payee_postal_code",
                "payee_phone_number", "payee_email", "currency", "due_amount"
            ],
            "properties": payment_properties(false)
        },
        "PaymentUpdate": {
            "type": "object",
            "description": "Any subset of payment fields; completing requires evidence_file_id",
            "properties": update_properties
        },
        "Payment": { "type": "object", "properties": payment_properties(true) },
        "PaymentPage": {
            "type": "object",
            "properties": {
                "total": { "type": "integer" },
                "data": { "type": "array", "items": { "$ref": "#/components/schemas/Payment" } }
            }
        },
        "Message": { "type": "object", "properties": { "message": { "type": "string" } } },
        "Error": { "type": "object", "properties": { "detail": { "type": "string" } } }
    })
}

/// OpenAPI 3 description of every route served by the engine.
pub fn openapi_spec() -> Value {
    json!({
        "openapi": "3.0.3",
        "info": {
            "title": "Payment Management API",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "Payment ledger with CSV import and evidence attachments"
        },
        "paths": {
            "/payments/upload-csv": csv_upload(),
            "/payments": payments_collection(),
            "/payments/{payment_id}": payment_item(),
            "/payments/{payment_id}/evidence": evidence_item(),
            "/test-connection": {
                "get": {
                    "summary": "Check database connectivity",
                    "responses": { "200": { "description": "Connection status" } }
                }
            }
        },
        "components": { "schemas": schemas() }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_lists_every_payment_route() {
        let spec = openapi_spec();
        let paths = spec["paths"].as_object().unwrap();
        for path in [
            "/payments",
            "/payments/upload-csv",
            "/payments/{payment_id}",
            "/payments/{payment_id}/evidence",
            "/test-connection",
        ] {
            assert!(paths.contains_key(path), "missing {}", path);
        }
    }

    #[test]
    fn pages_point_at_openapi_json() {
        assert!(SWAGGER_UI.contains("/openapi.json"));
        assert!(REDOC.contains("/openapi.json"));
    }

    #[test]
    fn swagger_page_mounts_into_its_container() {
        assert!(SWAGGER_UI.contains(r##"dom_id: "#swagger-ui""##));
        assert!(SWAGGER_UI.trim_end().ends_with("</html>"));
    }
}
