use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use posts_core::DomainError;
use posts_infra::StoreError;

use crate::app::dto;

pub const POST_NOT_FOUND: &str = "Post not found";
pub const BODY_FIELDS_REQUIRED: &str = "`title` and `content` are required strings";

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// `404 {"message": "Post not found"}`.
pub fn post_not_found() -> axum::response::Response {
    (StatusCode::NOT_FOUND, axum::Json(dto::message(POST_NOT_FOUND))).into_response()
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::InvalidId(_) => post_not_found(),
    }
}

pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    tracing::error!(error = %err, "post storage failure");
    json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", err.to_string())
}

/// Missing fields, wrong types, malformed JSON, or a non-JSON content type.
pub fn json_rejection_to_response(rejection: JsonRejection) -> axum::response::Response {
    tracing::debug!("rejected post body: {}", rejection.body_text());
    json_error(
        StatusCode::BAD_REQUEST,
        "validation_error",
        rejection_message(&rejection),
    )
}

fn rejection_message(rejection: &JsonRejection) -> &'static str {
    match rejection {
        JsonRejection::JsonDataError(_) => BODY_FIELDS_REQUIRED,
        JsonRejection::JsonSyntaxError(_) => "request body is not valid JSON",
        JsonRejection::MissingJsonContentType(_) => "expected `Content-Type: application/json`",
        _ => "failed to read request body",
    }
}
