// --- File: crates/bookify_common/src/http.rs ---
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::error::{BookifyError, HttpStatusCode};

// Include the client module
pub mod client;

/// Extension trait for BookifyError to convert it to an Axum HTTP response.
pub trait IntoHttpResponse {
    /// Converts the error into an Axum HTTP response.
    fn into_http_response(self) -> Response;
}

impl IntoHttpResponse for BookifyError {
    fn into_http_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // The API speaks a flat error envelope: `{"error": "<message>"}`.
        let body = Json(json!({ "error": self.to_string() }));

        (status_code, body).into_response()
    }
}

/// Implement IntoResponse for BookifyError to make it easier to use in Axum handlers.
impl IntoResponse for BookifyError {
    fn into_response(self) -> Response {
        self.into_http_response()
    }
}

/// Builds an error response in the API's flat envelope with the message
/// sent verbatim. Handlers use this where the exact wording is part of the
/// endpoint contract.
pub fn api_error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}
