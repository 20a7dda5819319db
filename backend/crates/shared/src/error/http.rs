use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use super::AppError;

/// JSON error body; the client reads `message` and falls back to its own text
#[derive(Serialize)]
struct ErrorBody<'a> {
    #[serde(rename = "type")]
    type_uri: String,
    title: &'static str,
    status: u16,
    message: &'a str,
    action: Option<&'a str>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            type_uri: format!("https://httpstatuses.io/{status}"),
            title: self.kind.reason(),
            status,
            message: &self.message,
            action: self.action.as_deref(),
        };
        let code = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (code, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[tokio::test]
    async fn test_body_shape() {
        let response = AppError::new(ErrorKind::Forbidden, "Account awaiting admin approval")
            .into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["message"], "Account awaiting admin approval");
        assert_eq!(json["title"], "Forbidden");
        assert_eq!(json["status"], 403);
        assert_eq!(json["type"], "https://httpstatuses.io/403");
        assert!(json["action"].is_null());
    }
}
