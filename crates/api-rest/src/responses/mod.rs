//! Standardized API response types.
//!
//! JSON bodies are wrapped in [`ApiResponse`]; reports are streamed back
//! as PDF attachments.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standard API response wrapper
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Indicates if the request was successful
    pub success: bool,

    /// Response data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    /// Optional message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    /// Create a success response with data
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    /// Create a success response with data and message
    pub fn success_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
        }
    }
}

impl<T> IntoResponse for ApiResponse<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Created response (HTTP 201)
pub struct Created<T>(pub T);

impl<T> IntoResponse for Created<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(ApiResponse::success(self.0))).into_response()
    }
}

/// A PDF download
pub struct PdfAttachment {
    /// Suggested file name
    pub file_name: String,

    /// Document bytes
    pub bytes: Vec<u8>,
}

impl PdfAttachment {
    fn content_disposition(&self) -> HeaderValue {
        HeaderValue::from_str(&format!("attachment; filename=\"{}\"", self.file_name))
            .unwrap_or_else(|_| HeaderValue::from_static("attachment"))
    }
}

impl IntoResponse for PdfAttachment {
    fn into_response(self) -> Response {
        let headers = [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/pdf")),
            (header::CONTENT_DISPOSITION, self.content_disposition()),
        ];

        (StatusCode::OK, headers, self.bytes).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_attachment_headers() {
        let response = PdfAttachment {
            file_name: "Byte Club_Evaluation_Report.pdf".to_string(),
            bytes: b"%PDF-1.3".to_vec(),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Byte Club_Evaluation_Report.pdf\""
        );
    }

    #[test]
    fn test_unencodable_file_name_falls_back() {
        let attachment = PdfAttachment {
            file_name: "bad\nname.pdf".to_string(),
            bytes: Vec::new(),
        };
        assert_eq!(attachment.content_disposition(), "attachment");
    }
}
