//! Success envelope shared by every endpoint.

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// `{ "success": true, "data": ..., "message"?: ..., "pagination"?: ... }`
///
/// `P` is the pagination metadata type; endpoints without paging leave it as `()`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T, P = ()> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<P>,
}

impl<T> ApiResponse<T> {
    /// Successful response carrying `data`
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            pagination: None,
        }
    }
}

impl ApiResponse<()> {
    /// Successful response with a message and no `data`
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
            pagination: None,
        }
    }
}

impl<T, P> ApiResponse<T, P> {
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_pagination<Q>(self, pagination: Q) -> ApiResponse<T, Q> {
        ApiResponse {
            success: self.success,
            data: self.data,
            message: self.message,
            pagination: Some(pagination),
        }
    }
}

impl<T: Serialize, P: Serialize> IntoResponse for ApiResponse<T, P> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
