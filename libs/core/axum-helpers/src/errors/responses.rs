//! Reusable OpenAPI response descriptions for the failure envelope.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Bad Request - missing or malformed input",
    content_type = "application/json",
    example = json!({
        "success": false,
        "message": "Invalid Event ID format"
    })
)]
pub struct BadRequestResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "success": false,
        "message": "Event not found"
    })
)]
pub struct NotFoundResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error (`error` is omitted in production)",
    content_type = "application/json",
    example = json!({
        "success": false,
        "message": "Internal server error",
        "error": "Kind: Server selection timeout"
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);
