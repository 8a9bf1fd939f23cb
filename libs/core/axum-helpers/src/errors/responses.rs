//! Reusable OpenAPI response types so handlers document the error envelope once.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "success": false,
        "code": 5003,
        "kind": "DATABASE_ERROR",
        "message": "Database error occurred"
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Validation Error",
    content_type = "application/json",
    example = json!({
        "success": false,
        "code": 1001,
        "kind": "VALIDATION_ERROR",
        "message": "Request validation failed",
        "details": {
            "name": [{
                "code": "length",
                "message": null,
                "params": {"min": 1, "value": ""}
            }]
        }
    })
)]
pub struct BadRequestValidationResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Malformed id",
    content_type = "application/json",
    example = json!({
        "success": false,
        "code": 1002,
        "kind": "INVALID_OBJECT_ID",
        "message": "Invalid id: not-an-id"
    })
)]
pub struct BadRequestObjectIdResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Unknown referenced document",
    content_type = "application/json",
    example = json!({
        "success": false,
        "code": 1008,
        "kind": "BAD_REQUEST",
        "message": "Invalid Category"
    })
)]
pub struct BadRequestReferenceResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "success": false,
        "code": 1004,
        "kind": "NOT_FOUND",
        "message": "Product not found!"
    })
)]
pub struct NotFoundResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Unauthorized - Missing or invalid bearer token",
    content_type = "application/json",
    example = json!({
        "success": false,
        "code": 1005,
        "kind": "UNAUTHORIZED",
        "message": "The user is not authorized"
    })
)]
pub struct UnauthorizedResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Forbidden - Admin role required",
    content_type = "application/json",
    example = json!({
        "success": false,
        "code": 1006,
        "kind": "FORBIDDEN",
        "message": "Admin access required"
    })
)]
pub struct ForbiddenResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Conflict - Resource already exists",
    content_type = "application/json",
    example = json!({
        "success": false,
        "code": 1007,
        "kind": "CONFLICT",
        "message": "A user with this email already exists"
    })
)]
pub struct ConflictResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Upload rejected",
    content_type = "application/json",
    example = json!({
        "success": false,
        "code": 1009,
        "kind": "UNSUPPORTED_MEDIA_TYPE",
        "message": "Invalid image type: text/plain"
    })
)]
pub struct UnsupportedMediaTypeResponse(pub ErrorResponse);
