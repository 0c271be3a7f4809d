//! Standard messages shared by the failure envelope.

pub const INTERNAL_ERROR: &str = "Internal server error";
pub const ROUTE_NOT_FOUND: &str = "Route not found";
pub const BODY_NOT_OBJECT: &str = "Request body must be a JSON object";
