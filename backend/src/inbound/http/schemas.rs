//! OpenAPI schema definitions for types that do not derive `ToSchema`.
//!
//! Domain errors and the generic pagination envelope stay free of utoipa, so
//! this module registers schema-only mirrors of them.

use utoipa::ToSchema;

use super::dto::{AuthorResponse, RecipeResponse, SubscriptionResponse};

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not the owner of the resource.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// Duplicate relationship, recipe name or self-subscription.
    #[schema(rename = "conflict")]
    Conflict,
    /// The database is unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// API error response payload with machine-readable code and human-readable
/// message.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "recipe must have at least one tag")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(example = "0b1f7f4e-5f5e-4c4b-9a59-9f0c7c1d2a33")]
    trace_id: Option<String>,
    /// `{field, code}` for validation failures.
    details: Option<serde_json::Value>,
}

/// Generates a schema-only mirror of `pagination::Page<T>` for one item type.
macro_rules! page_schema {
    ($(#[$meta:meta])* $name:ident, $item:ty) => {
        $(#[$meta])*
        #[derive(ToSchema)]
        #[expect(
            dead_code,
            reason = "Used only for OpenAPI schema generation via utoipa"
        )]
        pub struct $name {
            /// Total number of items across all pages.
            count: u64,
            /// Absolute URL of the next page.
            #[schema(example = "http://localhost:8080/api/recipes?page=2&limit=6")]
            next: Option<String>,
            /// Absolute URL of the previous page.
            previous: Option<String>,
            results: Vec<$item>,
        }
    };
}

page_schema! {
    /// A page of recipes.
    RecipePageSchema, RecipeResponse
}

page_schema! {
    /// A page of users.
    UserPageSchema, AuthorResponse
}

page_schema! {
    /// A page of followed authors.
    SubscriptionPageSchema, SubscriptionResponse
}
