//! Shared validation helpers for query strings and path segments.

use pagination::PageError;
use serde_json::json;

use crate::domain::{Error, UserId};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidInteger,
    InvalidBoolean,
    InvalidUuid,
    InvalidPage,
    InvalidLimit,
}

impl ErrorCode {
    const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidInteger => "invalid_integer",
            Self::InvalidBoolean => "invalid_boolean",
            Self::InvalidUuid => "invalid_uuid",
            Self::InvalidPage => "invalid_page",
            Self::InvalidLimit => "invalid_limit",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    const fn as_str(self) -> &'static str {
        self.0
    }
}

fn field_error(field: FieldName, code: ErrorCode, message: String, value: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "value": value,
        "code": code.as_str(),
    }))
}

pub(crate) fn parse_flag(field: FieldName, value: &str) -> Result<bool, Error> {
    match value {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(field_error(
            field,
            ErrorCode::InvalidBoolean,
            format!("{} must be one of true, false, 1 or 0", field.as_str()),
            value,
        )),
    }
}

pub(crate) fn parse_count(field: FieldName, value: &str) -> Result<u64, Error> {
    value.parse().map_err(|_| {
        field_error(
            field,
            ErrorCode::InvalidInteger,
            format!("{} must be a non-negative integer", field.as_str()),
            value,
        )
    })
}

pub(crate) fn parse_user_id(field: FieldName, value: &str) -> Result<UserId, Error> {
    UserId::new(value).map_err(|_| {
        field_error(
            field,
            ErrorCode::InvalidUuid,
            format!("{} must be a valid UUID", field.as_str()),
            value,
        )
    })
}

/// Map a pagination failure onto the API error taxonomy.
pub(crate) fn page_error(err: PageError) -> Error {
    match err {
        PageError::InvalidPage => Error::invalid_request(err.to_string()).with_details(json!({
            "field": "page",
            "code": ErrorCode::InvalidPage.as_str(),
        })),
        PageError::InvalidLimit => Error::invalid_request(err.to_string()).with_details(json!({
            "field": "limit",
            "code": ErrorCode::InvalidLimit.as_str(),
        })),
        PageError::OutOfRange { .. } => Error::not_found(err.to_string()),
    }
}
