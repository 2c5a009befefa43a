//! Shared validation helpers for inbound HTTP adapters.
//!
//! Path and query problems become domain errors carrying a `field` and a
//! machine-readable `code` in their details. Weight values are deliberately
//! not validated here: the domain declines them without raising an error.

use actix_web::web;
use serde::Deserialize;
use serde_json::json;
use utoipa::IntoParams;

use crate::domain::{ChartGeometry, Error, UserId, WeightEntryId};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    UnknownUser,
    InvalidEntryId,
    InvalidGeometry,
    MalformedBody,
    MalformedQuery,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::UnknownUser => "unknown_user",
            Self::InvalidEntryId => "invalid_entry_id",
            Self::InvalidGeometry => "invalid_geometry",
            Self::MalformedBody => "malformed_body",
            Self::MalformedQuery => "malformed_query",
        }
    }
}

fn field_details(field: &str, value: impl Into<String>, code: ValidationCode) -> serde_json::Value {
    json!({
        "field": field,
        "value": value.into(),
        "code": code.as_str(),
    })
}

/// Resolve the `{userId}` path segment; unknown users are not found.
pub(crate) fn parse_user_id(raw: &str) -> Result<UserId, Error> {
    raw.parse().map_err(|_| {
        Error::not_found(format!("user {raw} does not exist"))
            .with_details(field_details("userId", raw, ValidationCode::UnknownUser))
    })
}

/// Resolve the `{entryId}` path segment.
pub(crate) fn parse_entry_id(raw: &str) -> Result<WeightEntryId, Error> {
    WeightEntryId::new(raw).map_err(|error| {
        Error::invalid_request(error.to_string()).with_details(field_details(
            "entryId",
            raw,
            ValidationCode::InvalidEntryId,
        ))
    })
}

/// Optional plot dimensions for chart endpoints.
#[derive(Debug, Default, Clone, Copy, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ChartGeometryQuery {
    /// Total width; defaults to 300.
    pub width: Option<f64>,
    /// Total height; defaults to 150.
    pub height: Option<f64>,
    /// Padding on every side; defaults to 20.
    pub padding: Option<f64>,
}

impl ChartGeometryQuery {
    /// Merge over the default geometry and reject unusable dimensions.
    pub(crate) fn into_geometry(self) -> Result<ChartGeometry, Error> {
        let defaults = ChartGeometry::default();
        let geometry = ChartGeometry {
            width: self.width.unwrap_or(defaults.width),
            height: self.height.unwrap_or(defaults.height),
            padding: self.padding.unwrap_or(defaults.padding),
        };
        let checks = [
            ("width", geometry.width, geometry.width > 2.0 * geometry.padding),
            ("height", geometry.height, geometry.height > 2.0 * geometry.padding),
            ("padding", geometry.padding, geometry.padding >= 0.0),
        ];
        for (field, value, ok) in checks {
            if !value.is_finite() || !ok {
                return Err(Error::invalid_request(format!(
                    "{field} must be finite and leave room inside the padding"
                ))
                .with_details(field_details(
                    field,
                    value.to_string(),
                    ValidationCode::InvalidGeometry,
                )));
            }
        }
        Ok(geometry)
    }
}

/// Query extractor settings turning parse errors into `invalid_request`.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        Error::invalid_request(format!("malformed query string: {err}"))
            .with_details(json!({ "code": ValidationCode::MalformedQuery.as_str() }))
            .into()
    })
}

/// JSON extractor settings turning body errors into `invalid_request`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(4 * 1024)
        .error_handler(|err, _req| {
            Error::invalid_request(format!("malformed request body: {err}"))
                .with_details(json!({ "code": ValidationCode::MalformedBody.as_str() }))
                .into()
        })
}
