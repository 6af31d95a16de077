//! REST API module.
//!
//! Read-only list, detail and statistics endpoints over the record store.

mod dashboard;
mod datastore;
mod families;
mod members;
mod offerings;
mod prayers;

pub use dashboard::*;
pub use datastore::*;
pub use families::*;
pub use members::*;
pub use offerings::*;
pub use prayers::*;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::errors::AppError;
use crate::query::parse_iso_date;

/// Success response envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
    pub revision_id: i64,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: T, revision_id: i64) -> Self {
        Self {
            success: true,
            data,
            revision_id,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Response type that can be either success or error.
pub type ApiResult<T> = Result<ApiResponse<T>, crate::errors::AppErrorWithRevision>;

/// Create a successful API response.
pub fn success<T: Serialize>(data: T, revision_id: i64) -> ApiResult<T> {
    Ok(ApiResponse::new(data, revision_id))
}

/// Create an error API response.
pub fn error<T: Serialize>(err: AppError, revision_id: i64) -> ApiResult<T> {
    Err(err.with_revision(revision_id))
}

/// The reference date for derived fields: `as_of` when given, otherwise today.
fn resolve_today(as_of: Option<&str>) -> Result<NaiveDate, AppError> {
    match as_of.map(str::trim) {
        None | Some("") => Ok(Local::now().date_naive()),
        Some(raw) => parse_iso_date(raw)
            .ok_or_else(|| AppError::Validation(format!("Invalid as_of date: {:?}", raw))),
    }
}
