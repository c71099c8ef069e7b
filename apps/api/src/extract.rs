//! Extractors that report malformed requests as `AppError` with the standard
//! JSON error body instead of Axum's default plain-text rejections.

use axum::extract::{FromRequest, FromRequestParts};

use crate::errors::AppError;

/// `Json<T>` whose rejection carries the standard error body.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// `Path<T>` whose rejection is a 400 with the standard error body.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

/// `Query<T>` whose rejection is a 400 with the standard error body.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);

/// Record ids arrive as raw path segments. Anything that is not a decimal
/// integer names no record, so callers treat it like an unknown id.
pub fn record_id(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}
