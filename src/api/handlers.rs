use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::core::ReelError;
use crate::service::{CreateResponse, DropResponse, ReelService};

use super::error::ApiError;

pub async fn health() -> &'static str {
    "OK"
}

pub async fn create_db(
    State(service): State<Arc<ReelService>>,
) -> Result<Json<CreateResponse>, ApiError> {
    Ok(Json(service.create().await?))
}

pub async fn drop_db(
    State(service): State<Arc<ReelService>>,
) -> Result<Json<DropResponse>, ApiError> {
    Ok(Json(service.drop_table().await?))
}

#[derive(Debug, Deserialize)]
pub struct MovieQuery {
    pub year: Option<String>,
    pub title: Option<String>,
}

impl MovieQuery {
    /// Both parameters present and non-empty, or nothing.
    fn required(&self) -> Option<(&str, &str)> {
        match (self.year.as_deref(), self.title.as_deref()) {
            (Some(year), Some(title)) if !year.is_empty() && !title.is_empty() => {
                Some((year, title))
            }
            _ => None,
        }
    }
}

pub async fn query_movies(
    State(service): State<Arc<ReelService>>,
    Query(params): Query<MovieQuery>,
) -> Result<Response, ApiError> {
    let Some((year, title)) = params.required() else {
        return Ok(StatusCode::NOT_FOUND.into_response());
    };
    let year: i64 = year.trim().parse().map_err(|_| {
        ReelError::InvalidRequest(format!("year must be an integer, got {year:?}"))
    })?;

    let movies = service.query(year, title).await?;
    Ok(Json(movies).into_response())
}
