//! # Records Handler
//!
//! Reads a record from Postgres. With the database down this is where
//! connectivity errors come from; with it up, a failing statement produces
//! an execution error carrying its SQL.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::models::{AppState, RawError};

const SELECT_RECORD: &str = "SELECT id, title FROM records WHERE id = $1";

/// A stored record
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct Record {
    pub id: i64,
    pub title: String,
}

/// Fetches one record by id.
///
/// GET /api/records/{id}
///
/// # Returns
///
/// - `200 OK` with [`Record`]
/// - `400 Bad Request` - The id is not an integer
/// - `404 Not Found` - No such record
/// - `500 Internal Server Error` - Database unreachable or statement failed
#[instrument(skip_all, fields(id))]
pub async fn get_record(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Record>, RawError> {
    let Path(id) = id.map_err(|rejection| {
        warn!(error = %rejection, "Rejected record id");
        RawError::new(rejection.body_text()).with_status(rejection.status().as_u16())
    })?;
    tracing::Span::current().record("id", id);
    debug!("Fetching record");

    let record = sqlx::query_as::<_, Record>(SELECT_RECORD)
        .bind(id)
        .fetch_optional(&state.db_pool)
        .await
        .map_err(|e| RawError::from_query(e, SELECT_RECORD))?;

    match record {
        Some(record) => Ok(Json(record)),
        None => Err(RawError::new(format!("record {id} not found")).with_status(404)),
    }
}
