//! Handlers for `/api/data`.
//!
//! Neither handler reads or writes anything. GET ignores its query string;
//! POST checks that the body is JSON and then discards it.

use axum::{body::Bytes, extract::RawQuery, Json};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::ApiError;

pub const READY_MESSAGE: &str = "API endpoint ready for integration";
pub const UPDATED_MESSAGE: &str = "Data updated successfully";

/// Response envelope shared by every `/api/data` answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<serde_json::Value>>,
    pub message: String,
}

/// GET /api/data?type=<string> - always an empty, successful data set
pub async fn get_data(RawQuery(query): RawQuery) -> Json<Envelope> {
    debug!(query = query.as_deref().unwrap_or(""), "GET /api/data");
    Json(Envelope {
        success: true,
        data: Some(Vec::new()),
        message: READY_MESSAGE.to_string(),
    })
}

/// POST /api/data - acknowledges any well-formed JSON body without using it
pub async fn post_data(body: Bytes) -> Result<Json<Envelope>, ApiError> {
    let _: serde_json::Value = serde_json::from_slice(&body)?;
    debug!(bytes = body.len(), "POST /api/data");
    Ok(Json(Envelope {
        success: true,
        data: None,
        message: UPDATED_MESSAGE.to_string(),
    }))
}
