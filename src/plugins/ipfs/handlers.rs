use axum::{Extension, Json};
use axum::extract::Query;
use std::sync::Arc;
use tracing::{error, info};

use crate::http_error::AppError;
use crate::plugins::ipfs::models::{FetchResponse, StorySubmission, UploadResponse};
use crate::plugins::ipfs::pinata::PinataClient;

#[derive(Debug, serde::Deserialize)]
pub struct FetchQuery {
    pub cid: Option<String>,
}

fn is_blank(field: &Option<String>) -> bool {
    field.as_deref().map(str::trim).unwrap_or("").is_empty()
}

pub async fn upload_story(
    Extension(client): Extension<Arc<PinataClient>>,
    Json(submission): Json<StorySubmission>,
) -> Result<Json<UploadResponse>, AppError> {
    if is_blank(&submission.title) || is_blank(&submission.content) {
        return Err(AppError::bad_request("Title and content are required"));
    }

    info!(title = submission.title.as_deref(), "uploading story to IPFS");
    let pinned = client.upload_json(&submission).await.map_err(|e| {
        error!("IPFS upload error: {}", e);
        AppError::from(e)
    })?;
    info!(cid = %pinned.cid, "IPFS upload successful");

    Ok(Json(UploadResponse {
        success: true,
        cid: pinned.cid,
        pinata_url: pinned.gateway_url,
        timestamp: chrono::Utc::now(),
        message: "Story successfully uploaded to IPFS".to_string(),
    }))
}

pub async fn fetch_story(
    Extension(client): Extension<Arc<PinataClient>>,
    Query(query): Query<FetchQuery>,
) -> Result<Json<FetchResponse>, AppError> {
    let cid = match query.cid.as_deref().map(str::trim) {
        Some(cid) if !cid.is_empty() => cid.to_string(),
        _ => return Err(AppError::bad_request("CID parameter is required")),
    };

    info!(cid = %cid, "fetching story from IPFS");
    let data = client.fetch_json(&cid).await.map_err(|e| {
        error!("IPFS fetch error: {}", e);
        AppError::from(e)
    })?;

    Ok(Json(FetchResponse {
        success: true,
        data,
        cid,
        fetched_at: chrono::Utc::now(),
    }))
}
