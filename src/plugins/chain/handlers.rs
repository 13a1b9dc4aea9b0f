use axum::{Extension, Json};
use axum::extract::{Path, Query};
use std::sync::Arc;
use tracing::error;

use crate::feed::{Feed, FeedSnapshot};
use crate::http_error::AppError;
use crate::plugins::chain::client::{self, parse_address, StoryChain};
use crate::plugins::chain::models::{MintReceipt, MintRequest, ReportCountResponse, ReputationResponse};
use crate::plugins::shared::StoryRecord;

pub type StoryFeed = Feed<Vec<StoryRecord>>;

#[derive(Debug, serde::Deserialize)]
pub struct ListQuery {
    pub offset: Option<u64>,
    pub limit: Option<u64>,
}

pub async fn list_stories(
    Extension(chain): Extension<Arc<dyn StoryChain>>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<StoryRecord>>, AppError> {
    let records = client::list_all(chain.as_ref(), q.offset.unwrap_or(0), q.limit.unwrap_or(100))
        .await
        .map_err(|e| {
            error!("error listing on-chain stories: {}", e);
            AppError::from(e)
        })?;
    Ok(Json(records))
}

/// Refreshes the latest-wins feed and returns its snapshot. Overlapping
/// requests race safely: a stale completion never overwrites a newer one.
pub async fn feed_stories(
    Extension(chain): Extension<Arc<dyn StoryChain>>,
    Extension(feed): Extension<Arc<StoryFeed>>,
) -> Json<FeedSnapshot<Vec<StoryRecord>>> {
    let ticket = feed.begin();
    let result = client::list_all(chain.as_ref(), 0, 100).await;
    feed.complete(ticket, result.map_err(|e| e.to_string()));
    Json(feed.snapshot())
}

pub async fn get_story(
    Extension(chain): Extension<Arc<dyn StoryChain>>,
    Path(token_id): Path<u64>,
) -> Result<Json<StoryRecord>, AppError> {
    let story = chain.story_by_token(token_id).await?;
    Ok(Json(crate::plugins::shared::StorySource::Chain(story).into_record()))
}

pub async fn get_report_count(
    Extension(chain): Extension<Arc<dyn StoryChain>>,
    Path(token_id): Path<u64>,
) -> Result<Json<ReportCountResponse>, AppError> {
    let report_count = chain.report_count(token_id).await?;
    Ok(Json(ReportCountResponse { token_id, report_count }))
}

pub async fn mint_story(
    Extension(chain): Extension<Arc<dyn StoryChain>>,
    Json(req): Json<MintRequest>,
) -> Result<Json<MintReceipt>, AppError> {
    if req.cid.trim().is_empty() || req.title.trim().is_empty() {
        return Err(AppError::bad_request("CID and title are required"));
    }
    let receipt = chain.mint(&req).await.map_err(|e| {
        error!("mint failed: {}", e);
        AppError::from(e)
    })?;
    Ok(Json(receipt))
}

pub async fn get_reputation(
    Extension(chain): Extension<Arc<dyn StoryChain>>,
    Path(address): Path<String>,
) -> Result<Json<ReputationResponse>, AppError> {
    let parsed = parse_address(&address)?;
    let reputation = chain.reputation(parsed).await?;
    Ok(Json(ReputationResponse {
        address: ethers::utils::to_checksum(&parsed, None),
        reputation,
    }))
}
