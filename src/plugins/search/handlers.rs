use axum::Json;
use axum::extract::{Path, Query};
use axum::http::StatusCode;

use crate::http_error::AppError;
use crate::plugins::search::catalog::{
    search, stories_by_category, story_by_id, MockStory, CATEGORIES, STORIES,
};

#[derive(Debug, serde::Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

pub async fn search_stories(Query(query): Query<SearchQuery>) -> Json<Vec<MockStory>> {
    let q = query.q.unwrap_or_default();
    Json(search(&STORIES, &q))
}

pub async fn list_categories() -> Json<Vec<&'static str>> {
    Json(CATEGORIES.to_vec())
}

pub async fn list_category_stories(Path(name): Path<String>) -> Json<Vec<MockStory>> {
    Json(stories_by_category(&name).into_iter().copied().collect())
}

pub async fn get_catalog_story(Path(id): Path<String>) -> Result<Json<MockStory>, AppError> {
    story_by_id(&id)
        .copied()
        .map(Json)
        .ok_or_else(|| AppError::new(StatusCode::NOT_FOUND, "notFound").with_code("not_found"))
}
