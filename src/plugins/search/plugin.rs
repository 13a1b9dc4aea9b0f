use axum::{Router, routing::get};

use crate::kernel::Plugin;
use crate::plugins::search::handlers::*;

pub struct SearchPlugin;

#[async_trait::async_trait]
impl Plugin for SearchPlugin {
    async fn router(&self) -> Router {
        Router::new()
            .route("/", get(search_stories))
            .route("/categories", get(list_categories))
            .route("/category/:name", get(list_category_stories))
            .route("/story/:id", get(get_catalog_story))
    }

    fn name(&self) -> &'static str {
        "api/search"
    }
}
