//! News loaders

use axum::{
    extract::{Path, Query, State},
    Json,
};
use ennode_common::models::{News, PaginatedCollection};
use serde::{Deserialize, Serialize};

use super::SiteLocale;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Query parameters for the news list
#[derive(Debug, Deserialize)]
pub struct NewsQuery {
    #[serde(default)]
    pub q: String,

    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    pub page: u32,
}

fn default_page() -> u32 {
    1
}

/// Path parameters of a news post
#[derive(Debug, Deserialize)]
pub struct NewsPath {
    pub slug: String,
}

#[derive(Debug, Serialize)]
pub struct NewsDetailResponse {
    pub news: News,
}

/// GET /api/[:locale/]news?q=&page=
pub async fn get_news_list(
    State(state): State<AppState>,
    SiteLocale(locale): SiteLocale,
    Query(query): Query<NewsQuery>,
) -> ApiResult<Json<PaginatedCollection<News>>> {
    let page = query.page.max(1);

    let news = state.client.get_news_list(locale, &query.q, page).await?;
    Ok(Json(news))
}

/// GET /api/[:locale/]news/:slug
pub async fn get_news(
    State(state): State<AppState>,
    SiteLocale(locale): SiteLocale,
    Path(NewsPath { slug }): Path<NewsPath>,
) -> ApiResult<Json<NewsDetailResponse>> {
    let news = state
        .client
        .get_news(locale, &slug)
        .await
        .map_err(|e| ApiError::NotFound(format!("News not found: {} ({})", slug, e)))?;

    Ok(Json(NewsDetailResponse { news }))
}
