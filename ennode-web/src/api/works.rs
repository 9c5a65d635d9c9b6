//! Portfolio loaders
//!
//! The category page runs the full work pipeline: the backend narrows by
//! category, keyword, and tag, then the same keyword and tag filters are
//! applied locally before grouping so the gallery never shows a work the
//! query excludes.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use ennode_common::models::{Category, Tag, WorkItem};
use ennode_common::works::{
    filter_works_by_tag, group_works_by_project, project_title_suggestions, search_works, Project,
};
use ennode_common::Locale;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::SiteLocale;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

pub const IMAGE_CATEGORY: &str = "image";
pub const CINEMATIC_CATEGORY: &str = "cinematic";

/// Query parameters of the category page
#[derive(Debug, Default, Deserialize)]
pub struct WorksQuery {
    /// Free-text search
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub tag_id: String,
}

/// Path parameters of the category page
#[derive(Debug, Deserialize)]
pub struct CategoryPath {
    pub category: String,
}

/// Path parameters of a work detail page
#[derive(Debug, Deserialize)]
pub struct WorkPath {
    pub category: String,
    pub work: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorksIndexResponse {
    pub image_category: Option<Category>,
    pub cinematic_category: Option<Category>,
}

#[derive(Debug, Serialize)]
pub struct CategoryWorksResponse {
    pub locale: Locale,
    pub category: Category,
    pub projects: Vec<Project>,
    pub tags: Vec<Tag>,
    /// Distinct project titles for the search box
    pub suggestions: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct WorkDetailResponse {
    pub category: Category,
    pub work: WorkItem,
}

fn find_category(categories: Vec<Category>, slug: &str) -> Option<Category> {
    categories.into_iter().find(|category| category.slug == slug)
}

/// GET /api/[:locale/]works
pub async fn get_works_index(
    State(state): State<AppState>,
    SiteLocale(locale): SiteLocale,
) -> ApiResult<Json<WorksIndexResponse>> {
    let categories = state.client.get_categories(locale).await?;

    Ok(Json(WorksIndexResponse {
        image_category: find_category(categories.clone(), IMAGE_CATEGORY),
        cinematic_category: find_category(categories, CINEMATIC_CATEGORY),
    }))
}

/// GET /api/[:locale/]works/:category?q=&tag_id=
pub async fn get_works_by_category(
    State(state): State<AppState>,
    SiteLocale(locale): SiteLocale,
    Path(CategoryPath { category: slug }): Path<CategoryPath>,
    Query(query): Query<WorksQuery>,
) -> ApiResult<Json<CategoryWorksResponse>> {
    let categories = state.client.get_categories(locale).await?;
    let category = find_category(categories, &slug)
        .ok_or_else(|| ApiError::NotFound(format!("Category not found: {}", slug)))?;

    let (works, tags) = tokio::try_join!(
        state
            .client
            .get_works(locale, &category.slug, &query.q, &query.tag_id),
        state.client.get_tags(locale),
    )?;
    let fetched = works.len();

    let works = search_works(&works, &query.q);
    let works = filter_works_by_tag(&works, &query.tag_id);

    let aliases = &state.config.title_aliases;
    let projects = group_works_by_project(&works, aliases);
    let suggestions = project_title_suggestions(&works, aliases);

    debug!(
        locale = %locale,
        category = %category.slug,
        fetched,
        kept = works.len(),
        "Filtered works"
    );
    info!(
        category = %category.slug,
        projects = projects.len(),
        "Served category gallery"
    );

    Ok(Json(CategoryWorksResponse {
        locale,
        category,
        projects,
        tags,
        suggestions,
    }))
}

/// GET /api/[:locale/]works/:category/:work
///
/// Any failure along the way is a 404: the page either exists in full or not
/// at all.
pub async fn get_work_detail(
    State(state): State<AppState>,
    SiteLocale(locale): SiteLocale,
    Path(WorkPath {
        category: category_slug,
        work: work_slug,
    }): Path<WorkPath>,
) -> ApiResult<Json<WorkDetailResponse>> {
    let categories = state
        .client
        .get_categories(locale)
        .await
        .map_err(|e| ApiError::NotFound(format!("Categories unavailable: {}", e)))?;

    let category = find_category(categories, &category_slug)
        .ok_or_else(|| ApiError::NotFound(format!("Category not found: {}", category_slug)))?;

    let work = state
        .client
        .get_work(locale, &work_slug)
        .await
        .map_err(|e| ApiError::NotFound(format!("Work not found: {} ({})", work_slug, e)))?;

    Ok(Json(WorkDetailResponse { category, work }))
}
