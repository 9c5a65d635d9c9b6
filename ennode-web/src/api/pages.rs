//! Layout, home, about, and platform loaders

use axum::{extract::State, Json};
use ennode_common::models::{Banner, Client, Employee, News, Platform};
use ennode_common::Locale;
use serde::Serialize;
use tracing::warn;

use super::SiteLocale;
use crate::error::ApiResult;
use crate::AppState;

/// Number of news posts teased on the home page
pub const HOME_NEWS_COUNT: usize = 4;

/// Brand asset shown in the header
#[derive(Debug, Clone, Serialize)]
pub struct Brand {
    pub url: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BrandResource {
    pub data: Brand,
}

/// Static site configuration served with the layout
#[derive(Debug, Clone, Serialize)]
pub struct SiteConfiguration {
    pub brand: BrandResource,
}

impl Default for SiteConfiguration {
    fn default() -> Self {
        Self {
            brand: BrandResource {
                data: Brand {
                    url: "/favicon-dark.png".to_string(),
                    description: "Visual Ennode".to_string(),
                },
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LayoutResponse {
    pub locale: Locale,
    pub configuration: SiteConfiguration,
    pub banners: Vec<Banner>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeResponse {
    pub clients: Vec<Client>,
    pub news_list: Vec<News>,
    pub news_count: u64,
}

#[derive(Debug, Serialize)]
pub struct AboutResponse {
    pub clients: Vec<Client>,
    pub teams: Vec<Employee>,
}

#[derive(Debug, Serialize)]
pub struct PlatformsResponse {
    pub data: Vec<Platform>,
}

/// GET /api/[:locale/]layout
///
/// Data shared by every page. A banner outage degrades to no banners rather
/// than failing the whole site.
pub async fn get_layout(
    State(state): State<AppState>,
    SiteLocale(locale): SiteLocale,
) -> ApiResult<Json<LayoutResponse>> {
    let banners = match state.client.get_banners(locale).await {
        Ok(banners) => banners,
        Err(e) => {
            warn!(
                locale = %locale,
                error = %e,
                "Banner fetch failed, serving layout without banners"
            );
            Vec::new()
        }
    };

    Ok(Json(LayoutResponse {
        locale,
        configuration: SiteConfiguration::default(),
        banners,
    }))
}

/// GET /api/[:locale/]home
pub async fn get_home(
    State(state): State<AppState>,
    SiteLocale(locale): SiteLocale,
) -> ApiResult<Json<HomeResponse>> {
    let (clients, news) = tokio::try_join!(
        state.client.get_clients(locale),
        state.client.get_news_list(locale, "", 1),
    )?;

    let news_count = news.meta.total;
    let news_list = news.data.into_iter().take(HOME_NEWS_COUNT).collect();

    Ok(Json(HomeResponse {
        clients,
        news_list,
        news_count,
    }))
}

/// GET /api/[:locale/]about
pub async fn get_about(
    State(state): State<AppState>,
    SiteLocale(locale): SiteLocale,
) -> ApiResult<Json<AboutResponse>> {
    let (clients, teams) = tokio::try_join!(
        state.client.get_clients(locale),
        state.client.get_employees(locale),
    )?;

    Ok(Json(AboutResponse { clients, teams }))
}

/// GET /api/[:locale/]platforms
pub async fn get_platforms(
    State(state): State<AppState>,
    SiteLocale(locale): SiteLocale,
) -> ApiResult<Json<PlatformsResponse>> {
    let data = state.client.get_platforms(locale).await?;
    Ok(Json(PlatformsResponse { data }))
}
