//! HTTP API handlers for ennode-web
//!
//! One handler per site page loader, plus the two form actions. Every route
//! is mounted twice: under `/api/{locale}` and under bare `/api`, where the
//! configured default locale applies.

pub mod forms;
pub mod health;
pub mod news;
pub mod pages;
pub mod works;

pub use forms::{send_contact, send_cv};
pub use health::health_routes;
pub use news::{get_news, get_news_list};
pub use pages::{get_about, get_home, get_layout, get_platforms};
pub use works::{get_work_detail, get_works_by_category, get_works_index};

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use ennode_common::Locale;
use std::collections::HashMap;

use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Locale of the request
///
/// Taken from the `:locale` path segment when the route has one, otherwise
/// the configured default. A segment naming an unsupported locale is a 404.
#[derive(Debug, Clone, Copy)]
pub struct SiteLocale(pub Locale);

#[async_trait]
impl FromRequestParts<AppState> for SiteLocale {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let params = Option::<Path<HashMap<String, String>>>::from_request_parts(parts, state)
            .await
            .unwrap_or(None);

        match params.as_ref().and_then(|Path(params)| params.get("locale")) {
            Some(segment) => site_locale(segment).map(SiteLocale),
            None => Ok(SiteLocale(state.config.default_locale)),
        }
    }
}

/// Parse a locale path segment; unsupported locales are 404s
pub(crate) fn site_locale(segment: &str) -> ApiResult<Locale> {
    segment
        .parse()
        .map_err(|_| ApiError::NotFound(format!("Unknown locale: {}", segment)))
}
