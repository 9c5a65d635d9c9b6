//! Backend REST client
//!
//! Thin typed wrapper over the public content API. Every call is a single
//! round trip: no retries, no caching. Failures are classified by HTTP
//! status so call sites can turn them into page-level errors.

use ennode_common::config::SiteConfig;
use ennode_common::models::{
    Banner, Category, Client, Employee, News, PaginatedCollection, Platform, Resource,
    ResourceCollection, Tag, WorkItem,
};
use ennode_common::Locale;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Backend client errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// 422: request rejected with per-field messages
    #[error("Validation failed: {message}")]
    Validation {
        message: String,
        errors: HashMap<String, Vec<String>>,
    },

    /// 429
    #[error("Too many requests: {0}")]
    RateLimited(String),

    /// 500
    #[error("Backend server error: {0}")]
    Server(String),

    /// Any other non-success status
    #[error("API error {0}: {1}")]
    Status(u16, String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Recognized failure classes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    RateLimited,
    ServerError,
    Unclassified,
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Validation { .. } => ErrorKind::Validation,
            ClientError::RateLimited(_) => ErrorKind::RateLimited,
            ClientError::Server(_) => ErrorKind::ServerError,
            _ => ErrorKind::Unclassified,
        }
    }

    /// HTTP status returned by the backend, if the request got that far
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Validation { .. } => Some(422),
            ClientError::RateLimited(_) => Some(429),
            ClientError::Server(_) => Some(500),
            ClientError::Status(status, _) => Some(*status),
            ClientError::Network(_) | ClientError::Parse(_) => None,
        }
    }
}

/// Error body shape used by the backend
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    errors: HashMap<String, Vec<String>>,
}

/// Contact form payload forwarded to the mail endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company_name: String,
    pub discuss: String,
    pub debug_id: String,
}

/// Public content API client
#[derive(Debug, Clone)]
pub struct ApiClient {
    http_client: reqwest::Client,
    base: Url,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let base = Url::parse(base_url)
            .map_err(|e| ClientError::Parse(format!("Invalid base URL {}: {}", base_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(ClientError::Parse(format!("Invalid base URL {}", base_url)));
        }

        Ok(Self { http_client, base })
    }

    pub fn from_config(config: &SiteConfig) -> Result<Self, ClientError> {
        Self::new(&config.base_api_url, config.request_timeout)
    }

    pub fn base_url(&self) -> &str {
        self.base.as_str().trim_end_matches('/')
    }

    /// Backend URL for a path given as segments
    ///
    /// Each segment is percent-encoded on its own, so a slug containing `/`
    /// or `..` stays a single segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::Parse(format!("Base URL cannot take a path: {}", self.base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Turn a non-success response into a classified error
    async fn classify(response: reqwest::Response) -> ClientError {
        let status = response.status().as_u16();
        let text = response.text().await.unwrap_or_default();
        let body: ErrorBody = serde_json::from_str(&text).unwrap_or_default();

        match status {
            422 => ClientError::Validation {
                message: body.message,
                errors: body.errors,
            },
            429 => ClientError::RateLimited(body.message),
            500 => ClientError::Server(body.message),
            _ if body.message.is_empty() => ClientError::Status(status, text),
            _ => ClientError::Status(status, body.message),
        }
    }

    async fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        locale: Locale,
        query: &[(&str, String)],
    ) -> Result<T, ClientError> {
        let url = self.endpoint(segments)?;
        debug!(url = %url, locale = %locale, "GET backend resource");

        let response = self
            .http_client
            .get(url)
            .header(ACCEPT_LANGUAGE, locale.as_str())
            .query(query)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::classify(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))
    }

    /// Read a mutation response body; empty bodies become `null`
    async fn read_body(response: reqwest::Response) -> Result<Value, ClientError> {
        if !response.status().is_success() {
            return Err(Self::classify(response).await);
        }

        let text = response
            .text()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
    }

    pub async fn get_banners(&self, locale: Locale) -> Result<Vec<Banner>, ClientError> {
        let collection: ResourceCollection<Banner> = self
            .get(&["public", "attachments"], locale, &[("group", "banner".to_string())])
            .await?;
        Ok(collection.data)
    }

    pub async fn get_clients(&self, locale: Locale) -> Result<Vec<Client>, ClientError> {
        let collection: ResourceCollection<Client> =
            self.get(&["public", "clients"], locale, &[]).await?;
        Ok(collection.data)
    }

    /// Works in a category, narrowed server-side by keyword and tag
    pub async fn get_works(
        &self,
        locale: Locale,
        slug_category: &str,
        keywords: &str,
        tag_id: &str,
    ) -> Result<Vec<WorkItem>, ClientError> {
        let collection: ResourceCollection<WorkItem> = self
            .get(
                &["public", "works"],
                locale,
                &[
                    ("slug_category", slug_category.to_string()),
                    ("keywords", keywords.to_string()),
                    ("tag_id", tag_id.to_string()),
                ],
            )
            .await?;
        Ok(collection.data)
    }

    pub async fn get_work(&self, locale: Locale, slug: &str) -> Result<WorkItem, ClientError> {
        let resource: Resource<WorkItem> = self
            .get(&["public", "works", slug], locale, &[])
            .await?;
        Ok(resource.data)
    }

    pub async fn get_categories(&self, locale: Locale) -> Result<Vec<Category>, ClientError> {
        let collection: ResourceCollection<Category> =
            self.get(&["public", "categories"], locale, &[]).await?;
        Ok(collection.data)
    }

    pub async fn get_employees(&self, locale: Locale) -> Result<Vec<Employee>, ClientError> {
        let collection: ResourceCollection<Employee> =
            self.get(&["public", "employees"], locale, &[]).await?;
        Ok(collection.data)
    }

    pub async fn get_tags(&self, locale: Locale) -> Result<Vec<Tag>, ClientError> {
        let collection: ResourceCollection<Tag> =
            self.get(&["public", "tags"], locale, &[]).await?;
        Ok(collection.data)
    }

    pub async fn get_news_list(
        &self,
        locale: Locale,
        keywords: &str,
        page: u32,
    ) -> Result<PaginatedCollection<News>, ClientError> {
        self.get(
            &["public", "posts"],
            locale,
            &[("keywords", keywords.to_string()), ("page", page.to_string())],
        )
        .await
    }

    pub async fn get_news(&self, locale: Locale, slug: &str) -> Result<News, ClientError> {
        let resource: Resource<News> = self
            .get(&["public", "posts", slug], locale, &[])
            .await?;
        Ok(resource.data)
    }

    pub async fn get_platforms(&self, locale: Locale) -> Result<Vec<Platform>, ClientError> {
        let collection: ResourceCollection<Platform> =
            self.get(&["public", "platforms"], locale, &[]).await?;
        Ok(collection.data)
    }

    pub async fn send_contact(
        &self,
        message: &ContactMessage,
        locale: Locale,
    ) -> Result<Value, ClientError> {
        let response = self
            .http_client
            .post(self.endpoint(&["public", "mails", "send-contact"])?)
            .header(ACCEPT_LANGUAGE, locale.as_str())
            .json(message)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Self::read_body(response).await
    }

    pub async fn send_cv(
        &self,
        form: reqwest::multipart::Form,
        locale: Locale,
    ) -> Result<Value, ClientError> {
        let response = self
            .http_client
            .post(self.endpoint(&["public", "mails", "send-cv"])?)
            .header(ACCEPT_LANGUAGE, locale.as_str())
            .multipart(form)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Self::read_body(response).await
    }
}
