//! Backend resource models
//!
//! Shapes returned by the public REST backend. Deserialization is lenient:
//! a missing or `null` collection becomes empty and a missing or `null`
//! string becomes `""`, so partial records never abort a page render.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Deserialize `null` as the type's default value
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserialize a record id sent as a number, a numeric string, or `null`
///
/// Anything that is not a whole number becomes 0.
fn lenient_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(i64),
        Text(String),
        Other(Value),
    }

    Ok(match Option::<RawId>::deserialize(deserializer)? {
        Some(RawId::Number(id)) => id,
        Some(RawId::Text(text)) => text.trim().parse().unwrap_or_default(),
        Some(RawId::Other(_)) | None => 0,
    })
}

// ========================================
// Envelopes
// ========================================

/// Single-resource envelope: `{ "data": T }`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Resource<T> {
    pub data: T,
}

/// Collection envelope: `{ "data": [T] }`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResourceCollection<T> {
    #[serde(default)]
    pub data: Vec<T>,
}

/// Pagination metadata attached to paginated collections
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PaginationMeta {
    #[serde(default)]
    pub total: u64,
}

/// Paginated collection envelope: `{ "data": [T], "meta": { "total": n } }`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PaginatedCollection<T> {
    #[serde(default)]
    pub data: Vec<T>,
    #[serde(default)]
    pub meta: PaginationMeta,
}

// ========================================
// Portfolio
// ========================================

/// Text carried in both site languages
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct LocalizedText {
    #[serde(default, deserialize_with = "null_as_default")]
    pub en: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ko: String,
}

/// Work tag
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Tag {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: LocalizedText,
}

/// Work category (e.g. `image`, `cinematic`)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Category {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: LocalizedText,
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
}

/// One media asset of a portfolio project
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct WorkItem {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<Tag>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub attachment_url: String,
    #[serde(default)]
    pub optimize_attachment_url: Option<String>,
    #[serde(default)]
    pub link_video: Option<String>,
    #[serde(default)]
    pub video_link: Option<String>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub published_at: Option<String>,
}

impl WorkItem {
    /// Whether the work is shown as a video
    ///
    /// Only a non-empty `link_video` counts; `video_link` is carried through
    /// for the detail page but does not move a work in the gallery.
    pub fn has_video(&self) -> bool {
        self.link_video
            .as_deref()
            .is_some_and(|link| !link.is_empty())
    }

    /// Display URL, preferring the optimized rendition
    pub fn image_url(&self) -> &str {
        match self.optimize_attachment_url.as_deref() {
            Some(url) if !url.is_empty() => url,
            _ => &self.attachment_url,
        }
    }

    /// Slug of the owning category, if the work carries one
    pub fn category_slug(&self) -> Option<&str> {
        self.category.as_ref().map(|c| c.slug.as_str())
    }

    /// English tag names in backend order
    pub fn english_tag_names(&self) -> Vec<String> {
        self.tags.iter().map(|tag| tag.name.en.clone()).collect()
    }
}

// ========================================
// Pass-through resources
// ========================================

/// Client logo entry
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Client {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: i64,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Team member
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Employee {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: i64,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// News post
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct News {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Publishing platform link
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Platform {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: i64,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Hero banner attachment
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Banner {
    #[serde(default, deserialize_with = "null_as_default")]
    pub group: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_work_tolerates_missing_and_null_fields() {
        let work: WorkItem = serde_json::from_value(json!({
            "title": "S-Factory",
            "description": null,
            "tags": null,
            "slug": "s-factory"
        }))
        .unwrap();

        assert_eq!(work.title, "S-Factory");
        assert_eq!(work.description, "");
        assert!(work.tags.is_empty());
        assert_eq!(work.attachment_url, "");
        assert!(work.category.is_none());
    }

    #[test]
    fn test_has_video_reads_link_video_only() {
        let film = WorkItem {
            link_video: Some("https://vimeo.com/1".to_string()),
            ..Default::default()
        };
        assert!(film.has_video());

        let alternate_only = WorkItem {
            link_video: Some(String::new()),
            video_link: Some("https://vimeo.com/1".to_string()),
            ..Default::default()
        };
        assert!(!alternate_only.has_video());

        assert!(!WorkItem::default().has_video());
    }

    #[test]
    fn test_null_ids_do_not_fail_collection() {
        let works: ResourceCollection<WorkItem> = serde_json::from_value(json!({
            "data": [
                {
                    "id": 1,
                    "title": "Tropical House",
                    "tags": [{ "id": 3, "name": { "en": "Aerial" } }]
                },
                {
                    "id": null,
                    "title": "Tropical House-2",
                    "tags": [{ "id": null, "name": { "en": "Interior", "ko": null } }],
                    "category": { "id": null, "slug": "image" }
                }
            ]
        }))
        .unwrap();

        assert_eq!(works.data.len(), 2);
        assert_eq!(works.data[1].id, 0);
        assert_eq!(works.data[1].tags[0].id, 0);
        assert_eq!(works.data[1].tags[0].name.en, "Interior");
        assert_eq!(works.data[1].category_slug(), Some("image"));
    }

    #[test]
    fn test_string_ids_are_accepted() {
        let tag: Tag =
            serde_json::from_value(json!({ "id": "12", "name": { "en": "Night" } })).unwrap();
        assert_eq!(tag.id, 12);

        let tag: Tag = serde_json::from_value(json!({ "id": "n/a", "name": null })).unwrap();
        assert_eq!(tag.id, 0);

        let clients: ResourceCollection<Client> = serde_json::from_value(json!({
            "data": [{ "id": null, "name": "Samsung C&T" }, { "id": "4", "name": "Hyundai" }]
        }))
        .unwrap();
        assert_eq!(clients.data[0].id, 0);
        assert_eq!(clients.data[1].id, 4);
        assert_eq!(clients.data[1].fields["name"], "Hyundai");
    }

    #[test]
    fn test_image_url_prefers_optimized() {
        let mut work = WorkItem {
            attachment_url: "https://cdn/full.jpg".to_string(),
            optimize_attachment_url: Some("https://cdn/small.webp".to_string()),
            ..Default::default()
        };
        assert_eq!(work.image_url(), "https://cdn/small.webp");

        work.optimize_attachment_url = Some(String::new());
        assert_eq!(work.image_url(), "https://cdn/full.jpg");

        work.optimize_attachment_url = None;
        assert_eq!(work.image_url(), "https://cdn/full.jpg");
    }

    #[test]
    fn test_paginated_collection_keeps_total() {
        let page: PaginatedCollection<News> = serde_json::from_value(json!({
            "data": [{ "id": 7, "slug": "opening", "title": "Studio opening" }],
            "meta": { "total": 12, "per_page": 10 }
        }))
        .unwrap();

        assert_eq!(page.meta.total, 12);
        assert_eq!(page.data[0].slug, "opening");
        assert_eq!(page.data[0].fields["title"], "Studio opening");
    }
}
