//! Search and filter utilities over work lists
//!
//! All filters are pure and order-preserving, so they compose in any
//! sequence ahead of grouping. A blank criterion is a no-op, never an
//! empty result.

use crate::models::WorkItem;

/// Category slug that disables category filtering
pub const ALL_CATEGORIES: &str = "all";

/// Keep works whose title, description, or any tag name contains `query`
///
/// Matching is case-insensitive; tag names are checked in both locales.
pub fn search_works(works: &[WorkItem], query: &str) -> Vec<WorkItem> {
    let term = query.trim().to_lowercase();
    if term.is_empty() {
        return works.to_vec();
    }

    works
        .iter()
        .filter(|work| {
            work.title.to_lowercase().contains(&term)
                || work.description.to_lowercase().contains(&term)
                || work.tags.iter().any(|tag| {
                    tag.name.en.to_lowercase().contains(&term)
                        || tag.name.ko.to_lowercase().contains(&term)
                })
        })
        .cloned()
        .collect()
}

/// Keep works carrying a tag whose id matches `tag_id`
pub fn filter_works_by_tag(works: &[WorkItem], tag_id: &str) -> Vec<WorkItem> {
    if tag_id.is_empty() {
        return works.to_vec();
    }

    works
        .iter()
        .filter(|work| work.tags.iter().any(|tag| tag.id.to_string() == tag_id))
        .cloned()
        .collect()
}

/// Keep works in the category with `category_slug`
///
/// `None` and [`ALL_CATEGORIES`] keep everything.
pub fn filter_works_by_category(works: &[WorkItem], category_slug: Option<&str>) -> Vec<WorkItem> {
    match category_slug {
        None | Some(ALL_CATEGORIES) => works.to_vec(),
        Some(slug) => works
            .iter()
            .filter(|work| work.category_slug() == Some(slug))
            .cloned()
            .collect(),
    }
}
