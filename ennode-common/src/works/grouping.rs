//! Project grouping engine
//!
//! The backend stores every gallery image as its own work. Images that belong
//! to the same building share a title up to a numeric suffix
//! ("Tropical House", "Tropical House-2", "Tropical House 3"). This module
//! folds those works back into projects, tags every image with an
//! [`ImageType`], and orders images and projects for the gallery.

use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

use super::aliases::TitleAliases;
use crate::models::WorkItem;

/// Semantic role of an image within its project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum ImageType {
    Hero,
    Aerial,
    Exterior,
    Interior,
    Detail,
    Concept,
}

impl ImageType {
    /// Gallery priority, lower sorts first
    pub fn priority(self) -> u8 {
        match self {
            ImageType::Hero => 1,
            ImageType::Aerial => 2,
            ImageType::Exterior => 3,
            ImageType::Interior => 4,
            ImageType::Detail => 5,
            ImageType::Concept => 6,
        }
    }
}

/// Exact (case-insensitive) tag names, checked in order
const TAG_RULES: &[(&str, ImageType)] = &[
    ("aerial", ImageType::Aerial),
    ("exterior", ImageType::Exterior),
    ("interior", ImageType::Interior),
];

/// Title substrings, checked in order after the tag rules
const TITLE_RULES: &[(&[&str], ImageType)] = &[
    (&["aerial", "bird"], ImageType::Aerial),
    (&["exterior", "outside", "facade"], ImageType::Exterior),
    (&["interior", "inside", "room"], ImageType::Interior),
    (&["detail", "close"], ImageType::Detail),
    (&["concept", "sketch"], ImageType::Concept),
];

/// One gallery image derived from a work
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ProjectImage {
    /// Source work slug
    pub id: String,
    pub url: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub image_type: ImageType,
    /// English tag names
    pub tags: Vec<String>,
}

/// A portfolio project: every work sharing one normalized title
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub title: String,
    pub description: String,
    pub images: Vec<ProjectImage>,
    pub total_images: usize,
}

/// Classify a work from its tags, falling back to its title
///
/// Tag matches always win over title matches; within each stage the first
/// matching rule wins. Works matching nothing are `Hero` images.
pub fn classify_image_type(work: &WorkItem) -> ImageType {
    let tags: Vec<String> = work
        .tags
        .iter()
        .map(|tag| tag.name.en.to_lowercase())
        .collect();

    for (name, image_type) in TAG_RULES {
        if tags.iter().any(|tag| tag == name) {
            return *image_type;
        }
    }

    let title = work.title.to_lowercase();
    for (needles, image_type) in TITLE_RULES {
        if needles.iter().any(|needle| title.contains(needle)) {
            return *image_type;
        }
    }

    ImageType::Hero
}

/// Remove one trailing `-<digits>` suffix
fn strip_hyphen_number(title: &str) -> &str {
    let without_digits = title.trim_end_matches(|c: char| c.is_ascii_digit());
    if without_digits.len() == title.len() {
        return title;
    }
    without_digits.strip_suffix('-').unwrap_or(title)
}

/// Remove one trailing `<whitespace><digits>` suffix
fn strip_spaced_number(title: &str) -> &str {
    let without_digits = title.trim_end_matches(|c: char| c.is_ascii_digit());
    if without_digits.len() == title.len() {
        return title;
    }
    let without_space = without_digits.trim_end();
    if without_space.len() == without_digits.len() {
        return title;
    }
    without_space
}

/// Canonical project title for a work title
///
/// Strips a single `-N` suffix, then a single ` N` suffix, trims, and maps
/// the result through the alias table. "Project-2-3" becomes "Project-2":
/// suffixes are not collapsed recursively.
pub fn normalize_project_title(title: &str, aliases: &TitleAliases) -> String {
    let stripped = strip_spaced_number(strip_hyphen_number(title)).trim();
    aliases.resolve(stripped).to_string()
}

/// Order works for display: videos first, then by image type priority
///
/// The sort is stable, so equal keys keep their input order.
fn sort_within_project(works: &mut [(&WorkItem, ImageType)]) {
    works.sort_by_key(|(work, image_type)| (!work.has_video(), image_type.priority()));
}

fn to_image(work: &WorkItem, image_type: ImageType) -> ProjectImage {
    ProjectImage {
        id: work.slug.clone(),
        url: work.image_url().to_string(),
        title: work.title.clone(),
        description: work.description.clone(),
        image_type,
        tags: work.english_tag_names(),
    }
}

/// Group works into projects using the built-in alias table
pub fn group_works(works: &[WorkItem]) -> Vec<Project> {
    group_works_by_project(works, TitleAliases::builtin())
}

/// Group works into ordered projects
///
/// Every work lands in exactly one project. Projects come back largest
/// first; projects of equal size keep the order their titles were first
/// seen in `works`.
pub fn group_works_by_project(works: &[WorkItem], aliases: &TitleAliases) -> Vec<Project> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<(&WorkItem, ImageType)>)> = Vec::new();

    for work in works {
        let title = normalize_project_title(&work.title, aliases);
        let entry = (work, classify_image_type(work));
        match index.get(&title) {
            Some(&slot) => groups[slot].1.push(entry),
            None => {
                index.insert(title.clone(), groups.len());
                groups.push((title, vec![entry]));
            }
        }
    }

    let mut projects: Vec<Project> = groups
        .into_iter()
        .map(|(title, mut members)| {
            sort_within_project(&mut members);
            let images: Vec<ProjectImage> = members
                .iter()
                .map(|(work, image_type)| to_image(work, *image_type))
                .collect();
            let description = images
                .first()
                .map(|image| image.description.clone())
                .unwrap_or_default();

            Project {
                title,
                description,
                total_images: images.len(),
                images,
            }
        })
        .collect();

    projects.sort_by_key(|project| Reverse(project.total_images));

    debug!(
        works = works.len(),
        projects = projects.len(),
        "Grouped works into projects"
    );

    projects
}

/// Distinct normalized titles, sorted, for search suggestions
pub fn project_title_suggestions(works: &[WorkItem], aliases: &TitleAliases) -> Vec<String> {
    works
        .iter()
        .map(|work| normalize_project_title(&work.title, aliases))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
