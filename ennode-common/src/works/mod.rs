//! Portfolio work pipeline
//!
//! backend works → [`search_works`] → [`filter_works_by_tag`] →
//! [`group_works_by_project`] → ordered projects for the gallery.

pub mod aliases;
pub mod filters;
pub mod grouping;

pub use aliases::TitleAliases;
pub use filters::{filter_works_by_category, filter_works_by_tag, search_works, ALL_CATEGORIES};
pub use grouping::{
    classify_image_type, group_works, group_works_by_project, normalize_project_title,
    project_title_suggestions, ImageType, Project, ProjectImage,
};
