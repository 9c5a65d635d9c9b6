//! Project title alias table
//!
//! Maps known misspellings and variants of project titles to their canonical
//! form. The built-in table covers the titles the backend is known to carry;
//! deployments can extend or replace it from TOML without a code change.
//!
//! TOML shape (either inside the site config or in a standalone file):
//!
//! ```toml
//! [title_aliases]
//! "Dongdeamun Design Plaza" = "Dongdaemun Design Plaza"
//! ```

use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::{Error, Result};

/// Built-in alias entries (variant, canonical)
const BUILTIN_ALIASES: &[(&str, &str)] = &[
    ("Dongdeamun Design Plaza", "Dongdaemun Design Plaza"),
    ("Complex apartment", "Complex Apartment"),
    ("Osan apartment", "Osan Apartment"),
];

static BUILTIN: Lazy<TitleAliases> = Lazy::new(|| {
    TitleAliases::from_pairs(
        BUILTIN_ALIASES
            .iter()
            .map(|(variant, canonical)| (variant.to_string(), canonical.to_string())),
    )
});

#[derive(Debug, Deserialize)]
struct AliasFile {
    #[serde(default)]
    title_aliases: HashMap<String, String>,
}

/// Lookup table from title variant to canonical project title
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleAliases {
    entries: HashMap<String, String>,
}

impl TitleAliases {
    /// Empty table: every title passes through unchanged
    pub fn empty() -> Self {
        Self::default()
    }

    /// The compiled-in table
    pub fn builtin() -> &'static TitleAliases {
        &BUILTIN
    }

    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self {
            entries: pairs.into_iter().collect(),
        }
    }

    /// Parse the `[title_aliases]` table of a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: AliasFile = toml::from_str(content)?;
        Ok(Self {
            entries: file.title_aliases,
        })
    }

    /// Load the `[title_aliases]` table from a TOML file
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read alias table {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Add entries from `other`, overriding existing variants
    pub fn extend(&mut self, other: TitleAliases) {
        self.entries.extend(other.entries);
    }

    /// Canonical title for `title`, or `title` itself when no alias exists
    pub fn resolve<'a>(&'a self, title: &'a str) -> &'a str {
        self.entries.get(title).map(String::as_str).unwrap_or(title)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
