//! Header theme state
//!
//! The site header switches between a light and a dark variant depending on
//! which page section sits under it. Section observers report visibility
//! changes as [`SectionVisibility`] events; one [`HeaderThemeController`]
//! owns the current variant and publishes changes to subscribers.

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::debug;

/// Header color scheme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderVariant {
    #[default]
    Light,
    Dark,
}

/// Visibility change reported by a section observer
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SectionVisibility {
    /// Stable section identifier (e.g. `"hero"`, `"clients"`)
    pub section: String,
    /// Variant the header should take while this section is under it
    pub variant: HeaderVariant,
    pub visible: bool,
}

/// Single owner of the header variant
///
/// The most recently visible section decides the variant; when no reporting
/// section is visible the controller falls back to its default.
#[derive(Debug)]
pub struct HeaderThemeController {
    default: HeaderVariant,
    /// Visible sections in activation order
    visible: Vec<(String, HeaderVariant)>,
    tx: watch::Sender<HeaderVariant>,
}

impl HeaderThemeController {
    pub fn new(default: HeaderVariant) -> Self {
        let (tx, _) = watch::channel(default);
        Self {
            default,
            visible: Vec::new(),
            tx,
        }
    }

    /// Receive the current variant and every later change
    pub fn subscribe(&self) -> watch::Receiver<HeaderVariant> {
        self.tx.subscribe()
    }

    pub fn current(&self) -> HeaderVariant {
        *self.tx.borrow()
    }

    /// Apply one observer event and return the resulting variant
    pub fn apply(&mut self, event: SectionVisibility) -> HeaderVariant {
        self.visible.retain(|(section, _)| section != &event.section);
        if event.visible {
            self.visible.push((event.section, event.variant));
        }

        let next = self
            .visible
            .last()
            .map(|(_, variant)| *variant)
            .unwrap_or(self.default);

        if next != self.current() {
            debug!(variant = ?next, "Header variant changed");
            self.tx.send_replace(next);
        }
        next
    }
}

impl Default for HeaderThemeController {
    fn default() -> Self {
        Self::new(HeaderVariant::default())
    }
}
