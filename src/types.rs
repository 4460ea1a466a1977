//! Shared types used by configuration, page building and output.

use serde::{Deserialize, Serialize};

/// One row of the page table.
///
/// Descriptors have no identity beyond their position in the table: the
/// build walks them in declaration order and every page is independent of
/// the others.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageDescriptor {
    /// Fragment path, relative to the project root (`pages/core/about.html`)
    pub source: String,
    /// Output path, relative to the output directory (`about.html`)
    pub output: String,
    /// Page title; the shell appends ` | <site name>`
    pub title: String,
    /// Meta and Open Graph description
    pub description: String,
}

impl PageDescriptor {
    pub fn new(source: &str, output: &str, title: &str, description: &str) -> Self {
        Self {
            source: source.to_string(),
            output: output.to_string(),
            title: title.to_string(),
            description: description.to_string(),
        }
    }

    /// Path used to build the canonical URL.
    ///
    /// The root `index.html` maps to the empty string; everything else is the
    /// output path with its `.html` suffix removed:
    /// - `index.html` → `""`
    /// - `about.html` → `"about"`
    /// - `services/used-pallet-rack.html` → `"services/used-pallet-rack"`
    pub fn canonical_path(&self) -> &str {
        if self.output == "index.html" {
            return "";
        }
        self.output.strip_suffix(".html").unwrap_or(&self.output)
    }
}
