//! Shared test utilities for the rack-site test suite.
//!
//! `fixtures/site/` is a miniature project: a `site.toml` with four page
//! entries, a stylesheet, and fragments for three of them. The fourth entry
//! (`contact.html`) has no fragment on purpose, and `pages/drafts/` holds a
//! fragment no entry references.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let config = fixture_config(tmp.path());
//! build_site(tmp.path(), &config, &mut |_| {}).unwrap();
//! let html = read_output(tmp.path(), "about.html");
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

use crate::config::{self, SiteConfig};

/// Copy `fixtures/site/` to a temp directory and return it.
///
/// Tests get an isolated project they can mutate and build into.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
    for entry in WalkDir::new(&fixtures) {
        let entry = entry.unwrap();
        let rel = entry.path().strip_prefix(&fixtures).unwrap();
        let dst = tmp.path().join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&dst).unwrap();
        } else {
            fs::copy(entry.path(), &dst).unwrap();
        }
    }
    tmp
}

/// Load the fixture project's `site.toml`. Panics on error.
pub fn fixture_config(root: &Path) -> SiteConfig {
    config::load_config(&root.join(config::CONFIG_FILE))
        .unwrap_or_else(|e| panic!("fixture config failed to load: {e}"))
}

/// Where a page lands inside the fixture project's output directory.
pub fn output_path(root: &Path, rel: &str) -> PathBuf {
    root.join("docs").join(rel)
}

/// Read a built page. Panics with the missing path if it was not written.
pub fn read_output(root: &Path, rel: &str) -> String {
    let path = output_path(root, rel);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("{} not readable: {e}", path.display()))
}
