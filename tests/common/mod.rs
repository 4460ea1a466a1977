//! Fixture helpers shared by the integration tests.
//!
//! Mirrors `src/test_helpers.rs`, which integration tests cannot reach.

use rack_site::config::{self, SiteConfig};
use rack_site::site::{self, BuildReport};
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use walkdir::WalkDir;

/// Copy `fixtures/site/` to a temp directory and return it.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
    for entry in WalkDir::new(&fixtures) {
        let entry = entry.unwrap();
        let dst = tmp.path().join(entry.path().strip_prefix(&fixtures).unwrap());
        if entry.file_type().is_dir() {
            fs::create_dir_all(&dst).unwrap();
        } else {
            fs::copy(entry.path(), &dst).unwrap();
        }
    }
    tmp
}

pub fn load(root: &Path) -> SiteConfig {
    config::load_config(&root.join(config::CONFIG_FILE)).unwrap()
}

/// Build without printing progress.
pub fn build(root: &Path, config: &SiteConfig) -> BuildReport {
    site::build_site(root, config, &mut |_| {}).unwrap()
}

/// Read a page from the fixture project's default output directory.
pub fn page(root: &Path, rel: &str) -> String {
    fs::read_to_string(root.join("docs").join(rel)).unwrap()
}
