//! Whole-site build and check.
//!
//! [`build_site`] is the orchestrator: it prepares the output directory,
//! loads the stylesheet, assembles the shell once and builds every page of
//! the table in declaration order. Progress is reported through a
//! [`BuildEvent`] callback so the CLI can print as pages complete, and the
//! final tally comes back as a [`BuildReport`].
//!
//! Pages are independent. A page that fails (missing fragment, unresolved
//! marker) is recorded and the loop moves on; pages already written stay
//! written. Only fatal conditions abort:
//!
//! - the stylesheet is missing or unreadable (before any page is touched),
//! - a fragment exists but cannot be read,
//! - an output file cannot be written.
//!
//! [`check_site`] runs the same input checks without writing anything.

use crate::config::SiteConfig;
use crate::links::LinkRewriter;
use crate::page::{self, BuildError, PageContext, PageOutcome};
use crate::template;
use crate::types::PageDescriptor;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Progress notifications emitted while building.
#[derive(Debug)]
pub enum BuildEvent<'a> {
    /// The output directory exists and the build is about to read the CSS.
    Started { site_name: &'a str, output_dir: &'a Path },
    /// The stylesheet was read; `chars` is its length in characters.
    CssLoaded { chars: usize },
    /// One page finished, successfully or not.
    PageFinished {
        page: &'a PageDescriptor,
        outcome: &'a PageOutcome,
    },
}

/// A page that was not published, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFailure {
    pub page: PageDescriptor,
    pub outcome: PageOutcome,
}

/// Result of a full build.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Output paths written, in build order.
    pub built: Vec<String>,
    /// Pages skipped, in build order.
    pub failed: Vec<PageFailure>,
}

impl BuildReport {
    /// True when every page in the table was written.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Resolve a configured path against the project root.
pub fn resolve(root: &Path, path: &Path) -> PathBuf {
    root.join(path)
}

/// Build every page in `config.pages` under `root`.
pub fn build_site(
    root: &Path,
    config: &SiteConfig,
    on_event: &mut dyn FnMut(BuildEvent<'_>),
) -> Result<BuildReport, BuildError> {
    let output_dir = resolve(root, &config.paths.output);
    fs::create_dir_all(&output_dir)?;
    on_event(BuildEvent::Started {
        site_name: &config.site.name,
        output_dir: &output_dir,
    });

    let css = template::load_css(&resolve(root, &config.paths.css))?;
    on_event(BuildEvent::CssLoaded {
        chars: css.chars().count(),
    });

    let shell = template::assemble(&css, &config.site)?;
    let links = LinkRewriter::new(&config.site.deploy_prefix);
    let ctx = PageContext {
        shell: &shell,
        links: &links,
        root,
        output_dir: &output_dir,
    };

    let mut report = BuildReport::default();
    for descriptor in &config.pages {
        let outcome = page::build_page(&ctx, descriptor)?;
        on_event(BuildEvent::PageFinished {
            page: descriptor,
            outcome: &outcome,
        });
        if outcome.is_built() {
            report.built.push(descriptor.output.clone());
        } else {
            report.failed.push(PageFailure {
                page: descriptor.clone(),
                outcome,
            });
        }
    }
    Ok(report)
}

/// Result of checking a project without building it.
#[derive(Debug, Default)]
pub struct CheckReport {
    /// The configured stylesheet path, resolved against the root.
    pub css_path: PathBuf,
    pub css_found: bool,
    /// Number of page entries whose fragment exists.
    pub present: usize,
    /// Page entries whose fragment is missing, in table order.
    pub missing: Vec<PageDescriptor>,
    /// Fragments under the pages directory that no entry references, sorted.
    pub orphans: Vec<String>,
}

impl CheckReport {
    /// Orphans are only a warning; a missing stylesheet or fragment is not.
    pub fn is_ok(&self) -> bool {
        self.css_found && self.missing.is_empty()
    }
}

/// Check that the stylesheet and every fragment exist, and list fragments
/// the page table never references.
pub fn check_site(root: &Path, config: &SiteConfig) -> CheckReport {
    let css_path = resolve(root, &config.paths.css);
    let css_found = css_path.is_file();

    let mut present = 0;
    let mut missing = Vec::new();
    for descriptor in &config.pages {
        if root.join(&descriptor.source).is_file() {
            present += 1;
        } else {
            missing.push(descriptor.clone());
        }
    }

    CheckReport {
        css_path,
        css_found,
        present,
        missing,
        orphans: find_orphans(root, config),
    }
}

/// `.html` files under the pages directory not named by any page entry,
/// as root-relative `/`-separated paths.
fn find_orphans(root: &Path, config: &SiteConfig) -> Vec<String> {
    let referenced: HashSet<PathBuf> = config
        .pages
        .iter()
        .map(|p| root.join(&p.source))
        .collect();

    let mut orphans: Vec<String> = WalkDir::new(resolve(root, &config.paths.pages))
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "html"))
        .filter(|e| !referenced.contains(e.path()))
        .map(|e| {
            let rel = e.path().strip_prefix(root).unwrap_or(e.path());
            rel.components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/")
        })
        .collect();
    orphans.sort();
    orphans
}
