//! CLI output formatting.
//!
//! Each command has `format_*` functions returning `Vec<String>` (pure, no
//! I/O, easy to assert on) and thin `print_*` wrappers that write the lines to
//! stdout.
//!
//! # Build
//!
//! ```text
//! Building Rack Storage Solutions...
//! Output directory: ./docs
//!
//! Loaded CSS: 18234 characters
//!
//! Building pages:
//!   Built: index.html
//!   Built: about.html
//!   WARNING: Source not found: pages/core/contact.html
//!
//! Build complete: 2 pages built, 1 failed
//!
//! To deploy:
//! 1. Go to GitHub repo settings
//! 2. Pages > Source: Deploy from branch
//! 3. Branch: main, folder: /docs
//! 4. Save
//! ```
//!
//! # Check
//!
//! ```text
//! CSS: ./css/brand.css
//! Pages: 34 of 35 sources found
//!   Missing: pages/core/contact.html (contact.html)
//!   Unreferenced: pages/drafts/old-promo.html
//! ```

use crate::config::SiteConfig;
use crate::page::PageOutcome;
use crate::site::{BuildEvent, BuildReport, CheckReport};
use std::path::{Component, Path};

// ============================================================================
// Build
// ============================================================================

/// Format one progress event.
pub fn format_build_event(event: &BuildEvent<'_>) -> Vec<String> {
    match event {
        BuildEvent::Started {
            site_name,
            output_dir,
        } => vec![
            format!("Building {site_name}..."),
            format!("Output directory: {}", output_dir.display()),
            String::new(),
        ],
        BuildEvent::CssLoaded { chars } => vec![
            format!("Loaded CSS: {chars} characters"),
            String::new(),
            "Building pages:".to_string(),
        ],
        BuildEvent::PageFinished { page, outcome } => match outcome {
            PageOutcome::Built => vec![format!("  Built: {}", page.output)],
            PageOutcome::MissingSource => {
                vec![format!("  WARNING: Source not found: {}", page.source)]
            }
            PageOutcome::UnresolvedMarkers(markers) => vec![format!(
                "  WARNING: Unresolved markers in {}: {}",
                page.output,
                markers.join(", ")
            )],
        },
    }
}

/// Format the final tally.
pub fn format_build_summary(report: &BuildReport) -> Vec<String> {
    vec![
        String::new(),
        format!(
            "Build complete: {} pages built, {} failed",
            report.built.len(),
            report.failed.len()
        ),
    ]
}

/// Manual GitHub Pages steps for publishing `output`, given as configured
/// (relative to the project root).
pub fn format_deploy_instructions(output: &Path) -> Vec<String> {
    let folder: Vec<_> = output
        .components()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(name.to_string_lossy()),
            _ => None,
        })
        .collect();
    vec![
        String::new(),
        "To deploy:".to_string(),
        "1. Go to GitHub repo settings".to_string(),
        "2. Pages > Source: Deploy from branch".to_string(),
        format!("3. Branch: main, folder: /{}", folder.join("/")),
        "4. Save".to_string(),
    ]
}

pub fn print_build_event(event: &BuildEvent<'_>) {
    print_lines(format_build_event(event));
}

pub fn print_build_summary(report: &BuildReport, output: &Path) {
    print_lines(format_build_summary(report));
    print_lines(format_deploy_instructions(output));
}

// ============================================================================
// Check
// ============================================================================

/// Format the result of `check`.
pub fn format_check_output(report: &CheckReport, config: &SiteConfig) -> Vec<String> {
    let mut lines = Vec::new();

    if report.css_found {
        lines.push(format!("CSS: {}", report.css_path.display()));
    } else {
        lines.push(format!("CSS: {} (not found)", report.css_path.display()));
    }

    lines.push(format!(
        "Pages: {} of {} sources found",
        report.present,
        config.pages.len()
    ));
    for page in &report.missing {
        lines.push(format!("  Missing: {} ({})", page.source, page.output));
    }
    for orphan in &report.orphans {
        lines.push(format!("  Unreferenced: {orphan}"));
    }
    lines
}

pub fn print_check_output(report: &CheckReport, config: &SiteConfig) {
    print_lines(format_check_output(report, config));
}

// ============================================================================
// Page table
// ============================================================================

/// Format the page table: `NNN output ← source`, then title and canonical URL.
pub fn format_page_table(config: &SiteConfig) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, page) in config.pages.iter().enumerate() {
        lines.push(format!("{:0>3} {} ← {}", i + 1, page.output, page.source));
        lines.push(format!("    Title: {}", page.title));
        lines.push(format!(
            "    Canonical: {}{}",
            config.site.base_url,
            page.canonical_path()
        ));
    }
    lines
}

pub fn print_page_table(config: &SiteConfig) {
    print_lines(format_page_table(config));
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{}", line);
    }
}
