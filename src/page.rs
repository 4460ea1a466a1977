//! Single-page assembly.
//!
//! [`build_page`] turns one [`PageDescriptor`] into one file:
//!
//! ```text
//! pages/core/about.html ──read──► clean ──► rewrite links ──► fill shell ──► docs/about.html
//! ```
//!
//! A page whose fragment is missing, or whose rendered text still carries a
//! shell marker, is reported through [`PageOutcome`] and nothing is written
//! for it. Read and write failures on existing files are I/O errors and end
//! the build.

use crate::content;
use crate::links::LinkRewriter;
use crate::template::{self, PageFields, Shell, TemplateError};
use crate::types::PageDescriptor;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),
    #[error("Failed to read {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// What happened to one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// Written to the output directory.
    Built,
    /// The fragment does not exist; nothing written.
    MissingSource,
    /// The rendered page still contains these markers; nothing written.
    UnresolvedMarkers(Vec<&'static str>),
}

impl PageOutcome {
    pub fn is_built(&self) -> bool {
        matches!(self, PageOutcome::Built)
    }
}

/// Shared inputs for every page of one build.
pub struct PageContext<'a> {
    pub shell: &'a Shell,
    pub links: &'a LinkRewriter,
    /// Project root; descriptor sources are relative to it.
    pub root: &'a Path,
    /// Output directory; descriptor outputs are relative to it.
    pub output_dir: &'a Path,
}

/// Render the full HTML for a page from its raw fragment text.
pub fn render_page(shell: &Shell, links: &LinkRewriter, page: &PageDescriptor, raw: &str) -> String {
    let content = links.rewrite(content::clean_fragment(raw));
    shell.render(&PageFields {
        title: &page.title,
        description: &page.description,
        canonical_path: page.canonical_path(),
        content: &content,
    })
}

/// Build one page and write it under the output directory.
pub fn build_page(ctx: &PageContext<'_>, page: &PageDescriptor) -> Result<PageOutcome, BuildError> {
    let source = ctx.root.join(&page.source);
    if !source.is_file() {
        return Ok(PageOutcome::MissingSource);
    }

    let raw = fs::read_to_string(&source).map_err(|e| BuildError::ReadFailed {
        path: source.clone(),
        source: e,
    })?;
    let html = render_page(ctx.shell, ctx.links, page, &raw);

    let unresolved = template::unresolved_markers(&html);
    if !unresolved.is_empty() {
        return Ok(PageOutcome::UnresolvedMarkers(unresolved));
    }

    let output = ctx.output_dir.join(&page.output);
    write_file(&output, &html)?;
    Ok(PageOutcome::Built)
}

/// Write `content` to `path`, creating missing parent directories.
fn write_file(path: &Path, content: &str) -> Result<(), BuildError> {
    let write = || -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)
    };
    write().map_err(|e| BuildError::WriteFailed {
        path: path.to_path_buf(),
        source: e,
    })
}
