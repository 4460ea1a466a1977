//! # Rack Site
//!
//! Static site builder for the Rack Storage Solutions marketing website.
//! Hand-written HTML fragments are merged into one shared shell (head,
//! header, navigation, footer, scripts) with the brand stylesheet inlined,
//! producing standalone pages ready for GitHub Pages.
//!
//! # Architecture: Two Stages
//!
//! ```text
//! 1. Assemble   css/brand.css + site meta  →  Shell          (once per build)
//! 2. Build      Shell + pages/**.html      →  docs/**.html   (once per page)
//! ```
//!
//! The shell is read-only after assembly. Pages share nothing else, so each
//! one either builds or fails on its own and the rest of the table carries on.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `site.toml` loading, merging over stock defaults, validation; the stock page table |
//! | [`types`] | [`PageDescriptor`](types::PageDescriptor), one row of the page table |
//! | [`template`] | Stage 1: renders the shell with Maud and fills its placeholders |
//! | [`content`] | Strips the leading authoring comment from fragments |
//! | [`links`] | Rewrites root-relative `href`s under the deployment prefix |
//! | [`page`] | Stage 2 for a single page: read, clean, rewrite, render, write |
//! | [`site`] | Runs stage 2 over the whole table; `check` without writing |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Fragments, Not Templates
//!
//! Page bodies are plain HTML written by hand. There is no template language
//! inside them and no front-matter: title and description live in the page
//! table. The only transformations are removing the leading comment and
//! fixing links.
//!
//! ## Maud For The Shell, Literal Substitution For Pages
//!
//! The shell is built with [Maud](https://maud.lambda.xyz/) so its markup is
//! checked at compile time and its static text is escaped. Page values are
//! then substituted literally, unescaped, into four marker slots. Titles like
//! `Warehouse Design & Layout` are therefore emitted as written.
//!
//! ## Structural Link Rewriting
//!
//! Links are rewritten by tokenizing the fragment into comments and tags and
//! touching only `href` attribute values, never text or comments. See
//! [`links`] for the exact rules.
//!
//! ## Failing Loudly
//!
//! A page with a missing fragment is skipped and the build continues, but the
//! CLI exits non-zero whenever any page was skipped, so deploy pipelines can
//! tell a partial build from a complete one.

pub mod config;
pub mod content;
pub mod links;
pub mod output;
pub mod page;
pub mod site;
pub mod template;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
