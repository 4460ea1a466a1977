//! Internal link rewriting for sub-path deployments.
//!
//! Content fragments are authored as if the site lived at the host root:
//! `href="/about"`, `href="/"`. GitHub Pages serves a project site under
//! `/<repo>/`, and without a server to map extensionless URLs every internal
//! link must also point at the `.html` file. [`LinkRewriter`] fixes both:
//!
//! | Authored | Published (`deploy_prefix = "site"`) |
//! |----------|--------------------------------------|
//! | `/about` | `/site/about.html` |
//! | `/` | `/site/` |
//! | `/resources/faq.html` | `/site/resources/faq.html` |
//! | `/about#team` | `/site/about#team` |
//! | `/quote?src=ad` | `/site/quote.html?src=ad` |
//! | `/services/` | `/site/services/` |
//! | `/brochure.pdf` | `/site/brochure.pdf` |
//! | `#faq`, `https://…`, `mailto:…`, `//cdn…` | unchanged |
//!
//! ## Structural, Not Textual
//!
//! The fragment is tokenized into comments, start tags and text. Only `href`
//! attribute values inside start tags are touched, so an `href="/x"` that
//! appears in a comment or in body text survives as written. Double-quoted,
//! single-quoted and unquoted values are all recognised and keep their
//! quoting. A `>` inside a quoted value does not end the tag, and text inside
//! one attribute's value is never read as another attribute.
//!
//! Raw-text elements are not special-cased: a `<script>` body containing
//! something shaped like `<a href="/x">` is rewritten like markup.

use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;

/// Comments and start tags. Everything between matches is text. Quoted
/// attribute values may contain `>`.
static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<!--.*?-->|<[A-Za-z](?:[^>"']|"[^"]*"|'[^']*')*>"#)
        .expect("Invalid token regex")
});

/// One attribute of a start tag, with its value in one of the three HTML
/// quoting styles. Matches run left to right, so quoted values are consumed
/// whole and never scanned for attribute names.
static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(\s+)([^\s"'>/=]+)(?:(\s*=\s*)(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#,
    )
    .expect("Invalid attribute regex")
});

/// Rewrites root-relative links under a deployment prefix.
#[derive(Debug, Clone)]
pub struct LinkRewriter {
    /// `/<prefix>/`, or `/` when the site is served from the host root
    base: String,
}

impl LinkRewriter {
    pub fn new(deploy_prefix: &str) -> Self {
        let prefix = deploy_prefix.trim_matches('/');
        let base = if prefix.is_empty() {
            "/".to_string()
        } else {
            format!("/{prefix}/")
        };
        Self { base }
    }

    /// The site root as seen by the browser, always ending in `/`.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Absolute URL path for a file inside the output directory.
    pub fn site_path(&self, path: &str) -> String {
        format!("{}{}", self.base, path.trim_start_matches('/'))
    }

    /// Rewrite every `href` in the start tags of `html`.
    pub fn rewrite<'a>(&self, html: &'a str) -> Cow<'a, str> {
        TOKEN_RE.replace_all(html, |caps: &Captures| {
            let token = &caps[0];
            if token.starts_with("<!--") {
                token.to_string()
            } else {
                self.rewrite_tag(token).into_owned()
            }
        })
    }

    fn rewrite_tag<'t>(&self, tag: &'t str) -> Cow<'t, str> {
        ATTR_RE.replace_all(tag, |caps: &Captures| {
            if !caps[2].eq_ignore_ascii_case("href") {
                return caps[0].to_string();
            }
            let Some(eq) = caps.get(3) else {
                return caps[0].to_string();
            };
            let (value, quote) = if let Some(m) = caps.get(4) {
                (m.as_str(), "\"")
            } else if let Some(m) = caps.get(5) {
                (m.as_str(), "'")
            } else {
                (caps.get(6).map_or("", |m| m.as_str()), "")
            };
            match self.rewrite_href(value) {
                Some(href) => format!(
                    "{}{}{}{quote}{href}{quote}",
                    &caps[1],
                    &caps[2],
                    eq.as_str()
                ),
                None => caps[0].to_string(),
            }
        })
    }

    /// Rewrite a single `href` value. `None` means the value is not a
    /// root-relative internal link and stays as written.
    pub fn rewrite_href(&self, value: &str) -> Option<String> {
        if value == "/" {
            return Some(self.base.clone());
        }
        let path = value.strip_prefix('/')?;
        if path.starts_with('/') {
            // Protocol-relative: another host.
            return None;
        }
        if path.contains('#') {
            return Some(format!("{}{path}", self.base));
        }

        let (route, query) = path.split_at(path.find('?').unwrap_or(path.len()));
        if needs_html_extension(route) {
            Some(format!("{}{route}.html{query}", self.base))
        } else {
            Some(format!("{}{path}", self.base))
        }
    }
}

/// Whether a route (query already split off) should get `.html` appended.
///
/// Directory-style routes (`services/`) and routes whose last segment
/// already carries an extension (`faq.html`, `brochure.pdf`) are left alone.
fn needs_html_extension(route: &str) -> bool {
    if route.is_empty() || route.ends_with('/') {
        return false;
    }
    let last = route.rsplit('/').next().unwrap_or(route);
    !last
        .rsplit_once('.')
        .is_some_and(|(stem, ext)| !stem.is_empty() && !ext.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewriter() -> LinkRewriter {
        LinkRewriter::new("rs-solutions-website")
    }

    fn rewrite(html: &str) -> String {
        rewriter().rewrite(html).into_owned()
    }

    // =========================================================================
    // Rewrite rules
    // =========================================================================

    #[test]
    fn prefixes_and_extends_bare_path() {
        assert_eq!(
            rewrite(r#"<a href="/about">About</a>"#),
            r#"<a href="/rs-solutions-website/about.html">About</a>"#
        );
    }

    #[test]
    fn home_link_gets_prefix_only() {
        assert_eq!(
            rewrite(r#"<a href="/">Home</a>"#),
            r#"<a href="/rs-solutions-website/">Home</a>"#
        );
    }

    #[test]
    fn existing_html_extension_is_kept() {
        assert_eq!(
            rewrite(r#"<a href="/resources/faq.html">FAQ</a>"#),
            r#"<a href="/rs-solutions-website/resources/faq.html">FAQ</a>"#
        );
    }

    #[test]
    fn fragment_link_is_prefixed_without_extension() {
        assert_eq!(
            rewrite(r#"<a href="/about#team">Team</a>"#),
            r#"<a href="/rs-solutions-website/about#team">Team</a>"#
        );
    }

    #[test]
    fn query_string_stays_after_extension() {
        assert_eq!(
            rewriter().rewrite_href("/quote?src=ad/campaign"),
            Some("/rs-solutions-website/quote.html?src=ad/campaign".to_string())
        );
    }

    #[test]
    fn directory_style_path_gets_no_extension() {
        assert_eq!(
            rewriter().rewrite_href("/services/"),
            Some("/rs-solutions-website/services/".to_string())
        );
    }

    #[test]
    fn other_extensions_are_left_alone() {
        assert_eq!(
            rewriter().rewrite_href("/downloads/rack-guide.pdf"),
            Some("/rs-solutions-website/downloads/rack-guide.pdf".to_string())
        );
    }

    #[test]
    fn nested_path_gets_extension() {
        assert_eq!(
            rewriter().rewrite_href("/services/used-pallet-rack"),
            Some("/rs-solutions-website/services/used-pallet-rack.html".to_string())
        );
    }

    // =========================================================================
    // Values that are not internal links
    // =========================================================================

    #[test]
    fn anchors_and_external_links_are_untouched() {
        let html = concat!(
            r##"<a href="#section">Jump</a>"##,
            r#"<a href="https://example.com">Out</a>"#,
            r#"<a href="mailto:sales@example.com">Mail</a>"#,
            r#"<a href="tel:+18337772257">Call</a>"#,
            r#"<link href="//fonts.example.com/inter.css">"#,
            r#"<a href="about">Relative</a>"#,
        );
        assert_eq!(rewrite(html), html);
    }

    // =========================================================================
    // Tokenizing
    // =========================================================================

    #[test]
    fn href_inside_comment_is_untouched() {
        let html = r#"<!-- old nav: <a href="/old">x</a> --><a href="/new">y</a>"#;
        assert_eq!(
            rewrite(html),
            r#"<!-- old nav: <a href="/old">x</a> --><a href="/rs-solutions-website/new.html">y</a>"#
        );
    }

    #[test]
    fn href_in_text_is_untouched() {
        let html = r#"<code>write href="/about" in your fragment</code>"#;
        assert_eq!(rewrite(html), html);
    }

    #[test]
    fn single_quoted_and_unquoted_values_keep_their_quoting() {
        assert_eq!(
            rewrite("<a href='/contact'>a</a><a href=/quote>b</a>"),
            "<a href='/rs-solutions-website/contact.html'>a</a><a href=/rs-solutions-website/quote.html>b</a>"
        );
    }

    #[test]
    fn attribute_name_is_case_insensitive() {
        assert_eq!(
            rewrite(r#"<A HREF="/about">About</A>"#),
            r#"<A HREF="/rs-solutions-website/about.html">About</A>"#
        );
    }

    #[test]
    fn similar_attribute_names_are_untouched() {
        let html = r#"<div data-href="/about" class="card">x</div>"#;
        assert_eq!(rewrite(html), html);
    }

    #[test]
    fn attributes_split_across_lines_are_rewritten() {
        let html = "<a class=\"btn\"\n   href=\"/contact\">Go</a>";
        assert_eq!(
            rewrite(html),
            "<a class=\"btn\"\n   href=\"/rs-solutions-website/contact.html\">Go</a>"
        );
    }

    #[test]
    fn angle_bracket_in_quoted_value_does_not_end_tag() {
        assert_eq!(
            rewrite(r#"<a title="Step 1 > Step 2" href="/about">x</a>"#),
            r#"<a title="Step 1 > Step 2" href="/rs-solutions-website/about.html">x</a>"#
        );
        assert_eq!(
            rewrite("<a data-tip='a > b' href='/quote'>x</a>"),
            "<a data-tip='a > b' href='/rs-solutions-website/quote.html'>x</a>"
        );
    }

    #[test]
    fn href_text_inside_another_value_is_untouched() {
        assert_eq!(
            rewrite(r#"<a title="use href=/old here" href="/new">x</a>"#),
            r#"<a title="use href=/old here" href="/rs-solutions-website/new.html">x</a>"#
        );
    }

    #[test]
    fn bare_href_attribute_is_untouched() {
        let html = "<a href class=\"x\">x</a>";
        assert_eq!(rewrite(html), html);
    }

    #[test]
    fn src_attributes_are_untouched() {
        let html = r#"<img src="/img/rack.png" alt="Rack">"#;
        assert_eq!(rewrite(html), html);
    }

    #[test]
    fn text_without_tags_is_borrowed() {
        let html = "No markup at all, see /about for details";
        assert!(matches!(rewriter().rewrite(html), Cow::Borrowed(_)));
    }

    // =========================================================================
    // Prefix handling
    // =========================================================================

    #[test]
    fn empty_prefix_serves_from_root() {
        let root = LinkRewriter::new("");
        assert_eq!(root.base(), "/");
        assert_eq!(root.rewrite_href("/about"), Some("/about.html".to_string()));
        assert_eq!(root.rewrite_href("/"), Some("/".to_string()));
    }

    #[test]
    fn prefix_slashes_are_normalized() {
        assert_eq!(LinkRewriter::new("/site/").base(), "/site/");
    }

    #[test]
    fn site_path_joins_under_base() {
        assert_eq!(
            rewriter().site_path("services.html"),
            "/rs-solutions-website/services.html"
        );
        assert_eq!(rewriter().site_path(""), "/rs-solutions-website/");
    }
}
