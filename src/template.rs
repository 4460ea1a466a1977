//! The shared page shell.
//!
//! Every published page is the same document (head, header, navigation,
//! footer, inline script) with four holes in it:
//!
//! | Marker | Filled with |
//! |--------|-------------|
//! | `{{PAGE_TITLE}}` | page title (`<title>` and `og:title`) |
//! | `{{META_DESCRIPTION}}` | page description (meta and `og:description`) |
//! | `{{CANONICAL_PATH}}` | canonical path, appended to `site.base_url` |
//! | `{{PAGE_CONTENT}}` | the cleaned, link-rewritten fragment |
//!
//! ## Assembly
//!
//! [`assemble`] renders the document once with [Maud](https://maud.lambda.xyz/),
//! embedding the stylesheet verbatim in a `<style>` block and emitting every
//! shell link already under the deployment prefix. The result is split into
//! literal text and [`Slot`]s, so [`Shell::render`] is a single pass of
//! concatenation: values are inserted literally, never escaped and never
//! re-scanned for markers.
//!
//! ## Unresolved Markers
//!
//! A marker surviving into a rendered page is a defect. Since the shell's own
//! markers are always filled, a survivor can only come from page data (a
//! fragment that contains a literal `{{PAGE_TITLE}}`, say).
//! [`unresolved_markers`] finds them so the page builder can refuse to
//! publish such a page.

use crate::config::SiteMeta;
use crate::links::LinkRewriter;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use regex::Regex;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("CSS file not found: {0}")]
    CssNotFound(PathBuf),
    #[error("IO error reading {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("Shell is missing the {0} marker")]
    MissingMarker(&'static str),
}

/// A placeholder in the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Title,
    Description,
    CanonicalPath,
    Content,
}

impl Slot {
    pub const ALL: [Slot; 4] = [
        Slot::Title,
        Slot::Description,
        Slot::CanonicalPath,
        Slot::Content,
    ];

    /// The literal token standing in for this slot.
    pub fn marker(self) -> &'static str {
        match self {
            Slot::Title => "{{PAGE_TITLE}}",
            Slot::Description => "{{META_DESCRIPTION}}",
            Slot::CanonicalPath => "{{CANONICAL_PATH}}",
            Slot::Content => "{{PAGE_CONTENT}}",
        }
    }

    fn from_marker(marker: &str) -> Option<Slot> {
        Slot::ALL.into_iter().find(|slot| slot.marker() == marker)
    }
}

static MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{(?:PAGE_TITLE|META_DESCRIPTION|CANONICAL_PATH|PAGE_CONTENT)\}\}")
        .expect("Invalid marker regex")
});

/// Values substituted into the shell for one page.
#[derive(Debug, Clone, Copy)]
pub struct PageFields<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub canonical_path: &'a str,
    pub content: &'a str,
}

impl PageFields<'_> {
    fn get(&self, slot: Slot) -> &str {
        match slot {
            Slot::Title => self.title,
            Slot::Description => self.description,
            Slot::CanonicalPath => self.canonical_path,
            Slot::Content => self.content,
        }
    }
}

#[derive(Debug, Clone)]
enum Segment {
    Text(String),
    Slot(Slot),
}

/// The assembled shell, ready to render any number of pages.
#[derive(Debug, Clone)]
pub struct Shell {
    segments: Vec<Segment>,
}

impl Shell {
    /// Split shell HTML into text and slots.
    ///
    /// Fails if any of the four markers is absent.
    pub fn parse(html: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut last = 0;
        for m in MARKER_RE.find_iter(html) {
            if m.start() > last {
                segments.push(Segment::Text(html[last..m.start()].to_string()));
            }
            if let Some(slot) = Slot::from_marker(m.as_str()) {
                segments.push(Segment::Slot(slot));
            }
            last = m.end();
        }
        if last < html.len() {
            segments.push(Segment::Text(html[last..].to_string()));
        }

        let shell = Self { segments };
        for slot in Slot::ALL {
            if shell.slot_count(slot) == 0 {
                return Err(TemplateError::MissingMarker(slot.marker()));
            }
        }
        Ok(shell)
    }

    /// How many times `slot` occurs in the shell.
    pub fn slot_count(&self, slot: Slot) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Slot(found) if *found == slot))
            .count()
    }

    /// Fill every slot and return the page text.
    pub fn render(&self, fields: &PageFields<'_>) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Slot(slot) => out.push_str(fields.get(*slot)),
            }
        }
        out
    }
}

/// Distinct markers still present in rendered page text, in order of first
/// appearance.
pub fn unresolved_markers(html: &str) -> Vec<&'static str> {
    let mut found = Vec::new();
    for slot in MARKER_RE
        .find_iter(html)
        .filter_map(|m| Slot::from_marker(m.as_str()))
    {
        if !found.contains(&slot.marker()) {
            found.push(slot.marker());
        }
    }
    found
}

/// Read the stylesheet. A missing file is reported as [`TemplateError::CssNotFound`].
pub fn load_css(path: &Path) -> Result<String, TemplateError> {
    fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            TemplateError::CssNotFound(path.to_path_buf())
        } else {
            TemplateError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

/// Build the shell around `css` for the given site.
pub fn assemble(css: &str, site: &SiteMeta) -> Result<Shell, TemplateError> {
    let links = LinkRewriter::new(&site.deploy_prefix);
    Shell::parse(&shell_document(css, site, &links).into_string())
}

// ============================================================================
// Navigation data
// ============================================================================

/// `(label, path)`; paths are relative to the site root.
type NavLink = (&'static str, &'static str);

const SERVICE_LINKS: &[NavLink] = &[
    ("Pallet Racking", "services/heavy-duty-pallet-racking.html"),
    ("Used Rack", "services/used-pallet-rack.html"),
    ("Warehouse Design", "services/warehouse-design-layout.html"),
    ("Shelving", "services/shelving-systems.html"),
    ("Installation", "services/warehouse-installation-teardown.html"),
    ("Relocation", "services/warehouse-relocation.html"),
    ("Permitting", "services/permitting-engineering.html"),
    ("Safety Inspections", "services/rack-safety-inspections.html"),
];

const INDUSTRY_LINKS: &[NavLink] = &[
    ("3PL & Logistics", "industries/3pl-logistics.html"),
    ("Manufacturing", "industries/manufacturing.html"),
    ("E-Commerce", "industries/ecommerce.html"),
    ("Cold Storage", "industries/cold-storage.html"),
    ("Retail", "industries/retail.html"),
];

const MOBILE_LINKS: &[NavLink] = &[
    ("Home", ""),
    ("Services", "services.html"),
    ("Industries", "industries.html"),
    ("About", "about.html"),
    ("FAQ", "resources/faq.html"),
    ("Contact", "contact.html"),
];

const FOOTER_SERVICE_LINKS: &[NavLink] = &[
    ("Pallet Racking", "services/heavy-duty-pallet-racking.html"),
    ("Used Rack", "services/used-pallet-rack.html"),
    ("Warehouse Design", "services/warehouse-design-layout.html"),
    ("Installation", "services/warehouse-installation-teardown.html"),
    ("Relocation", "services/warehouse-relocation.html"),
];

const FOOTER_COMPANY_LINKS: &[NavLink] = &[
    ("About Us", "about.html"),
    ("Industries", "industries.html"),
    ("FAQ", "resources/faq.html"),
    ("Contact", "contact.html"),
];

const FONTS_CSS: &str =
    "https://fonts.googleapis.com/css2?family=Inter:wght@400;500;600;700&display=swap";

const PHONE_ICON_PATH: &str = "M22 16.92v3a2 2 0 0 1-2.18 2 19.79 19.79 0 0 1-8.63-3.07 19.5 19.5 0 0 1-6-6 19.79 19.79 0 0 1-3.07-8.67A2 2 0 0 1 4.11 2h3a2 2 0 0 1 2 1.72 12.84 12.84 0 0 0 .7 2.81 2 2 0 0 1-.45 2.11L8.09 9.91a16 16 0 0 0 6 6l1.27-1.27a2 2 0 0 1 2.11-.45 12.84 12.84 0 0 0 2.81.7A2 2 0 0 1 22 16.92z";

/// Mobile menu toggle and single-open FAQ accordion.
const SHELL_JS: &str = r#"
    (function() {
      var toggle = document.querySelector('.nav-toggle');
      var mobileNav = document.querySelector('.mobile-nav');
      if (toggle && mobileNav) {
        toggle.addEventListener('click', function() {
          var isOpen = mobileNav.classList.toggle('mobile-nav--open');
          toggle.setAttribute('aria-expanded', isOpen);
          document.body.style.overflow = isOpen ? 'hidden' : '';
        });
      }
      // FAQ Accordion
      var faqItems = document.querySelectorAll('.faq__item');
      faqItems.forEach(function(item) {
        var question = item.querySelector('.faq__question');
        if (question) {
          question.addEventListener('click', function() {
            faqItems.forEach(function(other) {
              if (other !== item) other.classList.remove('faq__item--open');
            });
            item.classList.toggle('faq__item--open');
          });
        }
      });
    })();
"#;

/// Inline gtag bootstrap: one `config` call per tag id.
fn gtag_snippet(ids: &[String]) -> String {
    let mut js = String::from(
        "\n    window.dataLayer = window.dataLayer || [];\n    function gtag(){dataLayer.push(arguments);}\n    gtag('js', new Date());\n",
    );
    for id in ids {
        js.push_str(&format!("    gtag('config', '{id}');\n"));
    }
    js
}

// ============================================================================
// HTML Components
// ============================================================================

fn marker(slot: Slot) -> PreEscaped<&'static str> {
    PreEscaped(slot.marker())
}

/// Renders the complete shell document with markers in place.
fn shell_document(css: &str, site: &SiteMeta, links: &LinkRewriter) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (marker(Slot::Title)) " | " (site.name) }
                meta name="description" content=(marker(Slot::Description));
                link rel="canonical" href={ (site.base_url) (marker(Slot::CanonicalPath)) };

                meta property="og:type" content="website";
                meta property="og:title" content={ (marker(Slot::Title)) " | " (site.name) };
                meta property="og:description" content=(marker(Slot::Description));
                meta property="og:image" content=(site.logo_url);

                link rel="preconnect" href="https://fonts.googleapis.com";
                link rel="preconnect" href="https://fonts.gstatic.com" crossorigin;
                link href=(FONTS_CSS) rel="stylesheet";

                @if let Some(first) = site.analytics.first() {
                    script async src={ "https://www.googletagmanager.com/gtag/js?id=" (first) } {}
                    script { (PreEscaped(gtag_snippet(&site.analytics))) }
                }

                style { (PreEscaped(format!("\n{css}\n"))) }
            }
            body {
                a class="sr-only" href="#main-content" { "Skip to main content" }
                (site_header(site, links))
                (mobile_nav(site, links))
                main id="main-content" {
                    "\n" (marker(Slot::Content)) "\n"
                }
                (site_footer(site, links))
                script { (PreEscaped(SHELL_JS)) }
            }
        }
    }
}

fn nav_dropdown(label: &str, path: &str, items: &[NavLink], links: &LinkRewriter) -> Markup {
    html! {
        div class="nav__dropdown" {
            a class="nav__link" href=(links.site_path(path)) { (label) }
            div class="nav__dropdown-menu" {
                @for (item_label, item_path) in items {
                    a class="nav__dropdown-link" href=(links.site_path(item_path)) { (item_label) }
                }
            }
        }
    }
}

/// Renders the site header with logo, desktop navigation and quote CTA
fn site_header(site: &SiteMeta, links: &LinkRewriter) -> Markup {
    html! {
        header class="header" {
            div class="container" {
                div class="header__inner" {
                    a class="header__logo" href=(links.base()) {
                        img src=(site.logo_url) alt=(site.name) width="200" height="50";
                    }
                    nav class="nav" {
                        a class="nav__link" href=(links.base()) { "Home" }
                        (nav_dropdown("Services", "services.html", SERVICE_LINKS, links))
                        (nav_dropdown("Industries", "industries.html", INDUSTRY_LINKS, links))
                        a class="nav__link" href=(links.site_path("about.html")) { "About" }
                        a class="nav__link" href=(links.site_path("resources/faq.html")) { "FAQ" }
                    }
                    div class="header__cta hidden lg:block" {
                        a class="btn btn--primary" href=(links.site_path("contact.html")) { "Get a Quote" }
                    }
                    button class="nav-toggle" aria-label="Menu" {
                        span {} span {} span {}
                    }
                }
            }
        }
    }
}

/// Renders the slide-in mobile navigation panel
fn mobile_nav(site: &SiteMeta, links: &LinkRewriter) -> Markup {
    html! {
        nav class="mobile-nav" id="mobile-nav" {
            @for (label, path) in MOBILE_LINKS {
                a class="mobile-nav__link" href=(links.site_path(path)) { (label) }
            }
            div style="padding-top: 1.5rem;" {
                a class="btn btn--primary btn--full" href=(links.site_path("contact.html")) { "Get a Quote" }
            }
            @if let Some(phone) = &site.phone {
                div style="padding-top: 1rem;" {
                    a class="btn btn--secondary btn--full" href={ "tel:" (phone.tel) } {
                        "Call " (phone.display)
                    }
                }
            }
        }
    }
}

fn footer_links(heading: &str, items: &[NavLink], links: &LinkRewriter) -> Markup {
    html! {
        div {
            h3 class="footer__heading" { (heading) }
            ul class="footer__links" {
                @for (label, path) in items {
                    li { a class="footer__link" href=(links.site_path(path)) { (label) } }
                }
            }
        }
    }
}

/// Renders the footer: brand, link columns, contact block and copyright
fn site_footer(site: &SiteMeta, links: &LinkRewriter) -> Markup {
    html! {
        footer class="footer" {
            div class="container" {
                div class="footer__grid" {
                    div class="footer__brand" {
                        img class="footer__logo" src=(site.logo_url) alt=(site.name) width="180" height="45";
                        p class="footer__tagline" { (site.tagline) }
                    }
                    (footer_links("Services", FOOTER_SERVICE_LINKS, links))
                    (footer_links("Company", FOOTER_COMPANY_LINKS, links))
                    div {
                        h3 class="footer__heading" { "Contact Us" }
                        @if let Some(phone) = &site.phone {
                            div class="footer__contact-item" {
                                svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" {
                                    path d=(PHONE_ICON_PATH) {}
                                }
                                a href={ "tel:" (phone.tel) } style="color: inherit;" { (phone.display) }
                            }
                        }
                        div style="margin-top: 1rem;" {
                            a class="btn btn--primary btn--full" href=(links.site_path("contact.html")) { "Request a Quote" }
                        }
                    }
                }
                div class="footer__bottom" {
                    p class="footer__copyright" {
                        "© " (site.copyright_year) " " (site.name) ". All rights reserved."
                    }
                }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
