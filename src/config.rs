//! Site configuration module.
//!
//! Handles loading, validating, and merging `site.toml`. Stock defaults
//! describe the production site (brand, deployment prefix, the full page
//! table); a `site.toml` in the project root overrides any of them.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! name = "Rack Storage Solutions"
//! tagline = "Your trusted partner for warehouse storage solutions. Serving businesses nationwide."
//! base_url = "https://simpleleadsads-blip.github.io/rs-solutions-website/"
//! deploy_prefix = "rs-solutions-website"  # "" when served from the host root
//! logo_url = "https://storage.googleapis.com/.../695b0f593ccdd60d510ce6a3.png"
//! analytics = ["G-XHZ0XZW8L3", "AW-17500834233"]
//! copyright_year = 2025
//!
//! [site.phone]                 # or `phone = false` under [site]
//! display = "(833) 777-2257"
//! tel = "+18337772257"
//!
//! [paths]
//! css = "css/brand.css"     # Inlined into every page
//! pages = "pages"           # Fragment directory (checked for orphans)
//! output = "docs"           # GitHub Pages serves from /docs
//!
//! [[pages]]
//! source = "pages/core/home.html"
//! output = "index.html"
//! title = "Warehouse Storage Solutions | Pallet Racking Nationwide"
//! description = "Get quality pallet racking..."
//! ```
//!
//! ## Merging
//!
//! Tables merge key by key, so overriding `site.deploy_prefix` keeps every
//! other `site` key. Arrays replace: a `site.toml` that declares any
//! `[[pages]]` replaces the whole stock page table.
//!
//! Unknown keys are rejected to catch typos early.

use crate::types::PageDescriptor;
use serde::{Deserialize, Deserializer, Serialize, de};
use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Default config file name, looked up in the project root.
pub const CONFIG_FILE: &str = "site.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `site.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Brand and deployment metadata used by the shell.
    pub site: SiteMeta,
    /// Input and output locations, relative to the project root.
    pub paths: PathsConfig,
    /// The ordered page table.
    pub pages: Vec<PageDescriptor>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site: SiteMeta::default(),
            paths: PathsConfig::default(),
            pages: stock_pages(),
        }
    }
}

/// Brand and deployment metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteMeta {
    /// Site name, appended to every page title.
    pub name: String,
    /// One-line pitch shown in the footer.
    pub tagline: String,
    /// Absolute URL of the deployed site root; canonical URLs hang off it.
    pub base_url: String,
    /// Path segment the static host serves the site under.
    pub deploy_prefix: String,
    /// Logo image, also used as the Open Graph image.
    pub logo_url: String,
    /// Phone number for the call buttons; no call buttons when absent.
    /// `phone = false` in `site.toml` turns off the stock number.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_phone"
    )]
    pub phone: Option<PhoneConfig>,
    /// Google tag ids. The first one loads gtag.js; every id gets a config call.
    pub analytics: Vec<String>,
    /// Year shown in the footer copyright line.
    pub copyright_year: u16,
}

impl Default for SiteMeta {
    fn default() -> Self {
        Self {
            name: "Rack Storage Solutions".to_string(),
            tagline: "Your trusted partner for warehouse storage solutions. Serving businesses nationwide."
                .to_string(),
            base_url: "https://simpleleadsads-blip.github.io/rs-solutions-website/".to_string(),
            deploy_prefix: "rs-solutions-website".to_string(),
            logo_url: "https://storage.googleapis.com/msgsndr/7FWz2v6LvpUoGO3qQ2Xb/media/695b0f593ccdd60d510ce6a3.png"
                .to_string(),
            phone: Some(PhoneConfig {
                display: "(833) 777-2257".to_string(),
                tel: "+18337772257".to_string(),
            }),
            analytics: vec!["G-XHZ0XZW8L3".to_string(), "AW-17500834233".to_string()],
            copyright_year: 2025,
        }
    }
}

/// A phone number as shown to visitors and as dialled by `tel:` links.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PhoneConfig {
    /// Human-readable form, e.g. `(833) 777-2257`.
    pub display: String,
    /// Dialable form for the `tel:` URI, e.g. `+18337772257`.
    pub tel: String,
}

/// `[site.phone]` table, or `false` for no call buttons.
#[derive(Deserialize)]
#[serde(untagged)]
enum PhoneSetting {
    Enabled(bool),
    Number(PhoneConfig),
}

fn deserialize_phone<'de, D>(deserializer: D) -> Result<Option<PhoneConfig>, D::Error>
where
    D: Deserializer<'de>,
{
    match PhoneSetting::deserialize(deserializer)? {
        PhoneSetting::Enabled(false) => Ok(None),
        PhoneSetting::Enabled(true) => Err(de::Error::custom(
            "phone = true has no number; use a [site.phone] table with display and tel",
        )),
        PhoneSetting::Number(phone) => Ok(Some(phone)),
    }
}

/// Input and output locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Stylesheet inlined into every page.
    pub css: PathBuf,
    /// Directory holding the content fragments.
    pub pages: PathBuf,
    /// Directory the finished site is written to.
    pub output: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            css: PathBuf::from("css/brand.css"),
            pages: PathBuf::from("pages"),
            output: PathBuf::from("docs"),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base_url = &self.site.base_url;
        if !(base_url.starts_with("https://") || base_url.starts_with("http://")) {
            return Err(ConfigError::Validation(
                "site.base_url must be an http(s) URL".into(),
            ));
        }
        if !base_url.ends_with('/') {
            return Err(ConfigError::Validation(
                "site.base_url must end with '/'".into(),
            ));
        }

        let prefix = &self.site.deploy_prefix;
        if prefix.starts_with('/') || prefix.ends_with('/') {
            return Err(ConfigError::Validation(
                "site.deploy_prefix must not start or end with '/'".into(),
            ));
        }
        if prefix
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '"' | '\'' | '#' | '?'))
        {
            return Err(ConfigError::Validation(format!(
                "site.deploy_prefix contains an invalid character: {prefix:?}"
            )));
        }

        if self.pages.is_empty() {
            return Err(ConfigError::Validation("pages must not be empty".into()));
        }

        let mut outputs = HashSet::new();
        for page in &self.pages {
            validate_relative("source", &page.source)?;
            validate_relative("output", &page.output)?;
            if !page.output.ends_with(".html") {
                return Err(ConfigError::Validation(format!(
                    "page output must end with .html: {}",
                    page.output
                )));
            }
            if !outputs.insert(page.output.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate page output: {}",
                    page.output
                )));
            }
        }
        Ok(())
    }
}

/// Page paths must stay inside their root: relative, no `..`, no `.`.
fn validate_relative(field: &str, path: &str) -> Result<(), ConfigError> {
    if path.is_empty() {
        return Err(ConfigError::Validation(format!(
            "page {field} must not be empty"
        )));
    }
    let normal = Path::new(path)
        .components()
        .all(|c| matches!(c, Component::Normal(_)));
    if !normal {
        return Err(ConfigError::Validation(format!(
            "page {field} must be a plain relative path: {path}"
        )));
    }
    Ok(())
}

// =============================================================================
// Stock page table
// =============================================================================

/// `(source, output, title, description)` for every page of the production site.
const STOCK_PAGES: &[(&str, &str, &str, &str)] = &[
    // Core pages
    (
        "pages/core/home.html",
        "index.html",
        "Warehouse Storage Solutions | Pallet Racking Nationwide",
        "Get quality pallet racking, warehouse design, installation, and relocation services nationwide. New and used rack available. Free quotes from Rack Storage Solutions.",
    ),
    (
        "pages/core/about.html",
        "about.html",
        "About Us",
        "Learn about Rack Storage Solutions - your trusted partner for warehouse storage solutions nationwide.",
    ),
    (
        "pages/core/contact.html",
        "contact.html",
        "Contact Us | Get a Free Quote",
        "Contact Rack Storage Solutions for a free quote on pallet racking, warehouse design, and installation services.",
    ),
    (
        "pages/core/services-hub.html",
        "services.html",
        "Our Services",
        "Explore our full range of warehouse storage services including pallet racking, design, installation, and relocation.",
    ),
    (
        "pages/core/nationwide-service.html",
        "nationwide-service.html",
        "Nationwide Service",
        "Rack Storage Solutions serves all 50 states with warehouse storage solutions.",
    ),
    // Service pages
    (
        "pages/services/heavy-duty-pallet-racking.html",
        "services/heavy-duty-pallet-racking.html",
        "Heavy Duty Pallet Racking",
        "Heavy duty pallet racking systems for warehouses. Selective, drive-in, push-back, and more.",
    ),
    (
        "pages/services/used-pallet-rack.html",
        "services/used-pallet-rack.html",
        "Used Pallet Rack",
        "Quality used pallet rack at 40-60% savings. Inspected and graded inventory available.",
    ),
    (
        "pages/services/warehouse-design-layout.html",
        "services/warehouse-design-layout.html",
        "Warehouse Design & Layout",
        "Custom warehouse design and layout services to maximize your storage space.",
    ),
    (
        "pages/services/shelving-systems.html",
        "services/shelving-systems.html",
        "Shelving Systems",
        "Industrial shelving systems for parts, cartons, and hand-pick operations.",
    ),
    (
        "pages/services/warehouse-installation-teardown.html",
        "services/warehouse-installation-teardown.html",
        "Installation & Teardown",
        "Professional warehouse racking installation and teardown services.",
    ),
    (
        "pages/services/warehouse-relocation.html",
        "services/warehouse-relocation.html",
        "Warehouse Relocation",
        "Complete warehouse relocation services including teardown, transport, and reinstallation.",
    ),
    (
        "pages/services/permitting-engineering.html",
        "services/permitting-engineering.html",
        "Permitting & Engineering",
        "Pallet rack permitting and engineering services. PE-stamped drawings available.",
    ),
    (
        "pages/services/rack-safety-inspections.html",
        "services/rack-safety-inspections.html",
        "Rack Safety Inspections",
        "Professional rack safety inspections to keep your warehouse compliant and safe.",
    ),
    // Industry pages
    (
        "pages/industries/3pl-logistics.html",
        "industries/3pl-logistics.html",
        "3PL & Logistics",
        "Warehouse storage solutions for 3PL and logistics operations.",
    ),
    (
        "pages/industries/manufacturing.html",
        "industries/manufacturing.html",
        "Manufacturing",
        "Industrial storage solutions for manufacturing facilities.",
    ),
    (
        "pages/industries/ecommerce.html",
        "industries/ecommerce.html",
        "E-Commerce",
        "Warehouse solutions for e-commerce fulfillment centers.",
    ),
    (
        "pages/industries/cold-storage.html",
        "industries/cold-storage.html",
        "Cold Storage",
        "Cold storage racking solutions for freezer and cooler environments.",
    ),
    (
        "pages/industries/retail.html",
        "industries/retail.html",
        "Retail",
        "Storage solutions for retail distribution centers.",
    ),
    // Authority pages
    (
        "pages/authority/faq-hub.html",
        "resources/faq.html",
        "Frequently Asked Questions",
        "Common questions about pallet racking, installation, and warehouse storage.",
    ),
    (
        "pages/authority/how-it-works.html",
        "resources/how-it-works.html",
        "How It Works",
        "Learn about our process from consultation to installation.",
    ),
    (
        "pages/authority/glossary.html",
        "resources/glossary.html",
        "Warehouse Glossary",
        "Warehouse and racking terminology explained.",
    ),
    (
        "pages/authority/safety-compliance.html",
        "resources/safety-compliance.html",
        "Safety & Compliance",
        "Rack safety standards and compliance information.",
    ),
    (
        "pages/authority/industries-hub.html",
        "industries.html",
        "Industries We Serve",
        "Warehouse storage solutions for various industries.",
    ),
    // Resource pages
    (
        "pages/resources/new-vs-used-pallet-rack.html",
        "resources/new-vs-used-pallet-rack.html",
        "New vs Used Pallet Rack",
        "Compare new and used pallet rack options.",
    ),
    (
        "pages/resources/racking-types-comparison.html",
        "resources/racking-types-comparison.html",
        "Racking Types Comparison",
        "Compare different types of pallet racking systems.",
    ),
    (
        "pages/resources/when-you-need-permits.html",
        "resources/when-you-need-permits.html",
        "When You Need Permits",
        "Guide to pallet rack permitting requirements.",
    ),
    // Landing pages
    (
        "pages/landing/quote.html",
        "quote.html",
        "Get a Free Quote",
        "Request a free pallet racking quote from Rack Storage Solutions.",
    ),
    (
        "pages/landing/used-rack-inventory.html",
        "used-rack-inventory.html",
        "Used Rack Inventory",
        "Check available used pallet rack inventory.",
    ),
    (
        "pages/landing/warehouse-design-consultation.html",
        "warehouse-design-consultation.html",
        "Free Design Consultation",
        "Book a free warehouse design consultation.",
    ),
    (
        "pages/landing/permitting-services.html",
        "permitting-services.html",
        "Permitting Services",
        "Pallet rack permitting services.",
    ),
    (
        "pages/landing/warehouse-relocation-quote.html",
        "warehouse-relocation-quote.html",
        "Relocation Quote",
        "Get a warehouse relocation quote.",
    ),
    // Thank-you pages
    (
        "pages/thank-you/quote.html",
        "thank-you/quote.html",
        "Thank You",
        "Thank you for your quote request.",
    ),
    (
        "pages/thank-you/contact.html",
        "thank-you/contact.html",
        "Thank You",
        "Thank you for contacting us.",
    ),
    (
        "pages/thank-you/consultation.html",
        "thank-you/consultation.html",
        "Consultation Scheduled",
        "Your consultation has been scheduled.",
    ),
    (
        "pages/thank-you/download.html",
        "thank-you/download.html",
        "Download Ready",
        "Your download is ready.",
    ),
];

/// The production page table, in build order.
pub fn stock_pages() -> Vec<PageDescriptor> {
    STOCK_PAGES
        .iter()
        .map(|&(source, output, title, description)| {
            PageDescriptor::new(source, output, title, description)
        })
        .collect()
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged on top of.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(SiteConfig::default())
        .map_err(|e| ConfigError::Validation(format!("stock config does not serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Arrays and scalars in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(config_path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto the stock defaults, then deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the site config from `config_path`, falling back to stock defaults
/// when the file is absent.
pub fn load_config(config_path: &Path) -> Result<SiteConfig, ConfigError> {
    resolve_config(load_raw_config(config_path)?)
}

/// Returns a fully-commented stock `site.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command. The page table section is rendered
/// from [`stock_pages`] so the two never drift apart.
pub fn stock_config_toml() -> String {
    let mut out = String::from(
        r##"# Rack Site Configuration
# =======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Tables merge with the defaults key by key. Declaring any [[pages]] entry
# replaces the whole page table.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Site metadata
# ---------------------------------------------------------------------------
[site]
# Appended to every page title: "<title> | <name>".
name = "Rack Storage Solutions"

# Footer pitch under the logo.
tagline = "Your trusted partner for warehouse storage solutions. Serving businesses nationwide."

# Absolute URL of the deployed site. Canonical links are base_url + page path
# without ".html". Must end with "/".
base_url = "https://simpleleadsads-blip.github.io/rs-solutions-website/"

# Path segment the host serves the site under. Root-relative links in page
# fragments (href="/about") are rewritten to live under it. Use "" when the
# site is served from the host root.
deploy_prefix = "rs-solutions-website"

# Header/footer logo, also used as the Open Graph image.
logo_url = "https://storage.googleapis.com/msgsndr/7FWz2v6LvpUoGO3qQ2Xb/media/695b0f593ccdd60d510ce6a3.png"

# Google tag ids. The first id loads gtag.js, every id is configured.
# Use [] to drop the analytics snippet.
analytics = ["G-XHZ0XZW8L3", "AW-17500834233"]

copyright_year = 2025

# Call buttons in the mobile nav and footer. Replace the table with
# `phone = false` under [site] to hide them.
[site.phone]
display = "(833) 777-2257"
tel = "+18337772257"

# ---------------------------------------------------------------------------
# Paths (relative to the project root)
# ---------------------------------------------------------------------------
[paths]
# Stylesheet inlined verbatim into every page's <style> block.
css = "css/brand.css"

# Fragment directory. `rack-site check` reports fragments in here that no
# page entry references.
pages = "pages"

# Output directory. GitHub Pages serves from /docs.
output = "docs"

# ---------------------------------------------------------------------------
# Page table: built in this order
# ---------------------------------------------------------------------------
# source      fragment path, relative to the project root
# output      output path, relative to the output directory; must end in .html
# title       page title
# description meta/Open Graph description
"##,
    );
    for page in stock_pages() {
        out.push_str("\n[[pages]]\n");
        for (key, value) in [
            ("source", &page.source),
            ("output", &page.output),
            ("title", &page.title),
            ("description", &page.description),
        ] {
            out.push_str(&format!(
                "{key} = {}\n",
                toml::Value::String(value.clone())
            ));
        }
    }
    out
}
