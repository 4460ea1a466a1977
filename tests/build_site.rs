//! End-to-end builds of the fixture project in `fixtures/site/`.

mod common;

use common::{build, load, page, setup_fixtures};
use rack_site::page::PageOutcome;
use rack_site::site;
use rack_site::template;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use walkdir::WalkDir;

#[test]
fn every_present_page_is_written_without_markers() {
    let tmp = setup_fixtures();
    let config = load(tmp.path());
    let report = build(tmp.path(), &config);

    assert_eq!(report.built.len(), 3);
    for rel in &report.built {
        let html = page(tmp.path(), rel);
        assert!(
            template::unresolved_markers(&html).is_empty(),
            "{rel} has unresolved markers"
        );
        assert!(html.starts_with("<!DOCTYPE html>"));
    }
}

#[test]
fn missing_fragment_fails_only_its_own_page() {
    let tmp = setup_fixtures();
    let config = load(tmp.path());
    let report = build(tmp.path(), &config);

    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].page.output, "contact.html");
    assert_eq!(report.failed[0].outcome, PageOutcome::MissingSource);
    assert!(!tmp.path().join("docs/contact.html").exists());
    assert!(!report.is_success());
}

#[test]
fn home_page_links_are_rewritten() {
    let tmp = setup_fixtures();
    let config = load(tmp.path());
    build(tmp.path(), &config);
    let html = page(tmp.path(), "index.html");

    assert!(html.contains(r#"<a href="/rack-site/quote.html" class="btn btn--primary">"#));
    assert!(html.contains(r#"href="/rack-site/services/used-pallet-rack.html""#));
    assert!(html.contains(r#"href="/rack-site/industries/cold-storage.html""#));
    assert!(html.contains(r#"href="/rack-site/resources/faq.html""#));
    assert!(html.contains(r##"href="#contact""##));
    assert!(html.contains(r#"href="https://example.com/partners""#));
    // Comments inside the fragment survive untouched
    assert!(html.contains(r#"<!-- Keep this list in sync with href="/industries" -->"#));
}

#[test]
fn leading_comment_is_stripped() {
    let tmp = setup_fixtures();
    let config = load(tmp.path());
    build(tmp.path(), &config);

    let home = page(tmp.path(), "index.html");
    assert!(!home.contains("Hero copy approved by marketing"));
    assert!(home.contains("<main id=\"main-content\">\n<section class=\"hero\">"));

    let about = page(tmp.path(), "about.html");
    assert!(!about.contains("<!-- About page -->"));
    assert!(about.contains("<!-- team photos go here once the shoot is done -->"));
}

#[test]
fn about_page_home_and_fragment_links() {
    let tmp = setup_fixtures();
    let config = load(tmp.path());
    build(tmp.path(), &config);
    let html = page(tmp.path(), "about.html");

    assert!(html.contains(r#"<a href="/rack-site/">Back to home</a>"#));
    assert!(html.contains(r#"<a href="/rack-site/contact#form">"#));
}

#[test]
fn nested_page_keeps_quoting_and_extensions() {
    let tmp = setup_fixtures();
    let config = load(tmp.path());
    build(tmp.path(), &config);
    let html = page(tmp.path(), "services/used-pallet-rack.html");

    assert!(html.contains("<a href='/rack-site/used-rack-inventory.html'>"));
    assert!(html.contains(r#"href="/rack-site/downloads/used-rack-grading.pdf""#));
    assert!(html.contains(r#"<a href="tel:+18337772257">Call (833) 777-2257</a>"#));
    assert!(html.contains(
        r#"<link rel="canonical" href="https://example.github.io/rack-site/services/used-pallet-rack">"#
    ));
}

#[test]
fn index_canonical_is_site_root() {
    let tmp = setup_fixtures();
    let config = load(tmp.path());
    build(tmp.path(), &config);
    let html = page(tmp.path(), "index.html");

    assert!(html.contains(r#"<link rel="canonical" href="https://example.github.io/rack-site/">"#));
    assert!(html.contains(
        "<title>Warehouse Storage Solutions | Pallet Racking Nationwide | Rack Storage Solutions</title>"
    ));
}

#[test]
fn stylesheet_is_inlined_verbatim() {
    let tmp = setup_fixtures();
    let config = load(tmp.path());
    build(tmp.path(), &config);

    let css = fs::read_to_string(tmp.path().join("css/brand.css")).unwrap();
    let html = page(tmp.path(), "about.html");
    assert!(html.contains("body{color:red}"));
    assert!(html.contains(&format!("<style>\n{css}\n</style>")));
    assert!(html.contains(".nav__dropdown-menu > a:hover"));
}

#[test]
fn rebuilding_is_idempotent() {
    let tmp = setup_fixtures();
    let config = load(tmp.path());

    build(tmp.path(), &config);
    let first: Vec<(String, Vec<u8>)> = snapshot(&tmp.path().join("docs"));
    build(tmp.path(), &config);
    let second = snapshot(&tmp.path().join("docs"));

    assert_eq!(first.len(), 3);
    assert_eq!(first, second);
}

fn snapshot(dir: &Path) -> Vec<(String, Vec<u8>)> {
    let mut files: Vec<_> = WalkDir::new(dir)
        .into_iter()
        .map(|e| e.unwrap())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let rel = e.path().strip_prefix(dir).unwrap().to_string_lossy().into_owned();
            (rel, fs::read(e.path()).unwrap())
        })
        .collect();
    files.sort();
    files
}

#[test]
fn output_directory_can_be_redirected() {
    let tmp = setup_fixtures();
    let out = TempDir::new().unwrap();
    let mut config = load(tmp.path());
    config.paths.output = out.path().join("public");

    let report = build(tmp.path(), &config);

    assert_eq!(report.built.len(), 3);
    assert!(out.path().join("public/services/used-pallet-rack.html").is_file());
    assert!(!tmp.path().join("docs").exists());
}

#[test]
fn check_agrees_with_build() {
    let tmp = setup_fixtures();
    let config = load(tmp.path());

    let check = site::check_site(tmp.path(), &config);
    let report = build(tmp.path(), &config);

    assert_eq!(check.present, report.built.len());
    assert_eq!(check.missing.len(), report.failed.len());
    assert_eq!(check.orphans, vec!["pages/drafts/old-promo.html"]);
}
