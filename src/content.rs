//! Content fragment cleanup.
//!
//! Fragments usually open with an authoring note for whoever edits them:
//!
//! ```html
//! <!-- Used rack landing page. Keep the inventory table in sync with sales. -->
//! <section class="hero">...</section>
//! ```
//!
//! That note must not leak into the published page. Only a comment that
//! starts at the very first byte is removed, and only one; comments further
//! down the fragment are content and stay.

/// Remove one leading comment block and trim surrounding whitespace.
pub fn clean_fragment(raw: &str) -> &str {
    strip_leading_comment(raw).trim()
}

/// Remove a single `<!-- ... -->` block at the very start of `raw`, along
/// with the whitespace that follows it.
///
/// An unterminated comment is left alone.
pub fn strip_leading_comment(raw: &str) -> &str {
    raw.strip_prefix("<!--")
        .and_then(|rest| rest.find("-->").map(|end| &rest[end + 3..]))
        .map(str::trim_start)
        .unwrap_or(raw)
}
