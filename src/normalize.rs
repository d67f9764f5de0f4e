//! Name normalisation for album folders and track files.
//!
//! Folder names in a typical library carry decoration that breaks remote
//! searches: `[1999] Album (Deluxe Edition) [2 CD]`. [`normalize`] strips it
//! back to `Album`.

use std::sync::LazyLock;

use regex::Regex;

/// Leading `[1999]` or `(1999)` plus the whitespace after it.
static YEAR_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\[(]\d{4}[\])]\s*").expect("valid year prefix pattern"));

/// Any `(...)` span, shortest match, across line breaks.
static PAREN_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\(.*?\)").expect("valid paren pattern"));

/// Any `[...]` span, shortest match, across line breaks.
static BRACKET_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\[.*?\]").expect("valid bracket pattern"));

/// Recover a canonical work title from a folder or file name.
///
/// Removes one leading year marker, then every parenthesised and bracketed
/// span, then collapses whitespace. Total and idempotent.
pub fn normalize(raw_name: &str) -> String {
    let name = YEAR_PREFIX.replace(raw_name, "");
    let name = PAREN_SPAN.replace_all(&name, "");
    let name = BRACKET_SPAN.replace_all(&name, "");
    collapse_whitespace(&name)
}

/// Title guess for a loose track, from its file stem.
///
/// `Cosmonkey-Rainy` becomes `Cosmonkey Rainy`.
pub fn title_from_stem(stem: &str) -> String {
    collapse_whitespace(&stem.replace(['_', '-'], " "))
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
