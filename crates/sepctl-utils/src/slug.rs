//! Title-to-filename slugs.

use once_cell::sync::Lazy;
use regex::Regex;

static NON_ALNUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

/// Turn a proposal title into a filename slug: lowercase, runs of anything
/// but `[a-z0-9]` collapsed to a single hyphen, trimmed, at most 40 bytes.
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let replaced = NON_ALNUM.replace_all(&lowered, "-");
    let mut slug = replaced.trim_matches('-').to_string();
    if slug.len() > 40 {
        // Everything left after the replacement is ASCII, so a byte
        // truncation cannot split a character.
        slug.truncate(40);
        slug = slug.trim_end_matches('-').to_string();
    }
    slug
}
