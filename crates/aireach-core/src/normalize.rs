//! Input normalization: canonical form used for trigger matching.
//!
//! Trim, lowercase, drop punctuation (anything that is neither a word character nor
//! whitespace), collapse whitespace runs to one space, then NFD-decompose so composed
//! and decomposed accents compare equal.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").expect("static pattern"));
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static pattern"));

/// Canonical form of `raw` for matching. Total; never fails.
///
/// Normalization is idempotent: `normalize(&normalize(s)) == normalize(s)`.
pub fn normalize(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    let stripped = NON_WORD.replace_all(&lowered, "");
    let collapsed = WHITESPACE_RUN.replace_all(&stripped, " ");
    // Removing punctuation can leave edge whitespace behind ("hello !").
    collapsed.trim().nfd().collect()
}

/// NFD form of a trigger key, so keys written with composed accents still match
/// normalized input.
pub(crate) fn decompose(key: &str) -> String {
    key.nfd().collect()
}
