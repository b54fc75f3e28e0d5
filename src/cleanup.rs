use once_cell::sync::Lazy;
use regex::Regex;

static DUPLICATE_YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\*[^*]+'\d{4}\*:\s*)\d{4}\s+").unwrap());
static TRAILING_PAGES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m),\s*\d+-\d+\s*$").unwrap());

/// Normalize venue lines across a whole document: drop a year repeated right
/// after the `*ABBR'YYYY*:` tag, and drop page ranges dangling at line ends.
/// Runs over the full text, so it also repairs entries written by hand or by
/// older revisions of the documents.
pub fn clean_venue_lines(content: &str) -> String {
    let content = DUPLICATE_YEAR_RE.replace_all(content, "${1}");
    TRAILING_PAGES_RE.replace_all(&content, "").into_owned()
}
