use std::path::Path;

use anyhow::Context;
use once_cell::sync::Lazy;
use regex::Regex;

/// One publication pulled from the drop file. Four consecutive lines per
/// record: title, authors, venue, and a line whose last integer is the year.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicationRecord {
    pub title: String,
    pub authors: String,
    pub venue: String,
    pub year: i32,
}

impl PublicationRecord {
    pub fn normalized_title(&self) -> String {
        normalize_title(&self.title)
    }
}

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static PUNCT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").unwrap());
static INT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

/// Lowercase, collapse whitespace runs, and drop punctuation, so that minor
/// formatting differences between the drop file and the documents don't
/// defeat duplicate detection.
pub fn normalize_title(s: &str) -> String {
    let lowered = s.trim().to_lowercase();
    let collapsed = WHITESPACE_RE.replace_all(&lowered, " ");
    PUNCT_RE.replace_all(&collapsed, "").into_owned()
}

/// Year lines come in shapes like `2025` or `285\t2025`; the year is the
/// last integer on the line.
pub fn year_from_line(line: &str) -> Option<i32> {
    INT_RE
        .find_iter(line.trim())
        .last()
        .and_then(|m| m.as_str().parse().ok())
}

/// Split drop-file text into records. Every 4th line starts a new record;
/// groups with an empty title or no parseable year are skipped, and a
/// trailing partial group is ignored.
pub fn parse_temp_list(text: &str) -> Vec<PublicationRecord> {
    let lines: Vec<&str> = text.lines().collect();
    let mut records = Vec::new();
    for chunk in lines.chunks_exact(4) {
        let title = chunk[0].trim();
        if title.is_empty() {
            continue;
        }
        let Some(year) = year_from_line(chunk[3]) else {
            continue;
        };
        records.push(PublicationRecord {
            title: title.to_string(),
            authors: chunk[1].trim().to_string(),
            venue: chunk[2].trim().to_string(),
            year,
        });
    }
    records
}

/// Read and parse the drop file. A missing file is the steady state between
/// announcement batches, so it yields an empty batch rather than an error.
pub fn load_temp_list(path: &Path) -> anyhow::Result<Vec<PublicationRecord>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok(parse_temp_list(&text))
}
