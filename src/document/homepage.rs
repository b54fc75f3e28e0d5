use std::collections::HashSet;
use std::path::Path;

use anyhow::Context;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::cleanup;
use crate::document::ExistingEntry;
use crate::format;
use crate::record::{self, PublicationRecord};

/// Most-recent entries kept on the homepage.
const RECENT_CAP: usize = 5;

// The section runs from its header to the pointer at the full list; both
// bounds are kept verbatim by the rewrite.
static SECTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?s)(== Recent Publications \([^)]+\))\n(.*?)(\n\[publication\.html Full list of publications\]\.)",
    )
    .unwrap()
});

static ENTRY_YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"'(\d{4})").unwrap());

/// Scan the "Recent Publications" section: list-marker lines between the
/// header and the "[publication.html" trailer, split on the jemdoc break
/// token into author / title / venue parts. The year comes from the
/// apostrophe-quoted number in the venue part; entries without one keep
/// `None` and later sort as year 0.
pub fn parse_recent(content: &str) -> Vec<ExistingEntry> {
    let mut entries = Vec::new();
    let mut in_section = false;
    for line in content.lines() {
        let stripped = line.trim();
        if stripped.starts_with("== Recent Publications") {
            in_section = true;
            continue;
        }
        if !in_section {
            continue;
        }
        if stripped.starts_with("[publication.html") {
            break;
        }
        if !(stripped.starts_with(". ") || stripped.starts_with("- ")) {
            continue;
        }
        let parts: Vec<&str> = stripped.split("\\n ").collect();
        if parts.len() < 2 {
            continue;
        }
        let year = parts
            .get(2)
            .and_then(|venue_part| ENTRY_YEAR_RE.captures(venue_part))
            .and_then(|caps| caps[1].parse().ok());
        entries.push(ExistingEntry {
            title_norm: record::normalize_title(parts[1].trim()),
            year,
            raw: stripped.to_string(),
        });
    }
    entries
}

struct Candidate {
    title_norm: String,
    year: i32,
    line: String,
}

/// Merge existing entries with the new batch, newest first, keeping the cap.
/// Existing entries win over same-titled batch records, and the batch is
/// deduplicated against itself as it is admitted.
fn merge_recent(existing: &[ExistingEntry], records: &[PublicationRecord]) -> Vec<String> {
    let mut seen: HashSet<String> = existing.iter().map(|e| e.title_norm.clone()).collect();
    let mut candidates: Vec<Candidate> = existing
        .iter()
        .map(|e| Candidate {
            title_norm: e.title_norm.clone(),
            year: e.year.unwrap_or(0),
            line: bullet_marker(&e.raw),
        })
        .collect();
    for record in records {
        let title_norm = record.normalized_title();
        if !seen.insert(title_norm.clone()) {
            continue;
        }
        candidates.push(Candidate {
            title_norm,
            year: record.year,
            line: format::homepage_line(record),
        });
    }
    candidates.sort_by(|a, b| {
        b.year
            .cmp(&a.year)
            .then_with(|| a.title_norm.cmp(&b.title_norm))
    });
    candidates.truncate(RECENT_CAP);
    candidates.into_iter().map(|c| c.line).collect()
}

// Homepage entries render as bullets even when an older revision used the
// ordered-list marker.
fn bullet_marker(raw: &str) -> String {
    match raw.strip_prefix(". ") {
        Some(rest) => format!("- {rest}"),
        None => raw.to_string(),
    }
}

fn rewrite_section(content: &str, lines: &[String]) -> String {
    let body = lines.join("\n");
    SECTION_RE
        .replace_all(content, |caps: &regex::Captures| {
            format!("{}\n{}\n\n{}", &caps[1], body, &caps[3])
        })
        .into_owned()
}

/// Merge `records` into the homepage document on disk: rewrite the section,
/// then run venue-line cleanup over the re-read result in a second write.
pub fn refresh(path: &Path, records: &[PublicationRecord]) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let recent = merge_recent(&parse_recent(&content), records);
    std::fs::write(path, rewrite_section(&content, &recent))
        .with_context(|| format!("failed to write {}", path.display()))?;
    let reread = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    std::fs::write(path, cleanup::clean_venue_lines(&reread))
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
