use std::collections::HashSet;
use std::path::Path;

use anyhow::Context;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::cleanup;
use crate::document::{self, ExistingEntry};
use crate::format;
use crate::record::{self, PublicationRecord};
use crate::venue::{self, Category};

const CONFERENCE_HEADER: &str = "== Conference publications";
const JOURNAL_HEADER: &str = "== Journal publications";

/// Entries under the conference and journal headers, in document order.
pub struct Sections {
    pub conference: Vec<ExistingEntry>,
    pub journal: Vec<ExistingEntry>,
}

/// Titles appended to each section in one run.
pub struct MergeReport {
    pub conference: Vec<String>,
    pub journal: Vec<String>,
}

impl MergeReport {
    pub fn is_empty(&self) -> bool {
        self.conference.is_empty() && self.journal.is_empty()
    }
}

/// Scan the full publication document into its two sections. A block starts
/// at a `. ` marker and runs to the next marker or the next `== ` header;
/// comment lines never join a block, and blocks outside the two known
/// sections are dropped.
pub fn parse_sections(content: &str) -> Sections {
    let mut sections = Sections {
        conference: Vec::new(),
        journal: Vec::new(),
    };
    let mut current: Option<Category> = None;
    let mut block: Vec<&str> = Vec::new();

    for line in content.lines() {
        let stripped = line.trim();
        if stripped.starts_with("== ") {
            flush(&mut sections, current, &mut block);
            current = if stripped.starts_with("== Conference") {
                Some(Category::Conference)
            } else if stripped.starts_with("== Journal") {
                Some(Category::Journal)
            } else {
                None
            };
            continue;
        }
        if stripped.starts_with(". ") {
            flush(&mut sections, current, &mut block);
            block.push(line);
            continue;
        }
        if !block.is_empty() && current.is_some() && !stripped.starts_with('#') {
            block.push(line);
        }
    }
    flush(&mut sections, current, &mut block);
    sections
}

fn flush(sections: &mut Sections, section: Option<Category>, block: &mut Vec<&str>) {
    if block.is_empty() {
        return;
    }
    let text = block.join("\n");
    block.clear();
    let Some(section) = section else {
        return;
    };
    let (title_norm, year) = title_and_year(&text);
    let entry = ExistingEntry {
        title_norm,
        year,
        raw: text,
    };
    match section {
        Category::Conference => sections.conference.push(entry),
        Category::Journal => sections.journal.push(entry),
    }
}

static FOUR_DIGITS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d{4})").unwrap());

/// Recover the dedup key and year from a block: the title is every line
/// between the author line and the first line carrying a 4-digit run
/// (normally the venue line). Legacy single-physical-line blocks fall back
/// to the text after the first jemdoc break token.
fn title_and_year(block: &str) -> (String, Option<i32>) {
    let lines: Vec<&str> = block
        .split('\n')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    if lines.is_empty() {
        return (String::new(), None);
    }
    let mut year = None;
    let mut title_parts: Vec<&str> = Vec::new();
    for line in &lines[1..] {
        if let Some(caps) = FOUR_DIGITS_RE.captures(line) {
            year = caps[1].parse().ok();
            break;
        }
        title_parts.push(line);
    }
    let mut title = title_parts.join(" ");
    if title.is_empty() && lines.len() >= 2 {
        if let Some((_, rest)) = lines[0].split_once("\\n") {
            let rest = rest.trim();
            if !rest.is_empty() && !FOUR_DIGITS_RE.is_match(rest) {
                title = rest.to_string();
            }
        }
    }
    (record::normalize_title(&title), year)
}

struct Block {
    year: i32,
    raw: String,
}

// Existing blocks keep their document order and fresh records append after
// them in batch order; the year sort is stable, so ties keep exactly that
// arrangement.
fn assemble(existing: &[ExistingEntry], fresh: &[&PublicationRecord]) -> (Vec<Block>, Vec<String>) {
    let mut seen: HashSet<String> = existing.iter().map(|e| e.title_norm.clone()).collect();
    let mut blocks: Vec<Block> = existing
        .iter()
        .map(|e| Block {
            year: e.year.unwrap_or(0),
            raw: e.raw.clone(),
        })
        .collect();
    let mut added = Vec::new();
    for record in fresh {
        let title_norm = record.normalized_title();
        if title_norm.is_empty() || !seen.insert(title_norm) {
            continue;
        }
        blocks.push(Block {
            year: record.year,
            raw: format::full_list_block(record),
        });
        added.push(record.title.clone());
    }
    blocks.sort_by(|a, b| b.year.cmp(&a.year));
    (blocks, added)
}

fn serialize(blocks: &[Block]) -> String {
    let mut lines: Vec<&str> = Vec::new();
    for block in blocks {
        lines.extend(block.raw.trim().split('\n'));
    }
    lines.join("\n")
}

/// Merge the batch into the full publication document on disk. Records whose
/// normalized title already appears in either section are dropped; the rest
/// are appended to their category's section and both sections are rewritten
/// newest-first, with a venue-line cleanup pass in a follow-up write. With
/// nothing to add, only the cleanup pass runs.
pub fn merge_new_entries(
    path: &Path,
    records: &[PublicationRecord],
) -> anyhow::Result<MergeReport> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let sections = parse_sections(&content);

    let known: HashSet<&str> = sections
        .conference
        .iter()
        .chain(sections.journal.iter())
        .filter(|e| !e.title_norm.is_empty())
        .map(|e| e.title_norm.as_str())
        .collect();

    let mut new_conference: Vec<&PublicationRecord> = Vec::new();
    let mut new_journal: Vec<&PublicationRecord> = Vec::new();
    for record in records {
        if known.contains(record.normalized_title().as_str()) {
            continue;
        }
        match venue::category(&record.venue) {
            Category::Conference => new_conference.push(record),
            Category::Journal => new_journal.push(record),
        }
    }

    if new_conference.is_empty() && new_journal.is_empty() {
        std::fs::write(path, cleanup::clean_venue_lines(&content))
            .with_context(|| format!("failed to write {}", path.display()))?;
        return Ok(MergeReport {
            conference: Vec::new(),
            journal: Vec::new(),
        });
    }

    let (conference_blocks, added_conference) = assemble(&sections.conference, &new_conference);
    let (journal_blocks, added_journal) = assemble(&sections.journal, &new_journal);

    let updated =
        document::replace_section(&content, CONFERENCE_HEADER, &serialize(&conference_blocks));
    let updated =
        document::replace_section(&updated, JOURNAL_HEADER, &serialize(&journal_blocks));
    std::fs::write(path, &updated)
        .with_context(|| format!("failed to write {}", path.display()))?;
    let reread = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    std::fs::write(path, cleanup::clean_venue_lines(&reread))
        .with_context(|| format!("failed to write {}", path.display()))?;

    Ok(MergeReport {
        conference: added_conference,
        journal: added_journal,
    })
}
