use once_cell::sync::Lazy;
use regex::Regex;

use crate::record::PublicationRecord;
use crate::venue;

// The site owner's name as it appears in imported author lists, with and
// without the period after the initial. Anchored to list boundaries so that
// names like "CH Wang" stay untouched.
static PLAIN_ALIAS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(^|,\s*)H Wang(\s*,|\s*$|$)").unwrap());
static DOTTED_ALIAS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(^|,\s*)H\. Wang(\s*,|\s*$|$)").unwrap());

/// Emphasize the site owner in an author list: `H Wang` and `H. Wang`
/// become `*Haoyu Wang*`.
pub fn emphasize_author(authors: &str) -> String {
    let s = authors.trim();
    let s = PLAIN_ALIAS_RE.replace_all(s, "${1}*Haoyu Wang*${2}");
    DOTTED_ALIAS_RE
        .replace_all(&s, "${1}*Haoyu Wang*${2}")
        .into_owned()
}

fn venue_segment(record: &PublicationRecord) -> String {
    let v = venue::classify(&record.venue, record.year);
    format!("*{}'{}*: {}", v.abbreviation, record.year, v.display)
}

/// Render one homepage entry: a `- ` bullet whose three parts (authors,
/// title, venue tag) are joined by the jemdoc line-break token.
pub fn homepage_line(record: &PublicationRecord) -> String {
    format!(
        "- {}\\n {}\\n {}",
        emphasize_author(&record.authors),
        record.title.trim(),
        venue_segment(record)
    )
}

/// Render one full-document entry: an ordered-list block whose author line
/// ends in the break token, followed by title and venue lines.
pub fn full_list_block(record: &PublicationRecord) -> String {
    format!(
        ". {}\\n\n{}\n{}",
        emphasize_author(&record.authors),
        record.title.trim(),
        venue_segment(record)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, authors: &str, venue: &str, year: i32) -> PublicationRecord {
        PublicationRecord {
            title: title.to_string(),
            authors: authors.to_string(),
            venue: venue.to_string(),
            year,
        }
    }

    #[test]
    fn owner_alias_is_emphasized_at_any_list_position() {
        assert_eq!(emphasize_author("H Wang"), "*Haoyu Wang*");
        assert_eq!(emphasize_author("H Wang, B Li"), "*Haoyu Wang*, B Li");
        assert_eq!(emphasize_author("B Li, H Wang"), "B Li, *Haoyu Wang*");
        assert_eq!(
            emphasize_author("J Smith, H Wang, K Lee"),
            "J Smith, *Haoyu Wang*, K Lee"
        );
        assert_eq!(
            emphasize_author("B Li, H. Wang, C Xu"),
            "B Li, *Haoyu Wang*, C Xu"
        );
    }

    #[test]
    fn lookalike_names_are_left_alone() {
        assert_eq!(emphasize_author("CH Wang, B Li"), "CH Wang, B Li");
        assert_eq!(emphasize_author("H Wanger"), "H Wanger");
        assert_eq!(emphasize_author("J Smith, H Wangster"), "J Smith, H Wangster");
    }

    #[test]
    fn other_authors_pass_through() {
        proptest::proptest!(|(s in "[A-Z][a-z]{1,8} [A-Z][a-z]{1,8}")| {
            proptest::prop_assert_eq!(emphasize_author(&s), s);
        })
    }

    #[test]
    fn homepage_line_joins_parts_with_break_tokens() {
        let r = record(
            "Fast Queues",
            "H Wang, B Li",
            "Winter Simulation Conference (WSC)",
            2025,
        );
        assert_eq!(
            homepage_line(&r),
            r"- *Haoyu Wang*, B Li\n Fast Queues\n *WSC'2025*: Winter Simulation Conference (WSC)"
        );
    }

    #[test]
    fn full_list_block_spans_three_lines() {
        let r = record(
            "Fast Queues",
            "H Wang",
            "2025 Winter Simulation Conference (WSC), 558-569",
            2025,
        );
        assert_eq!(
            full_list_block(&r),
            ". *Haoyu Wang*\\n\nFast Queues\n*WSC'2025*: Winter Simulation Conference (WSC)"
        );
    }
}
