use once_cell::sync::Lazy;
use regex::Regex;

/// Binary venue taxonomy for the full publication document. Anything that
/// doesn't look like a journal counts as a conference, arXiv included.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    Conference,
    Journal,
}

/// A venue resolved for display: short tag plus cleaned long form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VenueClassification {
    pub abbreviation: String,
    pub display: String,
}

type RuleFn = fn(&str) -> Option<String>;

/// List of abbreviation rules to iterate over.
///
/// NOTE: Ordering is important here, as it signifies priority. If two rules
/// can abbreviate a given venue string, the first one in this list wins.
static RULES: &[RuleFn] = &[
    parenthesized_acronym,
    arxiv,
    conference_keywords,
    journal_keywords,
    first_word,
];

/// Resolve a raw venue string to its abbreviation and cleaned display form.
pub fn classify(venue: &str, year: i32) -> VenueClassification {
    let venue = venue.trim();
    let abbreviation = RULES
        .iter()
        .find_map(|rule| rule(venue))
        .unwrap_or_else(|| "Venue".to_string());
    VenueClassification {
        abbreviation,
        display: clean_display(venue, year),
    }
}

/// Journal or conference, decided by keyword sniffing alone. Independent of
/// the abbreviation rules above.
pub fn category(venue: &str) -> Category {
    let v = venue.to_lowercase();
    if v.contains("transactions")
        || v.contains("journal")
        || v.contains("computing surveys")
        || v.contains("survey")
    {
        Category::Journal
    } else {
        Category::Conference
    }
}

static PAREN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(([A-Za-z][A-Za-z0-9]+)\)").unwrap());

// A venue like "2025 Winter Simulation Conference (WSC), 558-569" carries its
// own tag. Requiring a leading letter and two characters keeps volume/issue
// noise like "(3)" out.
fn parenthesized_acronym(venue: &str) -> Option<String> {
    PAREN_RE.captures(venue).map(|caps| caps[1].to_uppercase())
}

fn arxiv(venue: &str) -> Option<String> {
    venue
        .to_lowercase()
        .contains("arxiv")
        .then(|| "arXiv".to_string())
}

static CONFERENCE_TAGS: &[(&[&str], &str)] = &[
    (&["SIGKDD", "KDD"], "KDD"),
    (&["Parallel Processing", "ICPP"], "ICPP"),
    (&["Knowledge Graph", "ICKG"], "ICKG"),
    (&["Winter Simulation", "WSC"], "WSC"),
];

static CONFERENCE_WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Z][a-z]+|[A-Z]+").unwrap());

fn conference_keywords(venue: &str) -> Option<String> {
    if !(venue.contains("Proceedings")
        || venue.contains("Conference")
        || venue.contains("Symposium"))
    {
        return None;
    }
    for (needles, tag) in CONFERENCE_TAGS {
        if needles.iter().any(|needle| venue.contains(needle)) {
            return Some((*tag).to_string());
        }
    }
    synthesize(venue, &CONFERENCE_WORD_RE)
}

static JOURNAL_TAGS: &[(&str, &str)] = &[
    ("Parallel and Distributed", "TPDS"),
    ("Networking", "ToN"),
    ("Computing Surveys", "CSUR"),
    ("Internet Technology", "TOIT"),
];

// Stricter than the conference pattern: whole capitalized words only, so
// all-caps runs like "IEEE" don't contribute a letter.
static JOURNAL_WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[A-Z][a-z]*\b").unwrap());

fn journal_keywords(venue: &str) -> Option<String> {
    if !(venue.contains("Transactions")
        || venue.contains("Journal")
        || venue.contains("Computing Surveys"))
    {
        return None;
    }
    for (needle, tag) in JOURNAL_TAGS {
        if venue.contains(needle) {
            return Some((*tag).to_string());
        }
    }
    synthesize(venue, &JOURNAL_WORD_RE)
}

// First letter of each of the first four matched words. Below two letters
// the guess is worthless, so the rule declines and the next one gets a shot.
fn synthesize(venue: &str, word_re: &Regex) -> Option<String> {
    let abbr: String = word_re
        .find_iter(venue)
        .take(4)
        .filter_map(|m| m.as_str().chars().next())
        .collect::<String>()
        .to_uppercase();
    (abbr.chars().count() >= 2).then_some(abbr)
}

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").unwrap());

fn first_word(venue: &str) -> Option<String> {
    WORD_RE
        .find(venue)
        .map(|m| m.as_str().chars().take(6).collect::<String>().to_uppercase())
}

static LEADING_YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}\s+").unwrap());
static TRAILING_RANGE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r",\s*\d+-\d+\s*$").unwrap());
static TRAILING_PP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i),\s*pp\.\s*\d+-\d+\s*$").unwrap());

/// Strip a duplicated leading year and trailing page ranges from the venue
/// text. The renderer re-attaches the year inside the `*ABBR'YYYY*` tag, so
/// keeping it here would print it twice.
pub fn clean_display(venue: &str, year: i32) -> String {
    let s = venue.trim();
    let own_year_re = Regex::new(&format!(r"^{year}\s+")).unwrap();
    let s = own_year_re.replace(s, "");
    let s = LEADING_YEAR_RE.replace(&s, "");
    let s = TRAILING_RANGE_RE.replace(&s, "");
    let s = TRAILING_PP_RE.replace(&s, "");
    s.trim().trim_end_matches(',').trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parenthesized_tag_wins_over_everything() {
        let c = classify("2025 Winter Simulation Conference (WSC), 558-569", 2025);
        assert_eq!(c.abbreviation, "WSC");
        assert_eq!(c.display, "Winter Simulation Conference (WSC)");
    }

    #[test]
    fn numeric_parentheses_are_not_tags() {
        let c = classify("IEEE Transactions on Networking 31 (3)", 2024);
        assert_eq!(c.abbreviation, "ToN");
    }

    #[test]
    fn arxiv_is_spelled_in_house_style() {
        assert_eq!(classify("arXiv preprint arXiv:2501.01234", 2025).abbreviation, "arXiv");
        assert_eq!(classify("ARXIV preprint", 2025).abbreviation, "arXiv");
    }

    #[test]
    fn known_conference_names_use_the_table() {
        assert_eq!(
            classify("Proceedings of the 31st ACM SIGKDD Conference", 2025).abbreviation,
            "KDD"
        );
        assert_eq!(
            classify("International Conference on Parallel Processing", 2024).abbreviation,
            "ICPP"
        );
        assert_eq!(
            classify("IEEE International Conference on Knowledge Graph", 2022).abbreviation,
            "ICKG"
        );
    }

    #[test]
    fn unknown_conference_gets_synthesized_initials() {
        // Proceedings, Elastic, Data, Systems -> first four capitalized words.
        let c = classify("Proceedings of the Elastic Data Systems Conference", 2023);
        assert_eq!(c.abbreviation, "PEDS");
    }

    #[test]
    fn known_journals_use_the_table() {
        assert_eq!(
            classify("IEEE Transactions on Parallel and Distributed Systems", 2024).abbreviation,
            "TPDS"
        );
        assert_eq!(classify("ACM Computing Surveys", 2023).abbreviation, "CSUR");
        assert_eq!(
            classify("ACM Transactions on Internet Technology", 2021).abbreviation,
            "TOIT"
        );
    }

    #[test]
    fn journal_initials_skip_all_caps_runs() {
        // "IEEE" contributes nothing; Transactions, Dependable, Secure do.
        let c = classify("IEEE Transactions on Dependable and Secure Computing", 2024);
        assert_eq!(c.abbreviation, "TDSC");
    }

    #[test]
    fn fallback_truncates_the_first_word() {
        assert_eq!(classify("Middleware demo track", 2020).abbreviation, "MIDDLE");
        assert_eq!(classify("(3) workshop notes", 2020).abbreviation, "3");
        assert_eq!(classify("...", 2020).abbreviation, "Venue");
        assert_eq!(classify("", 2020).abbreviation, "Venue");
    }

    #[test]
    fn display_drops_duplicate_year_and_pages() {
        assert_eq!(
            clean_display("2024 International Symposium on Queues, 11-22", 2024),
            "International Symposium on Queues"
        );
        assert_eq!(
            clean_display("Winter Simulation Conference (WSC), pp. 558-569", 2025),
            "Winter Simulation Conference (WSC)"
        );
        assert_eq!(clean_display("  Plain Venue,  ", 2025), "Plain Venue");
    }

    #[test]
    fn display_keeps_inner_ranges() {
        proptest::proptest!(|(a in 1u32..500, b in 1u32..500)| {
            let venue = format!("Journal of Ranges {a}-{b} Studies");
            proptest::prop_assert_eq!(clean_display(&venue, 2024), venue);
        })
    }

    #[test]
    fn journal_category_is_keyword_driven() {
        assert_eq!(category("IEEE Transactions on Networking"), Category::Journal);
        assert_eq!(category("Journal of Systems"), Category::Journal);
        assert_eq!(category("ACM Computing Surveys"), Category::Journal);
        assert_eq!(category("A Survey Venue"), Category::Journal);
        assert_eq!(category("Winter Simulation Conference (WSC)"), Category::Conference);
        assert_eq!(category("arXiv preprint"), Category::Conference);
        assert_eq!(category("something unrecognizable"), Category::Conference);
    }
}
