use regex::Regex;

pub mod full_list;
pub mod homepage;

/// An entry already present in a document, reduced to what merging needs:
/// the dedup key, the year when one could be recovered, and the raw text to
/// re-emit verbatim.
#[derive(Clone, Debug)]
pub struct ExistingEntry {
    pub title_norm: String,
    pub year: Option<i32>,
    pub raw: String,
}

/// Replace the body between `header` and the next `== ` header (or end of
/// document) with `body`. The header line, the whitespace directly after it,
/// and the boundary text stay byte-identical; when the header is absent the
/// document comes back unchanged.
pub fn replace_section(content: &str, header: &str, body: &str) -> String {
    let re = Regex::new(&format!(
        r"(?s)({})\s*\n(.*?)(\n== |\z)",
        regex::escape(header)
    ))
    .unwrap();
    let Some(caps) = re.captures(content) else {
        return content.to_string();
    };
    let Some(old_body) = caps.get(2) else {
        return content.to_string();
    };
    format!(
        "{}{}{}",
        &content[..old_body.start()],
        body,
        &content[old_body.end()..]
    )
}
