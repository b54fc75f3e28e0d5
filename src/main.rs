use clap::Parser;
use owo_colors::OwoColorize;

use crate::cli::{Cli, INDEX_DOC, PUBLICATION_DOC, SiteFiles, TEMP_LIST};

mod cleanup;
mod cli;
mod document;
mod format;
mod record;
mod venue;

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    let files = SiteFiles::locate(&args.dir);

    let records = record::load_temp_list(&files.temp_list)?;
    if records.is_empty() {
        println!("No entries in {TEMP_LIST}");
        return Ok(());
    }

    document::homepage::refresh(&files.index, &records)?;
    println!("Updated {INDEX_DOC} Recent Publications (top 5).");

    let report = document::full_list::merge_new_entries(&files.publications, &records)?;
    for title in &report.conference {
        eprintln!("{} {title} (conference)", "+".green());
    }
    for title in &report.journal {
        eprintln!("{} {title} (journal)", "+".green());
    }
    if report.is_empty() {
        println!("No new publication entries to add (all duplicates); venue lines cleaned.");
    } else {
        println!(
            "Updated {PUBLICATION_DOC}: added {} conference, {} journal.",
            report.conference.len(),
            report.journal.len()
        );
    }
    Ok(())
}
