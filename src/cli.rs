use std::path::{Path, PathBuf};

use clap::Parser;

/// Drop file with newly announced publications, 4 lines per record.
pub const TEMP_LIST: &str = "temp-publication-list.txt";
/// Homepage document carrying the capped "Recent Publications" section.
pub const INDEX_DOC: &str = "index.jemdoc";
/// Full publication document with the conference and journal sections.
pub const PUBLICATION_DOC: &str = "publication.jemdoc";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Site root holding the jemdoc sources and the drop file
    #[arg(value_name = "DIR", default_value = ".")]
    pub dir: PathBuf,
}

/// The three fixed paths the tool works on. File names are not configurable;
/// only the site root moves.
#[derive(Debug)]
pub struct SiteFiles {
    pub temp_list: PathBuf,
    pub index: PathBuf,
    pub publications: PathBuf,
}

impl SiteFiles {
    pub fn locate(dir: &Path) -> Self {
        Self {
            temp_list: dir.join(TEMP_LIST),
            index: dir.join(INDEX_DOC),
            publications: dir.join(PUBLICATION_DOC),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dir_defaults_to_the_working_directory() {
        let cli = Cli::parse_from(["publist"]);
        assert_eq!(cli.dir, PathBuf::from("."));
    }

    #[test]
    fn dir_can_be_given_as_the_only_argument() {
        let cli = Cli::parse_from(["publist", "/srv/www/site"]);
        assert_eq!(cli.dir, PathBuf::from("/srv/www/site"));
    }

    #[test]
    fn locate_joins_the_fixed_names() {
        let tmp = tempfile::tempdir().expect("tmp dir");
        let files = SiteFiles::locate(tmp.path());
        assert_eq!(files.temp_list, tmp.path().join(TEMP_LIST));
        assert_eq!(files.index, tmp.path().join(INDEX_DOC));
        assert_eq!(files.publications, tmp.path().join(PUBLICATION_DOC));
    }

    #[test]
    fn locate_preserves_relative_roots() {
        proptest::proptest!(|(dir in "[a-z][a-z0-9_-]{0,16}")| {
            let files = SiteFiles::locate(Path::new(&dir));
            proptest::prop_assert_eq!(files.temp_list, PathBuf::from(&dir).join(TEMP_LIST));
            proptest::prop_assert_eq!(files.index, PathBuf::from(&dir).join(INDEX_DOC));
        })
    }
}
