//! EAGLE schematic import.
//!
//! Converts an EAGLE XML schematic into a [`sch_model::Schematic`]: libraries
//! become multi-unit parts, nets become wires and labels, and every sheet is
//! recentred on its page. A file with several sheets becomes a root page of
//! child sheet symbols.
//!
//! ```no_run
//! let schematic = sch_eagle::load("board.sch")?;
//! println!("{} parts", schematic.library.len());
//! # Ok::<(), sch_eagle::ImportError>(())
//! ```

pub mod bus_entry;
pub mod diagnostic;
pub mod error;
pub mod instance;
pub mod library;
pub mod nets;
pub mod session;
pub mod sheet;
pub mod text;
pub mod units;

use std::path::Path;

use sch_model::{PageInfo, Schematic};
use serde::Deserialize;

pub use diagnostic::Diagnostic;
pub use error::{ImportError, Result};
pub use session::ImportSession;

/// Import settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ImportOptions {
    /// Reject files whose first lines do not look like EAGLE XML
    pub check_header: bool,
    /// Initial page size of every sheet
    pub page: PageInfo,
    /// First sheet stamp, the current UNIX time when unset
    pub stamp_seed: Option<u32>,
    /// Name of the part library, the file stem when unset
    pub library_name: Option<String>,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            check_header: true,
            page: PageInfo::A4,
            stamp_seed: None,
            library_name: None,
        }
    }
}

/// Result of a successful import.
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    pub schematic: Schematic,
    pub diagnostics: Vec<Diagnostic>,
    /// `version` of the `<eagle>` root
    pub version: String,
}

#[derive(Debug, Clone, Default)]
pub struct Importer {
    options: ImportOptions,
}

impl Importer {
    pub fn new(options: ImportOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ImportOptions {
        &self.options
    }

    pub fn load(&self, path: impl AsRef<Path>) -> Result<ImportOutcome> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ImportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_str(&content, &path.to_string_lossy())
    }

    /// Import from memory. `name` is the file name used to name sheets.
    pub fn load_str(&self, content: &str, name: &str) -> Result<ImportOutcome> {
        if self.options.check_header && !eagle_xml::check_header(content) {
            return Err(ImportError::InvalidHeader(name.to_string()));
        }

        let doc = eagle_xml::parse_document(content)?;
        let version = eagle_xml::document_version(&doc).to_string();

        let stem = Path::new(name)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| name.to_string());
        let seed = self
            .options
            .stamp_seed
            .unwrap_or_else(|| chrono::Utc::now().timestamp() as u32);
        let library_name = self
            .options
            .library_name
            .clone()
            .unwrap_or_else(|| stem.clone());

        log::debug!("Importing {name} (EAGLE {version})");

        let mut session = ImportSession::new(library_name, seed);
        let root = sheet::load_schematic(&mut session, &doc, &stem, self.options.page)?;
        let (library, diagnostics) = session.into_parts();

        Ok(ImportOutcome {
            schematic: Schematic { root, library },
            diagnostics,
            version,
        })
    }
}

/// Import an EAGLE schematic with default options.
pub fn load(path: impl AsRef<Path>) -> Result<Schematic> {
    Importer::default()
        .load(path)
        .map(|outcome| outcome.schematic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_deserialize_with_defaults() {
        let options: ImportOptions = serde_json::from_str(r#"{"stamp_seed": 42}"#).unwrap();
        assert_eq!(options.stamp_seed, Some(42));
        assert!(options.check_header);
        assert_eq!(options.page, PageInfo::A4);
        assert_eq!(options.library_name, None);
    }

    #[test]
    fn test_header_check_rejects_plain_xml() {
        let err = Importer::default()
            .load_str("<eagle version=\"9.6.2\"/>", "plain.sch")
            .unwrap_err();
        assert!(matches!(err, ImportError::InvalidHeader(name) if name == "plain.sch"));
    }

    #[test]
    fn test_header_check_can_be_disabled() {
        let importer = Importer::new(ImportOptions {
            check_header: false,
            stamp_seed: Some(1),
            ..ImportOptions::default()
        });
        let outcome = importer
            .load_str(
                r#"<eagle version="9.6.2"><drawing><schematic/></drawing></eagle>"#,
                "empty.sch",
            )
            .unwrap();
        assert_eq!(outcome.version, "9.6.2");
        assert!(outcome.schematic.root.is_empty());
        assert_eq!(outcome.schematic.root.file_name, "empty.sch");
        assert_eq!(outcome.schematic.library.name, "empty");
    }

    #[test]
    fn test_structural_errors() {
        let importer = Importer::new(ImportOptions {
            check_header: false,
            ..ImportOptions::default()
        });

        let err = importer
            .load_str(r#"<eagle version="9.6.2"/>"#, "x.sch")
            .unwrap_err();
        assert!(matches!(
            err,
            ImportError::Parse(eagle_xml::EagleError::MissingElement("drawing"))
        ));

        let err = importer.load_str("<eagle", "x.sch").unwrap_err();
        assert!(matches!(err, ImportError::Xml(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = load("/definitely/not/here.sch").unwrap_err();
        assert!(matches!(err, ImportError::Io { .. }));
        assert!(err.to_string().contains("here.sch"));
    }
}
