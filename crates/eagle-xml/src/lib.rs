//! EAGLE schematic XML reader: typed records over a `roxmltree` document.
pub mod index;
mod parse;
pub mod types;

pub use index::{ElementKind, NodeMap, count_children, elements, elements_named, map_children};
pub use parse::Record;
pub use types::*;

use roxmltree::{Document, ParsingOptions};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EagleError {
    #[error("XML parse error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("Missing required element: {0}")]
    MissingElement(&'static str),

    #[error("Missing required attribute '{attr}' on element '{element}'")]
    MissingAttribute {
        element: &'static str,
        attr: &'static str,
    },

    #[error("Invalid number '{value}' for attribute '{attr}' on element '{element}'")]
    InvalidNumber {
        element: &'static str,
        attr: &'static str,
        value: String,
    },

    #[error("Invalid value '{value}' for attribute '{attr}' on element '{element}'")]
    InvalidValue {
        element: &'static str,
        attr: &'static str,
        value: String,
    },

    #[error("Unexpected root element '{0}', expected 'eagle'")]
    UnexpectedRoot(String),
}

pub type Result<T> = std::result::Result<T, EagleError>;

/// Check the first three lines of an EAGLE file.
///
/// EAGLE writes the XML declaration, a `DOCTYPE` naming the `eagle` root and
/// the versioned root element on separate lines. Anything else is not an
/// EAGLE file even if it happens to be XML.
pub fn check_header(content: &str) -> bool {
    let mut lines = content.lines().map(str::trim_start);

    let first = lines.next().unwrap_or_default();
    let second = lines.next().unwrap_or_default();
    let third = lines.next().unwrap_or_default();

    first.starts_with("<?xml")
        && second.starts_with("<!DOCTYPE eagle SYSTEM")
        && third.starts_with("<eagle version")
}

/// Parse EAGLE XML into a read-only document tree.
///
/// EAGLE files carry a `DOCTYPE` referencing `eagle.dtd`, so DTDs must be
/// allowed. The external DTD itself is never loaded.
pub fn parse_document(xml: &str) -> Result<Document<'_>> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(xml, options)?;

    let root = doc.root_element();
    if root.tag_name().name() != "eagle" {
        return Err(EagleError::UnexpectedRoot(
            root.tag_name().name().to_string(),
        ));
    }

    Ok(doc)
}

/// Version attribute of the `<eagle>` root, `"0.0"` when absent.
pub fn document_version<'a>(doc: &'a Document<'_>) -> &'a str {
    doc.root_element().attribute("version").unwrap_or("0.0")
}
