use std::path::PathBuf;

use eagle_xml::EagleError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Unable to read file '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("'{0}' is not an EAGLE schematic")]
    InvalidHeader(String),

    #[error("XML parse error: {0}")]
    Xml(roxmltree::Error),

    #[error(transparent)]
    Parse(EagleError),

    #[error("Symbol '{symbol}' is not defined in library '{library}'")]
    UnknownSymbol { library: String, symbol: String },
}

impl From<EagleError> for ImportError {
    fn from(err: EagleError) -> Self {
        match err {
            EagleError::Xml(e) => ImportError::Xml(e),
            other => ImportError::Parse(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, ImportError>;
