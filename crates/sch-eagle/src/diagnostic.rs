use sch_model::Point;
use serde::Serialize;

/// A recoverable problem found during import.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// An instance whose part could not be resolved was not placed.
    UnresolvedPart {
        sheet: String,
        part: String,
        reason: String,
    },
    /// A wire ends on a bus where no entry glyph fits; a marker was left.
    BusEntryNeeded { sheet: String, position: Point },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::UnresolvedPart {
                sheet,
                part,
                reason,
            } => write!(f, "{sheet}: skipped instance of {part}: {reason}"),
            Diagnostic::BusEntryNeeded { sheet, position } => {
                write!(f, "{sheet}: bus entry needed at {position}")
            }
        }
    }
}
