use std::path::Path;

use anyhow::{Context, Result};

use crate::ImportArgs;
use crate::utils::file as file_utils;

/// Print the imported document (or just its part library) as JSON.
///
/// Diagnostics are only logged, stdout carries the document alone.
pub fn execute(file: &Path, args: &ImportArgs, library_only: bool) -> Result<()> {
    let outcome = file_utils::load_schematic(file, args)?;

    let json = if library_only {
        serde_json::to_string_pretty(&outcome.schematic.library)
    } else {
        serde_json::to_string_pretty(&outcome.schematic)
    }
    .context("Failed to serialize schematic")?;

    println!("{json}");
    Ok(())
}
