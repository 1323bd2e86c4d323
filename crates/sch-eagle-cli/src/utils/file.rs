use std::path::Path;

use anyhow::{Context, Result};
use sch_eagle::{ImportOptions, ImportOutcome, Importer};

use crate::ImportArgs;

/// Build importer options from the command line flags
pub fn import_options(args: &ImportArgs) -> ImportOptions {
    ImportOptions {
        check_header: !args.no_header_check,
        stamp_seed: args.stamp_seed,
        ..ImportOptions::default()
    }
}

/// Import an EAGLE schematic, attaching the file name to any failure
pub fn load_schematic(path: &Path, args: &ImportArgs) -> Result<ImportOutcome> {
    let outcome = Importer::new(import_options(args))
        .load(path)
        .with_context(|| format!("Failed to import EAGLE schematic: {:?}", path))?;
    log::debug!(
        "{} imported with {} diagnostics",
        path.display(),
        outcome.diagnostics.len()
    );
    Ok(outcome)
}
