use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use sch_eagle::ImportOutcome;
use sch_model::Screen;
use serde_json::json;

use crate::utils::file as file_utils;
use crate::{ImportArgs, OutputFormat};

pub fn execute(file: &Path, args: &ImportArgs, format: OutputFormat) -> Result<()> {
    let outcome = file_utils::load_schematic(file, args)?;

    match format {
        OutputFormat::Text => output_text(file, &outcome),
        OutputFormat::Json => output_json(&outcome),
    }
}

/// Item counts by kind, ordered by kind name
fn item_counts(screen: &Screen) -> BTreeMap<&'static str, usize> {
    let mut counts = BTreeMap::new();
    for item in &screen.items {
        *counts.entry(item.kind_name()).or_default() += 1;
    }
    counts
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn output_text(file: &Path, outcome: &ImportOutcome) -> Result<()> {
    let schematic = &outcome.schematic;
    let screens = schematic.screens();

    println!("{}", "Schematic Summary".bold());

    let mut summary = new_table();
    summary.add_row(vec![
        Cell::new("File").fg(Color::Cyan),
        Cell::new(file.display()),
    ]);
    summary.add_row(vec![
        Cell::new("EAGLE Version").fg(Color::Cyan),
        Cell::new(&outcome.version),
    ]);
    summary.add_row(vec![
        Cell::new("Sheets").fg(Color::Cyan),
        Cell::new(screens.len()),
    ]);
    summary.add_row(vec![
        Cell::new("Library").fg(Color::Cyan),
        Cell::new(format!(
            "{} ({} parts)",
            schematic.library.name,
            schematic.library.len()
        )),
    ]);
    let components: usize = screens.iter().map(|s| s.components().count()).sum();
    summary.add_row(vec![
        Cell::new("Components").fg(Color::Cyan),
        Cell::new(components),
    ]);
    println!("{summary}");

    println!();
    println!("{}", "Sheets".bold());
    let mut sheets = new_table();
    sheets.set_header(vec!["File", "Page (mils)", "Items"]);
    for screen in &screens {
        let items = item_counts(screen)
            .into_iter()
            .map(|(kind, count)| format!("{kind}: {count}"))
            .collect::<Vec<_>>()
            .join(", ");
        sheets.add_row(vec![
            Cell::new(&screen.file_name),
            Cell::new(format!("{} x {}", screen.page.width, screen.page.height)),
            Cell::new(if items.is_empty() { "-".to_string() } else { items }),
        ]);
    }
    println!("{sheets}");

    if !schematic.library.is_empty() {
        println!();
        println!("{}", "Parts".bold());
        let mut parts = new_table();
        parts.set_header(vec!["Name", "Units", "Pins", "Power"]);
        for (name, part) in &schematic.library.parts {
            parts.add_row(vec![
                Cell::new(name),
                Cell::new(part.unit_count),
                Cell::new(part.pins().count()),
                Cell::new(if part.power { "yes" } else { "" }),
            ]);
        }
        println!("{parts}");
    }

    if !outcome.diagnostics.is_empty() {
        println!();
        println!(
            "{}",
            format!("Diagnostics ({})", outcome.diagnostics.len()).bold()
        );
        for diagnostic in &outcome.diagnostics {
            println!("  {} {diagnostic}", "warning:".yellow().bold());
        }
    }

    Ok(())
}

fn output_json(outcome: &ImportOutcome) -> Result<()> {
    let schematic = &outcome.schematic;

    let sheets: Vec<_> = schematic
        .screens()
        .into_iter()
        .map(|screen| {
            json!({
                "file_name": screen.file_name,
                "page": screen.page,
                "items": item_counts(screen),
            })
        })
        .collect();

    let parts: Vec<_> = schematic
        .library
        .parts
        .values()
        .map(|part| {
            json!({
                "name": part.name,
                "units": part.unit_count,
                "pins": part.pins().count(),
                "power": part.power,
            })
        })
        .collect();

    let info = json!({
        "version": outcome.version,
        "library": schematic.library.name,
        "sheets": sheets,
        "parts": parts,
        "diagnostics": outcome.diagnostics,
    });

    println!("{}", serde_json::to_string_pretty(&info)?);
    Ok(())
}
