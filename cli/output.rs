use anyhow::Result;
use byte_unit::{Byte, UnitType};
use colored::*;
use comfy_table::{Cell, CellAlignment, Color, ContentArrangement, Table, presets::UTF8_FULL};
use std::path::Path;
use copydoc_core::GeneratedDocument;

pub fn print_summary_table(documents: &[GeneratedDocument], output_dir: &Path) -> Result<()> {
    println!();
    println!("{}", " Generated Documents ".green().bold().underline());
    println!(
        "{:<20} {}",
        "Output Directory:".green(),
        output_dir.display().to_string().cyan()
    );

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Document").fg(Color::Green),
        Cell::new("File").fg(Color::Green),
        Cell::new("Size").fg(Color::Green),
    ]);
    for doc in documents {
        let file_name = doc
            .path
            .file_name()
            .map_or_else(|| doc.path.display().to_string(), |n| n.to_string_lossy().into_owned());
        table.add_row(vec![
            Cell::new(doc.kind.label()),
            Cell::new(file_name).fg(Color::Cyan),
            Cell::new(readable_size(doc.bytes))
                .set_alignment(CellAlignment::Right)
                .fg(Color::DarkGrey),
        ]);
    }
    println!("{table}");
    println!();
    Ok(())
}

fn readable_size(bytes: usize) -> String {
    Byte::from_u128(bytes as u128)
        .unwrap_or_default()
        .get_appropriate_unit(UnitType::Binary)
        .to_string()
}
