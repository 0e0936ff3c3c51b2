use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use godata_model::UploadStatus;

use crate::pipeline::ImportResult;

pub fn print_summary(result: &ImportResult) {
    println!("Disease: {}", result.disease);
    println!("Outbreak: {}", result.outbreak_id);
    println!("Assembled cases: {}", result.assembled);
    if result.dry_run {
        println!("Dry run: nothing uploaded");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        header_cell("Notification"),
        header_cell("Status"),
        header_cell("Detail"),
    ]);
    if let Some(column) = table.column_mut(1) {
        column.set_cell_alignment(CellAlignment::Center);
    }

    let mut failed = 0usize;
    for outcome in &result.outcomes {
        let (status_cell, detail) = match outcome.status {
            UploadStatus::Success => (
                Cell::new("success").fg(Color::Green),
                outcome.response_id.clone().unwrap_or_default(),
            ),
            UploadStatus::Error => {
                failed += 1;
                (
                    Cell::new("error").fg(Color::Red),
                    outcome.error_message.clone().unwrap_or_default(),
                )
            }
        };
        table.add_row(vec![
            Cell::new(&outcome.visual_id),
            status_cell,
            Cell::new(detail),
        ]);
    }
    println!("{table}");
    println!(
        "Uploaded: {} succeeded, {} failed",
        result.outcomes.len() - failed,
        failed
    );
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}
