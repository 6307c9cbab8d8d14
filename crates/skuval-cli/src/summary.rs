use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use skuval_cli::types::ValidationResult;

pub fn print_summary(result: &ValidationResult) {
    println!("Input: {}", result.input.display());
    println!("Master: {}", result.master.display());
    println!(
        "Reference column: {} ({} articles)",
        result.reference_column, result.reference_count
    );
    println!("{}", summary_table(result));
}

pub fn summary_table(result: &ValidationResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Stage"),
        header_cell("Rows in"),
        header_cell("Rows out"),
        header_cell("Dropped"),
    ]);
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
    for index in 1..4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for count in &result.stages {
        table.add_row(vec![
            Cell::new(count.stage.label()),
            Cell::new(count.rows_in),
            Cell::new(count.rows_out),
            dropped_cell(count.dropped()),
        ]);
    }
    let total_dropped = result.input_rows().saturating_sub(result.output_rows);
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(result.input_rows()).add_attribute(Attribute::Bold),
        Cell::new(result.output_rows).add_attribute(Attribute::Bold),
        dropped_cell(total_dropped).add_attribute(Attribute::Bold),
    ]);
    table
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn dropped_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).fg(Color::Yellow)
    } else {
        Cell::new(count).fg(Color::DarkGrey)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}
