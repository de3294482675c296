use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use redcap_model::{CellError, ErrorKind, Granularity};
use redcap_cli::types::RunResult;

/// Rows listed per error group before the list is cut short.
const MAX_LISTED_ROWS: usize = 8;

pub fn print_summary(result: &RunResult) {
    println!("Data: {}", result.data_path.display());
    println!("Dictionary: {}", result.dictionary_path.display());
    println!("Output: {}", result.output_dir.display());

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rows"),
        header_cell("Columns"),
        header_cell("Dictionary fields"),
        header_cell("Output columns"),
        header_cell("Field errors"),
        header_cell("Cell errors"),
        header_cell("Status"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 0..6 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    align_column(&mut table, 6, CellAlignment::Center);
    table.add_row(vec![
        Cell::new(result.rows),
        Cell::new(result.columns),
        Cell::new(result.dictionary_fields),
        if result.has_errors {
            dim_cell("-")
        } else {
            Cell::new(result.output_columns)
        },
        count_cell(result.summary.field_level, Color::Red),
        count_cell(result.summary.cell_level, Color::Yellow),
        status_cell(result.has_errors),
    ]);
    println!("{table}");

    print_error_table(&result.errors);
    print_outputs(result);
}

fn print_error_table(errors: &[CellError]) {
    if errors.is_empty() {
        return;
    }
    // (field, kind) groups in first-seen order.
    let mut groups: Vec<((&str, ErrorKind), Vec<&CellError>)> = Vec::new();
    for error in errors {
        let key = (error.field.as_str(), error.kind);
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, members)) => members.push(error),
            None => groups.push((key, vec![error])),
        }
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Error"),
        header_cell("Scope"),
        header_cell("Count"),
        header_cell("Rows"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Right);
    for ((field, kind), members) in groups {
        table.add_row(vec![
            Cell::new(field).fg(Color::Blue).add_attribute(Attribute::Bold),
            Cell::new(kind),
            scope_cell(kind.granularity()),
            Cell::new(members.len()),
            rows_cell(&members),
        ]);
    }
    println!();
    println!("Errors:");
    println!("{table}");
}

fn print_outputs(result: &RunResult) {
    let outputs = &result.outputs;
    let written = [
        ("Import CSV", &outputs.import_csv),
        ("Error workbook", &outputs.error_workbook),
        ("Error log", &outputs.error_log),
        ("JSON report", &outputs.json_report),
    ];
    if written.iter().all(|(_, path)| path.is_none()) {
        println!("No files written.");
        return;
    }
    for (label, path) in written {
        if let Some(path) = path {
            println!("{label}: {}", path.display());
        }
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn rows_cell(members: &[&CellError]) -> Cell {
    let rows: Vec<String> = members
        .iter()
        .filter_map(|e| e.row)
        .take(MAX_LISTED_ROWS)
        .map(|row| row.to_string())
        .collect();
    if rows.is_empty() {
        return dim_cell("all");
    }
    let listed = rows.join(", ");
    if members.len() > MAX_LISTED_ROWS {
        Cell::new(format!("{listed}, ..."))
    } else {
        Cell::new(listed)
    }
}

fn scope_cell(granularity: Granularity) -> Cell {
    match granularity {
        Granularity::Field => Cell::new("FIELD").fg(Color::Red),
        Granularity::Cell => Cell::new("CELL").fg(Color::Yellow),
    }
}

fn status_cell(has_errors: bool) -> Cell {
    if has_errors {
        Cell::new("ERRORS")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new("CLEAN")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

pub fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
