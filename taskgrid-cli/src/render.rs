//! Terminal output.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use taskgrid_lib::model::{CellValue, Column, Row};
use taskgrid_lib::navigation::{Route, Workspace};
use taskgrid_lib::store::{FetchStatus, TableStore};

/// Prints the menu line, then the active page's table.
pub fn print_workspace(workspace: &Workspace) {
    println!("{}", menu_line(workspace.active_route()));
    print_table(workspace.current());
}

pub fn print_table(store: &TableStore) {
    if let Some(name) = store.sheet_name() {
        println!("Sheet: {}", name);
    }
    if let FetchStatus::Error(message) = store.fetch_status() {
        println!("Last sync failed: {}", message);
    }

    if store.columns().is_empty() && store.rows().is_empty() {
        println!("No columns or rows yet. Add a column with `taskgrid add-column <NAME>`.");
        return;
    }

    println!("{}", build_table(store));
    println!(
        "{} columns, {} rows, {} selected",
        store.columns().len(),
        store.rows().len(),
        store.selection().len()
    );
}

fn menu_line(active: Route) -> String {
    Route::ALL
        .into_iter()
        .map(|route| {
            let mut entry = format!("{} {}", route.label(), route.path());
            if let Some(badge) = route.badge() {
                entry.push_str(&format!(" ({})", badge));
            }
            if route == active {
                format!("[{}]", entry)
            } else {
                entry
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

fn build_table(store: &TableStore) -> Table {
    let mut table = Table::new();
    apply_table_style(&mut table);

    let mut header = vec![header_cell("Row"), header_cell("")];
    header.extend(store.columns().iter().map(column_header));
    table.set_header(header);

    for row in store.rows() {
        let mut cells = vec![
            Cell::new(&row.id).fg(Color::DarkGrey),
            selected_cell(store.is_selected(&row.id)),
        ];
        cells.extend(store.columns().iter().map(|column| value_cell(row, column)));
        table.add_row(cells);
    }
    table
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn column_header(column: &Column) -> Cell {
    header_cell(&format!("{}\n{} · {}", column.name, column.id, column.kind))
}

fn selected_cell(selected: bool) -> Cell {
    if selected {
        Cell::new("*").fg(Color::Cyan).add_attribute(Attribute::Bold)
    } else {
        Cell::new("")
    }
}

fn value_cell(row: &Row, column: &Column) -> Cell {
    match row.get(&column.id) {
        None => Cell::new(""),
        Some(CellValue::Raw(raw)) => Cell::new(raw).fg(Color::DarkGrey),
        Some(value) => Cell::new(value),
    }
}
