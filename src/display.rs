//! Text rendering of tables with `comfy-table`

use crate::config::DisplayConfig;
use crate::data::cell_value::CellValue;
use crate::data::datatable::Table;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table as TextTable};
use std::fmt;

/// Output for a table without rows or columns
pub const EMPTY_MARKER: &str = "-- empty --";

/// Render one cell with the display settings
pub fn format_cell(value: &CellValue, config: &DisplayConfig) -> String {
    match value {
        CellValue::Missing => config.null_marker.clone(),
        CellValue::Float(f) => format!("{:.*}", config.float_precision, f),
        other => other.to_string(),
    }
}

fn text_cell(value: &CellValue, config: &DisplayConfig) -> Cell {
    let cell = Cell::new(format_cell(value, config));
    if value.is_numeric() {
        cell.set_alignment(CellAlignment::Right)
    } else {
        cell
    }
}

fn header_cell(name: &str) -> Cell {
    Cell::new(name).add_attribute(Attribute::Bold)
}

fn new_text_table() -> TextTable {
    let mut out = TextTable::new();
    out.set_content_arrangement(ContentArrangement::Dynamic);
    out
}

fn shown_rows(table: &Table, config: &DisplayConfig) -> usize {
    config.max_rows.map_or(table.len(), |n| n.min(table.len()))
}

fn with_footer(rendered: String, table: &Table, shown: usize) -> String {
    let hidden = table.len() - shown;
    if hidden == 0 {
        rendered
    } else {
        format!("{rendered}\n... {hidden} more rows")
    }
}

/// One line per row under a header of column names
pub fn render(table: &Table, config: &DisplayConfig) -> String {
    if table.is_empty() || table.column_count() == 0 {
        return EMPTY_MARKER.to_string();
    }

    let mut out = new_text_table();
    out.set_header(table.column_names().iter().map(|c| header_cell(c)));

    let shown = shown_rows(table, config);
    for row in table.rows().take(shown) {
        out.add_row(
            table
                .column_names()
                .iter()
                .map(|c| text_cell(&row[c.as_str()], config)),
        );
    }

    with_footer(out.to_string(), table, shown)
}

/// One line per column: its name followed by its cells
pub fn render_transposed(table: &Table, config: &DisplayConfig) -> String {
    if table.is_empty() || table.column_count() == 0 {
        return EMPTY_MARKER.to_string();
    }

    let shown = shown_rows(table, config);
    let mut out = new_text_table();
    out.set_header(
        std::iter::once(header_cell("Column"))
            .chain((0..shown).map(|i| header_cell(&i.to_string()))),
    );

    for name in table.column_names() {
        let cells = table.values(name).unwrap_or_default();
        out.add_row(
            std::iter::once(header_cell(name))
                .chain(cells.iter().take(shown).map(|v| text_cell(v, config))),
        );
    }

    with_footer(out.to_string(), table, shown)
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self, &DisplayConfig::default()))
    }
}

impl Table {
    /// Print with the default display settings
    pub fn display(&self) {
        println!("{self}");
    }
}
