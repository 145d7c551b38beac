use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::types::{BatchCounts, BatchResult, SourceSummary};

pub fn print_summary(result: &BatchResult) {
    println!("Output: {}", result.output_dir.display());
    println!("{}", summary_table(result));
    let totals = result.totals();
    if totals.parse_failures > 0 {
        println!("Error: {} records did not convert.", totals.parse_failures);
    }
    if totals.export_failures > 0 {
        println!("Error: {} records did not serialize.", totals.export_failures);
    }
    for source in &result.sources {
        if let Some(error) = &source.error {
            println!("Error: {}: {error}", source.path.display());
        }
    }
    println!(
        "Successfully converted {} records from ATF in {:.3} seconds.",
        totals.success,
        result.elapsed.as_secs_f64()
    );
}

pub fn summary_table(result: &BatchResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Source"),
        header_cell("Records"),
        header_cell("Success"),
        header_cell("Parse failures"),
        header_cell("Export failures"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..=4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for source in &result.sources {
        table.add_row(source_row(source));
    }
    let totals = result.totals();
    let mut total_row = vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
    ];
    total_row.extend(
        count_cells(&totals)
            .into_iter()
            .map(|cell| cell.add_attribute(Attribute::Bold)),
    );
    table.add_row(total_row);
    table
}

fn source_row(source: &SourceSummary) -> Vec<Cell> {
    let name = source.path.display().to_string();
    if source.error.is_some() {
        return vec![
            Cell::new(name).fg(Color::Red),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
        ];
    }
    let mut row = vec![Cell::new(name).fg(Color::Blue)];
    row.extend(count_cells(&source.counts));
    row
}

fn count_cells(counts: &BatchCounts) -> Vec<Cell> {
    vec![
        Cell::new(counts.records),
        success_cell(counts.success),
        count_cell(counts.parse_failures, Color::Red),
        count_cell(counts.export_failures, Color::Yellow),
    ]
}

fn success_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).fg(Color::Green)
    } else {
        dim_cell(count)
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
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

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::Duration;

    use super::*;
    use crate::types::RecordOutcome;

    #[test]
    fn table_has_total_row() {
        let result = BatchResult {
            output_dir: PathBuf::from("out"),
            sources: vec![
                SourceSummary {
                    path: PathBuf::from("a.atf"),
                    counts: BatchCounts::from(RecordOutcome::Success)
                        .merge(BatchCounts::from(RecordOutcome::ParseFailure)),
                    error: None,
                },
                SourceSummary {
                    path: PathBuf::from("missing.atf"),
                    counts: BatchCounts::default(),
                    error: Some("open missing.atf".to_string()),
                },
            ],
            elapsed: Duration::from_millis(5),
        };
        let table = summary_table(&result);
        assert_eq!(table.row_count(), 3);
        let rendered = table.to_string();
        assert!(rendered.contains("TOTAL"));
        assert!(rendered.contains("Parse failures"));
        assert!(result.has_failures());
    }
}
