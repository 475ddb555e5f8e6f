use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use dwh_cli::commands::{CheckOutcome, TableStatus};
use dwh_model::LayerLoadReport;
use dwh_validate::{Issue, QualityReport, Severity};

pub fn print_load_summary(reports: &[LayerLoadReport]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Rows In"),
        header_cell("Rows Out"),
        header_cell("Duration (ms)"),
        header_cell("Source SHA-256"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);

    for report in reports {
        for summary in &report.tables {
            table.add_row(vec![
                table_cell(&summary.table.to_string()),
                Cell::new(summary.rows_in),
                Cell::new(summary.rows_out),
                Cell::new(summary.duration_ms),
                match &summary.source {
                    Some(source) => dim_cell(short_hash(&source.sha256)),
                    None => dim_cell("-"),
                },
            ]);
        }
        if let Some(failure) = &report.failure {
            table.add_row(vec![
                Cell::new(failure.table.map_or_else(|| "-".to_string(), |t| t.to_string()))
                    .fg(Color::Red)
                    .add_attribute(Attribute::Bold),
                dim_cell("-"),
                dim_cell("-"),
                dim_cell("-"),
                Cell::new(format!("FAILED ({})", failure.state)).fg(Color::Red),
            ]);
        }
        table.add_row(vec![
            Cell::new(format!("TOTAL {}", report.layer))
                .fg(Color::Cyan)
                .add_attribute(Attribute::Bold),
            dim_cell("-"),
            Cell::new(report.rows_out()).add_attribute(Attribute::Bold),
            Cell::new(report.total_duration_ms).add_attribute(Attribute::Bold),
            dim_cell("-"),
        ]);
    }
    println!("{table}");
    print_failures(reports);
}

fn print_failures(reports: &[LayerLoadReport]) {
    for report in reports {
        let Some(failure) = &report.failure else {
            continue;
        };
        eprintln!("Error occurred during loading {} layer", report.layer);
        eprintln!("  Error Message: {}", failure.message);
        eprintln!("  Error Number: {}", failure.code);
        eprintln!("  Error State: {}", failure.state);
    }
}

pub fn print_check_summary(outcome: &CheckOutcome) {
    if !outcome.loads.is_empty() {
        print_load_summary(&outcome.loads);
    }
    if outcome.reports.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Errors"),
        header_cell("Warnings"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for report in &outcome.reports {
        table.add_row(vec![
            table_cell(&report.table.to_string()),
            count_cell(report.error_count(), Color::Red),
            count_cell(report.warning_count(), Color::Yellow),
        ]);
    }
    println!("{table}");
    print_issue_table(&outcome.reports);
}

fn print_issue_table(reports: &[QualityReport]) {
    let mut issues: Vec<(&QualityReport, &Issue)> = reports
        .iter()
        .flat_map(|report| report.issues.iter().map(move |issue| (report, issue)))
        .collect();
    if issues.is_empty() {
        return;
    }
    issues.sort_by(|a, b| {
        a.1.severity()
            .cmp(&b.1.severity())
            .then_with(|| a.0.table.cmp(&b.0.table))
            .then_with(|| a.1.rule_id().cmp(b.1.rule_id()))
    });
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Severity"),
        header_cell("Column"),
        header_cell("Rule"),
        header_cell("Count"),
        header_cell("Category"),
        header_cell("Message"),
        header_cell("Examples"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Center);
    align_column(&mut table, 4, CellAlignment::Right);
    for (report, issue) in issues {
        table.add_row(vec![
            table_cell(&report.table.to_string()),
            severity_cell(issue.severity()),
            Cell::new(issue.column()),
            Cell::new(issue.rule_id()),
            Cell::new(issue.count()).fg(severity_color(issue.severity())),
            Cell::new(issue.category().label()),
            Cell::new(issue.message()),
            example_cell(issue.samples()),
        ]);
    }
    println!();
    println!("Issues:");
    println!("{table}");
}

pub fn print_tables(statuses: &[TableStatus]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Source"),
        header_cell("Bronze Rows"),
        header_cell("Silver Rows"),
        header_cell("Last Loaded"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for status in statuses {
        let source = Cell::new(status.source_path.display());
        table.add_row(vec![
            Cell::new(format!("{}\n{}", status.table, status.table.description())),
            if status.source_present {
                source
            } else {
                source.fg(Color::Red)
            },
            optional_cell(status.bronze.as_ref().map(|entry| entry.rows)),
            optional_cell(status.silver.as_ref().map(|entry| entry.rows)),
            optional_cell(
                status
                    .last_loaded()
                    .map(|at| at.format("%Y-%m-%d %H:%M:%S")),
            ),
        ]);
    }
    println!("{table}");
}

fn short_hash(sha256: &str) -> &str {
    sha256.get(..12).unwrap_or(sha256)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn optional_cell<T: ToString>(value: Option<T>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

fn apply_table_style(table: &mut Table) {
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
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(120);
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(200);
    if table.column_count() >= 8 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Fixed(28)),
            ColumnConstraint::UpperBoundary(Width::Fixed(9)),
            ColumnConstraint::UpperBoundary(Width::Fixed(24)),
            ColumnConstraint::UpperBoundary(Width::Fixed(7)),
            ColumnConstraint::LowerBoundary(Width::Fixed(5)),
            ColumnConstraint::UpperBoundary(Width::Fixed(12)),
            ColumnConstraint::UpperBoundary(Width::Percentage(40)),
            ColumnConstraint::UpperBoundary(Width::Percentage(30)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn severity_cell(severity: Severity) -> Cell {
    match severity {
        Severity::Error => Cell::new("ERROR")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        Severity::Warning => Cell::new("WARN").fg(Color::Yellow),
    }
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Error => Color::Red,
        Severity::Warning => Color::Yellow,
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn table_cell(name: &str) -> Cell {
    Cell::new(name)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn example_cell(samples: &[String]) -> Cell {
    if samples.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(samples.join(", "))
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
