//! Plain-text rendering of the duration report

use crate::crawler::CategoryFailure;
use crate::output::stats::CategoryStatistics;

const HEADERS: [&str; 5] = [
    "#",
    "Category",
    "Average minutes",
    "Max minutes",
    "Min minutes",
];

/// Renders report rows as an aligned table with a 1-based index column
///
/// Text columns are left-aligned, numeric columns right-aligned.
pub fn render_report(rows: &[CategoryStatistics]) -> String {
    let cells: Vec<[String; 5]> = rows
        .iter()
        .enumerate()
        .map(|(index, row)| {
            [
                (index + 1).to_string(),
                row.category.clone(),
                row.average_minutes.to_string(),
                row.max_minutes.to_string(),
                row.min_minutes.to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut lines = Vec::with_capacity(cells.len() + 2);
    lines.push(format_line(&HEADERS.map(String::from), &widths));
    lines.push(
        widths
            .iter()
            .map(|&w| "-".repeat(w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in &cells {
        lines.push(format_line(row, &widths));
    }

    lines.join("\n")
}

fn format_line(cells: &[String; 5], widths: &[usize; 5]) -> String {
    cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(column, (cell, &width))| {
            if column == 1 {
                format!("{:<width$}", cell, width = width)
            } else {
                format!("{:>width$}", cell, width = width)
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// Prints the report to stdout
pub fn print_report(rows: &[CategoryStatistics]) {
    println!("{}", render_report(rows));
}

/// Prints the categories skipped during the crawl
pub fn print_failures(failures: &[CategoryFailure]) {
    if failures.is_empty() {
        return;
    }

    println!();
    println!("Skipped categories ({}):", failures.len());
    for failure in failures {
        println!(
            "  - {} ({}): {}",
            failure.category.title, failure.category.href, failure.error
        );
    }
}
