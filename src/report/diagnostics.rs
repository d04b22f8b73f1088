//! Console rendering of the stage diagnostics
//!
//! The pipeline stages never print; they hand back diagnostic records and
//! this module renders them, keeping the transformation testable without
//! console coupling.

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Table};
use console::style;

use crate::pipeline::{CleanReport, ColumnBounds, ScalingInfo};
use crate::report::charts::AgeGroupCount;

fn print_indented(table: &Table) {
    for line in table.to_string().lines() {
        println!("    {}", line);
    }
}

fn section(title: &str) {
    println!();
    println!("    {}", style(title).white().bold());
}

fn missing_table(counts: &[(String, usize)]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Column").add_attribute(Attribute::Bold),
        Cell::new("Missing").add_attribute(Attribute::Bold),
    ]);
    for (name, count) in counts {
        table.add_row(vec![Cell::new(name), Cell::new(count)]);
    }
    table
}

/// Render the cleaning diagnostics in the order the steps ran.
pub fn print_clean_report(report: &CleanReport) {
    println!(
        "      Shape of the data: {} rows x {} columns",
        style(report.shape_before.0).yellow().bold(),
        style(report.shape_before.1).yellow().bold()
    );

    section("Missing values before placeholder replacement");
    print_indented(&missing_table(&report.missing_before));

    println!();
    println!(
        "      Replaced {} placeholder cells with missing markers",
        style(report.placeholder_cells).yellow().bold()
    );

    section("Missing values after placeholder replacement");
    print_indented(&missing_table(&report.missing_after));

    section("Column data types");
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Column").add_attribute(Attribute::Bold),
        Cell::new("Dtype").add_attribute(Attribute::Bold),
    ]);
    for (name, dtype) in &report.dtypes {
        table.add_row(vec![Cell::new(name), Cell::new(dtype)]);
    }
    print_indented(&table);

    if report.dropped_high_missing.is_empty() {
        println!();
        println!("      No columns exceed the missing-fraction threshold");
    } else {
        section("Columns dropped for high missingness");
        for (name, fraction) in &report.dropped_high_missing {
            println!(
                "        {} {} {}",
                style("•").dim(),
                name,
                style(format!("({:.1}% missing)", fraction * 100.0)).dim()
            );
        }
    }

    if !report.dropped_denylist.is_empty() {
        section("Denylisted columns removed");
        for name in &report.dropped_denylist {
            println!("        {} {}", style("•").dim(), name);
        }
    }

    println!();
    println!(
        "      Dropped {} fully-empty row(s)",
        style(report.empty_rows_dropped).yellow().bold()
    );

    section("Summary statistics of numerical columns");
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Column").add_attribute(Attribute::Bold),
        Cell::new("Count").add_attribute(Attribute::Bold),
        Cell::new("Mean").add_attribute(Attribute::Bold),
        Cell::new("Std").add_attribute(Attribute::Bold),
        Cell::new("Min").add_attribute(Attribute::Bold),
        Cell::new("25%").add_attribute(Attribute::Bold),
        Cell::new("50%").add_attribute(Attribute::Bold),
        Cell::new("75%").add_attribute(Attribute::Bold),
        Cell::new("Max").add_attribute(Attribute::Bold),
    ]);
    for s in &report.numeric_summaries {
        table.add_row(vec![
            Cell::new(&s.column),
            Cell::new(s.count),
            Cell::new(format!("{:.3}", s.mean)),
            Cell::new(format!("{:.3}", s.std)),
            Cell::new(format!("{:.3}", s.min)),
            Cell::new(format!("{:.3}", s.q25)),
            Cell::new(format!("{:.3}", s.median)),
            Cell::new(format!("{:.3}", s.q75)),
            Cell::new(format!("{:.3}", s.max)),
        ]);
    }
    print_indented(&table);

    println!();
    println!(
        "      Shape after cleaning: {} rows x {} columns",
        style(report.shape_after.0).yellow().bold(),
        style(report.shape_after.1).yellow().bold()
    );
}

/// Render the per-column outlier bounds and their effect.
pub fn print_outlier_bounds(bounds: &[ColumnBounds]) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Column").add_attribute(Attribute::Bold),
        Cell::new("Q1").add_attribute(Attribute::Bold),
        Cell::new("Q3").add_attribute(Attribute::Bold),
        Cell::new("Lower").add_attribute(Attribute::Bold),
        Cell::new("Upper").add_attribute(Attribute::Bold),
        Cell::new("Rows removed").add_attribute(Attribute::Bold),
    ]);
    for b in bounds {
        table.add_row(vec![
            Cell::new(&b.column),
            Cell::new(format!("{:.3}", b.q1)),
            Cell::new(format!("{:.3}", b.q3)),
            Cell::new(format!("{:.3}", b.lower)),
            Cell::new(format!("{:.3}", b.upper)),
            Cell::new(b.rows_removed),
        ]);
    }
    print_indented(&table);
}

/// Render the observed ranges used for min-max scaling.
pub fn print_scaling_info(scaling: &[ScalingInfo]) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Column").add_attribute(Attribute::Bold),
        Cell::new("Min").add_attribute(Attribute::Bold),
        Cell::new("Max").add_attribute(Attribute::Bold),
        Cell::new("Note").add_attribute(Attribute::Bold),
    ]);
    for s in scaling {
        table.add_row(vec![
            Cell::new(&s.column),
            Cell::new(format!("{:.3}", s.min)),
            Cell::new(format!("{:.3}", s.max)),
            Cell::new(if s.constant { "constant, mapped to 0" } else { "" }),
        ]);
    }
    print_indented(&table);
}

/// Render the readmission counts per age group.
pub fn print_age_counts(counts: &[AgeGroupCount]) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Age group").add_attribute(Attribute::Bold),
        Cell::new("Readmitted cases").add_attribute(Attribute::Bold),
    ]);
    for c in counts {
        table.add_row(vec![Cell::new(&c.age_group), Cell::new(c.readmitted)]);
    }
    print_indented(&table);
}
