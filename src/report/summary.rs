//! Pipeline summary report generation

use std::time::Duration;

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

/// Summary of a complete preparation run
#[derive(Debug, Default)]
pub struct PipelineSummary {
    pub initial_rows: usize,
    pub initial_columns: usize,
    pub final_rows: usize,
    pub final_columns: usize,
    pub columns_dropped_missing: Vec<String>,
    pub columns_dropped_denylist: Vec<String>,
    pub empty_rows_dropped: usize,
    pub outlier_rows_dropped: usize,
    pub columns_normalized: usize,
    load_time: Duration,
    clean_time: Duration,
    outlier_time: Duration,
    normalize_time: Duration,
    report_time: Duration,
}

impl PipelineSummary {
    pub fn new(initial_rows: usize, initial_columns: usize) -> Self {
        Self {
            initial_rows,
            initial_columns,
            final_rows: initial_rows,
            final_columns: initial_columns,
            ..Default::default()
        }
    }

    pub fn set_load_time(&mut self, elapsed: Duration) {
        self.load_time = elapsed;
    }

    pub fn set_clean_time(&mut self, elapsed: Duration) {
        self.clean_time = elapsed;
    }

    pub fn set_outlier_time(&mut self, elapsed: Duration) {
        self.outlier_time = elapsed;
    }

    pub fn set_normalize_time(&mut self, elapsed: Duration) {
        self.normalize_time = elapsed;
    }

    pub fn set_report_time(&mut self, elapsed: Duration) {
        self.report_time = elapsed;
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("PIPELINE SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![
            Cell::new("Initial shape"),
            Cell::new(format!("{} x {}", self.initial_rows, self.initial_columns)),
        ]);

        let dropped_columns =
            self.columns_dropped_missing.len() + self.columns_dropped_denylist.len();
        table.add_row(vec![
            Cell::new("Columns dropped"),
            Cell::new(dropped_columns).fg(if dropped_columns == 0 {
                Color::White
            } else {
                Color::Red
            }),
        ]);

        table.add_row(vec![
            Cell::new("Empty rows dropped"),
            Cell::new(self.empty_rows_dropped),
        ]);

        table.add_row(vec![
            Cell::new("Outlier rows dropped"),
            Cell::new(self.outlier_rows_dropped).fg(if self.outlier_rows_dropped == 0 {
                Color::White
            } else {
                Color::Yellow
            }),
        ]);

        table.add_row(vec![
            Cell::new("Columns normalized"),
            Cell::new(self.columns_normalized),
        ]);

        table.add_row(vec![
            Cell::new("Final shape"),
            Cell::new(format!("{} x {}", self.final_rows, self.final_columns))
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);

        let retention_pct = if self.initial_rows > 0 {
            self.final_rows as f64 / self.initial_rows as f64 * 100.0
        } else {
            0.0
        };
        table.add_row(vec![
            Cell::new("Row retention"),
            Cell::new(format!("{:.1}%", retention_pct))
                .fg(Color::Cyan)
                .add_attribute(Attribute::Bold),
        ]);

        for line in table.to_string().lines() {
            println!("    {}", line);
        }

        if !self.columns_dropped_missing.is_empty() || !self.columns_dropped_denylist.is_empty() {
            println!();
            println!(
                "    {} {}",
                style("📝").cyan(),
                style("DROPPED COLUMNS").white().bold()
            );
            println!("    {}", style("─".repeat(50)).dim());

            if !self.columns_dropped_missing.is_empty() {
                println!();
                println!(
                    "      {} {}:",
                    style("High Missingness").yellow(),
                    style(format!("({})", self.columns_dropped_missing.len())).dim()
                );
                for column in &self.columns_dropped_missing {
                    println!("        {} {}", style("•").dim(), column);
                }
            }

            if !self.columns_dropped_denylist.is_empty() {
                println!();
                println!(
                    "      {} {}:",
                    style("Denylist").yellow(),
                    style(format!("({})", self.columns_dropped_denylist.len())).dim()
                );
                for column in &self.columns_dropped_denylist {
                    println!("        {} {}", style("•").dim(), column);
                }
            }
        }

        println!();
        let mut timing = Table::new();
        timing.load_preset(UTF8_FULL_CONDENSED);
        timing.set_header(vec![
            Cell::new("Step").add_attribute(Attribute::Bold),
            Cell::new("Duration").add_attribute(Attribute::Bold),
        ]);
        for (step, elapsed) in [
            ("Load", self.load_time),
            ("Clean", self.clean_time),
            ("Outlier filter", self.outlier_time),
            ("Normalize", self.normalize_time),
            ("Report", self.report_time),
        ] {
            timing.add_row(vec![
                Cell::new(step),
                Cell::new(format!("{:.2?}", elapsed)),
            ]);
        }
        for line in timing.to_string().lines() {
            println!("    {}", line);
        }
    }
}
