//! Readmit: Encounter Data Preparation CLI
//!
//! A command-line tool that cleans a tabular medical-encounter dataset,
//! removes outliers, rescales its numeric features and renders descriptive
//! charts.

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;

use readmit::cli::Cli;
use readmit::pipeline::{clean, filter_outliers, load_dataset, normalize_min_max, save_dataset};
use readmit::report::{
    class_distribution, export_run_report, print_age_counts, print_clean_report,
    print_outlier_bounds, print_scaling_info, readmissions_by_age, render_class_distribution,
    render_numeric_boxplots, render_readmissions_by_age, ExportParams, PipelineSummary,
};
use readmit::utils::{
    create_spinner, finish_with_success, print_banner, print_completion, print_config, print_info,
    print_step_header, print_step_time, print_success,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.pipeline_config()?;

    // Print styled banner
    print_banner(env!("CARGO_PKG_VERSION"));

    // Print configuration card
    print_config(
        &cli.input,
        &config.target_column,
        &cli.charts_dir,
        config.iqr_multiplier,
        config.missing_threshold,
    );

    // Step 1: Load dataset
    print_step_header(1, "Load Dataset");

    let step_start = Instant::now();
    let spinner = create_spinner("Reading input file...");
    let df = load_dataset(&cli.input, cli.infer_schema_length)?;
    finish_with_success(&spinner, "Dataset loaded");

    let (rows, cols) = df.shape();
    let memory_mb = df.estimated_size() as f64 / (1024.0 * 1024.0);
    println!("\n    {} Dataset Statistics:", style("✧").cyan());
    println!("      Rows: {}", rows);
    println!("      Columns: {}", cols);
    println!("      Estimated memory: {:.2} MB", memory_mb);

    let mut summary = PipelineSummary::new(rows, cols);
    summary.set_load_time(step_start.elapsed());
    print_step_time(step_start.elapsed());

    // Step 2: Clean
    print_step_header(2, "Clean Dataset");

    let step_start = Instant::now();
    let (df, clean_report) = clean(df, &config)?;
    print_clean_report(&clean_report);
    print_success("Cleaning complete");

    summary.columns_dropped_missing = clean_report
        .dropped_high_missing
        .iter()
        .map(|(name, _)| name.clone())
        .collect();
    summary.columns_dropped_denylist = clean_report.dropped_denylist.clone();
    summary.empty_rows_dropped = clean_report.empty_rows_dropped;
    summary.set_clean_time(step_start.elapsed());
    print_step_time(step_start.elapsed());

    // Step 3: Outlier filtering (sequential per configured column order)
    print_step_header(3, "Outlier Filtering");

    let step_start = Instant::now();
    let rows_before = df.height();
    let (df, outlier_bounds) =
        filter_outliers(df, &config.numeric_columns, config.iqr_multiplier)?;
    print_outlier_bounds(&outlier_bounds);

    summary.outlier_rows_dropped = rows_before - df.height();
    if summary.outlier_rows_dropped == 0 {
        print_info("No rows fell outside the IQR bounds");
    } else {
        println!(
            "      Removed {} row(s) outside the IQR bounds",
            style(summary.outlier_rows_dropped).yellow().bold()
        );
    }
    print_success("Outlier filtering complete");
    summary.set_outlier_time(step_start.elapsed());
    print_step_time(step_start.elapsed());

    // Boxplots are drawn on the filtered, still-unscaled values
    if !cli.no_charts {
        std::fs::create_dir_all(&cli.charts_dir).with_context(|| {
            format!("Failed to create charts directory: {}", cli.charts_dir.display())
        })?;
        let path = cli.charts_dir.join("numeric_boxplots.svg");
        render_numeric_boxplots(&df, &config.numeric_columns, &path)?;
        print_success(&format!("Saved {}", path.display()));
    }

    // Step 4: Normalize
    print_step_header(4, "Feature Normalization");

    let step_start = Instant::now();
    let (mut df, scaling) = normalize_min_max(df, &config.numeric_columns)?;
    print_scaling_info(&scaling);
    print_success("Normalization complete");

    summary.columns_normalized = scaling.len();
    summary.set_normalize_time(step_start.elapsed());
    print_step_time(step_start.elapsed());

    // Step 5: Report & visualize
    print_step_header(5, "Report & Charts");

    let step_start = Instant::now();
    let (final_rows, final_cols) = df.shape();
    println!(
        "      Final shape of the data: {} rows x {} columns",
        style(final_rows).yellow().bold(),
        style(final_cols).yellow().bold()
    );

    let shares = class_distribution(&df, &config.target_column)?;
    let age_counts = readmissions_by_age(&df, &config.age_column, &config.target_column)?;

    println!();
    println!(
        "    {} {}",
        style("✧").cyan(),
        style("Count of readmitted cases against age").white().bold()
    );
    print_age_counts(&age_counts);

    if !cli.no_charts {
        let class_path = cli.charts_dir.join("class_distribution.svg");
        render_class_distribution(&shares, &class_path)?;
        print_success(&format!("Saved {}", class_path.display()));

        let age_path = cli.charts_dir.join("readmissions_by_age.svg");
        render_readmissions_by_age(&age_counts, &age_path)?;
        print_success(&format!("Saved {}", age_path.display()));
    }

    if let Some(export_path) = &cli.export {
        let spinner = create_spinner("Writing processed table...");
        save_dataset(&mut df, export_path)?;
        finish_with_success(&spinner, &format!("Saved {}", export_path.display()));
    }

    if let Some(report_path) = &cli.report {
        export_run_report(
            &ExportParams {
                input_file: &cli.input,
                config: &config,
                cleaning: &clean_report,
                outlier_bounds: &outlier_bounds,
                scaling: &scaling,
                final_shape: (final_rows, final_cols),
            },
            report_path,
        )?;
        print_success(&format!("Saved {}", report_path.display()));
    }

    summary.final_rows = final_rows;
    summary.final_columns = final_cols;
    summary.set_report_time(step_start.elapsed());
    print_step_time(step_start.elapsed());

    // Display summary
    summary.display();

    // Final completion message
    print_completion();

    Ok(())
}
