//! Chart rendering
//!
//! Descriptive charts are exported as SVG files; the file sink stands in
//! for an interactive display surface so the pipeline can run headless.
//! Data preparation is separated from drawing so the shape of each chart
//! can be tested without touching a rendering backend.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use plotters::prelude::*;
use polars::prelude::*;
use serde::Serialize;

use crate::pipeline::error::SchemaError;
use crate::pipeline::stats::{quantile_sorted, sorted_numeric_values};

/// Bar and box fill color, shared across all charts
const BAR_COLOR: RGBColor = RGBColor(52, 152, 219);
/// Median line color
const MEDIAN_COLOR: RGBColor = RGBColor(231, 76, 60);

/// One target class with its share of the table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassShare {
    pub label: String,
    pub count: usize,
    pub percent: f64,
}

/// One age-group category with its positive-readmission count
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeGroupCount {
    pub age_group: String,
    pub readmitted: usize,
}

/// Percentage distribution of the target classes, ascending by class
/// value. The denominator is the full row count, so null targets dilute
/// the shares the same way they do in the source table.
pub fn class_distribution(df: &DataFrame, target: &str) -> Result<Vec<ClassShare>> {
    let column = df
        .column(target)
        .map_err(|_| SchemaError::MissingColumn(target.to_string()))?;
    let series = column.as_materialized_series().cast(&DataType::Int32)?;
    let total = df.height();

    let mut counts: std::collections::BTreeMap<i32, usize> = std::collections::BTreeMap::new();
    for value in series.i32()?.into_iter().flatten() {
        *counts.entry(value).or_insert(0) += 1;
    }

    Ok(counts
        .into_iter()
        .map(|(value, count)| ClassShare {
            label: value.to_string(),
            count,
            percent: if total == 0 {
                0.0
            } else {
                count as f64 / total as f64 * 100.0
            },
        })
        .collect())
}

/// Positive-readmission counts per age-group category, in the order the
/// groups first appear in the data. Groups without a positive case keep a
/// zero count; rows with a null age group are skipped.
pub fn readmissions_by_age(df: &DataFrame, age: &str, target: &str) -> Result<Vec<AgeGroupCount>> {
    let age_column = df
        .column(age)
        .map_err(|_| SchemaError::MissingColumn(age.to_string()))?;
    let age_ca = age_column.str().map_err(|_| SchemaError::UnexpectedType {
        column: age.to_string(),
        expected: "str".to_string(),
        found: age_column.dtype().to_string(),
    })?;

    let target_series = df
        .column(target)
        .map_err(|_| SchemaError::MissingColumn(target.to_string()))?
        .as_materialized_series()
        .cast(&DataType::Int32)?;
    let target_ca = target_series.i32()?;

    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();

    for (age_opt, target_opt) in age_ca.into_iter().zip(target_ca.into_iter()) {
        let group = match age_opt {
            Some(group) => group,
            None => continue,
        };
        if !counts.contains_key(group) {
            order.push(group.to_string());
            counts.insert(group.to_string(), 0);
        }
        if target_opt == Some(1) {
            if let Some(count) = counts.get_mut(group) {
                *count += 1;
            }
        }
    }

    Ok(order
        .into_iter()
        .map(|group| {
            let readmitted = counts.get(&group).copied().unwrap_or(0);
            AgeGroupCount {
                age_group: group,
                readmitted,
            }
        })
        .collect())
}

/// Bar chart of the class percentage distribution, each bar labeled with
/// its rounded percentage.
pub fn render_class_distribution(shares: &[ClassShare], path: &Path) -> Result<()> {
    let root = SVGBackend::new(path, (1000, 700)).into_drawing_area();
    root.fill(&WHITE)?;

    let y_max = shares.iter().map(|s| s.percent).fold(1.0f64, f64::max) * 1.15;
    let labels: Vec<String> = shares.iter().map(|s| s.label.clone()).collect();

    let mut chart = ChartBuilder::on(&root)
        .caption("Distribution of target classes", ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d((0i32..shares.len() as i32).into_segmented(), 0f64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Class")
        .y_desc("Percentage (%)")
        .x_label_formatter(&|seg| match seg {
            SegmentValue::CenterOf(i) if (*i as usize) < labels.len() => {
                labels[*i as usize].clone()
            }
            _ => String::new(),
        })
        .draw()?;

    chart.draw_series(shares.iter().enumerate().map(|(i, share)| {
        Rectangle::new(
            [
                (SegmentValue::Exact(i as i32), 0.0),
                (SegmentValue::Exact(i as i32 + 1), share.percent),
            ],
            BAR_COLOR.filled(),
        )
    }))?;

    chart.draw_series(shares.iter().enumerate().map(|(i, share)| {
        Text::new(
            format!("{:.0}%", share.percent),
            (
                SegmentValue::CenterOf(i as i32),
                share.percent + y_max * 0.02,
            ),
            ("sans-serif", 18),
        )
    }))?;

    root.present()
        .with_context(|| format!("Failed to write chart: {}", path.display()))?;
    Ok(())
}

/// Bar chart of positive-readmission counts per age group, bars labeled
/// with their counts.
pub fn render_readmissions_by_age(counts: &[AgeGroupCount], path: &Path) -> Result<()> {
    let root = SVGBackend::new(path, (1200, 700)).into_drawing_area();
    root.fill(&WHITE)?;

    let y_max = counts
        .iter()
        .map(|c| c.readmitted as f64)
        .fold(1.0f64, f64::max)
        * 1.15;
    let labels: Vec<String> = counts.iter().map(|c| c.age_group.clone()).collect();

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Count of number of readmitted cases against age",
            ("sans-serif", 28),
        )
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d((0i32..counts.len() as i32).into_segmented(), 0f64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Age Groups")
        .y_desc("Readmitted Cases")
        .x_label_formatter(&|seg| match seg {
            SegmentValue::CenterOf(i) if (*i as usize) < labels.len() => {
                labels[*i as usize].clone()
            }
            _ => String::new(),
        })
        .draw()?;

    chart.draw_series(counts.iter().enumerate().map(|(i, group)| {
        Rectangle::new(
            [
                (SegmentValue::Exact(i as i32), 0.0),
                (SegmentValue::Exact(i as i32 + 1), group.readmitted as f64),
            ],
            BAR_COLOR.filled(),
        )
    }))?;

    chart.draw_series(counts.iter().enumerate().map(|(i, group)| {
        Text::new(
            group.readmitted.to_string(),
            (
                SegmentValue::CenterOf(i as i32),
                group.readmitted as f64 + y_max * 0.02,
            ),
            ("sans-serif", 18),
        )
    }))?;

    root.present()
        .with_context(|| format!("Failed to write chart: {}", path.display()))?;
    Ok(())
}

/// Panel of boxplots for the numeric columns, two rows of four. Whiskers
/// sit at the furthest values within 1.5 IQR of the box.
pub fn render_numeric_boxplots(df: &DataFrame, columns: &[String], path: &Path) -> Result<()> {
    let root = SVGBackend::new(path, (1600, 800)).into_drawing_area();
    root.fill(&WHITE)?;
    let panels = root.split_evenly((2, 4));

    for (area, name) in panels.iter().zip(columns.iter()) {
        let column = df
            .column(name)
            .map_err(|_| SchemaError::MissingColumn(name.clone()))?;
        let values = sorted_numeric_values(column.as_materialized_series())?;
        if values.is_empty() {
            continue;
        }

        let q1 = quantile_sorted(&values, 0.25);
        let median = quantile_sorted(&values, 0.5);
        let q3 = quantile_sorted(&values, 0.75);
        let iqr = q3 - q1;
        let whisker_low = values
            .iter()
            .copied()
            .find(|v| *v >= q1 - 1.5 * iqr)
            .unwrap_or(q1);
        let whisker_high = values
            .iter()
            .rev()
            .copied()
            .find(|v| *v <= q3 + 1.5 * iqr)
            .unwrap_or(q3);

        let span = (values[values.len() - 1] - values[0]).max(1.0);
        let y_lo = values[0] - span * 0.1;
        let y_hi = values[values.len() - 1] + span * 0.1;

        let mut chart = ChartBuilder::on(area)
            .caption(name, ("sans-serif", 20))
            .margin(15)
            .x_label_area_size(10)
            .y_label_area_size(50)
            .build_cartesian_2d(0f64..2f64, y_lo..y_hi)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(0)
            .draw()?;

        let plot = chart.plotting_area();
        plot.draw(&PathElement::new(
            vec![(1.0, whisker_low), (1.0, q1)],
            BAR_COLOR.stroke_width(2),
        ))?;
        plot.draw(&PathElement::new(
            vec![(1.0, q3), (1.0, whisker_high)],
            BAR_COLOR.stroke_width(2),
        ))?;
        plot.draw(&PathElement::new(
            vec![(0.85, whisker_low), (1.15, whisker_low)],
            BAR_COLOR.stroke_width(2),
        ))?;
        plot.draw(&PathElement::new(
            vec![(0.85, whisker_high), (1.15, whisker_high)],
            BAR_COLOR.stroke_width(2),
        ))?;
        plot.draw(&Rectangle::new(
            [(0.7, q1), (1.3, q3)],
            BAR_COLOR.mix(0.3).filled(),
        ))?;
        plot.draw(&Rectangle::new(
            [(0.7, q1), (1.3, q3)],
            BAR_COLOR.stroke_width(2),
        ))?;
        plot.draw(&PathElement::new(
            vec![(0.7, median), (1.3, median)],
            MEDIAN_COLOR.stroke_width(2),
        ))?;
    }

    root.present()
        .with_context(|| format!("Failed to write chart: {}", path.display()))?;
    Ok(())
}
