//! Chart construction for the dataset visualizations.
//!
//! Each chart is computed as plain values first (group statistics, scatter
//! points, bin counts) and then rendered with plotters into an RGB buffer
//! that the UI uploads as a texture. Rendering reads only the immutable
//! dataset snapshot, so repeated invocations produce identical charts.

use plotters::prelude::*;
use thiserror::Error;

use crate::dataset::stats::{self, OutcomeStats};
use crate::dataset::DonationTable;

/// Bin count shared by both histograms.
pub const HISTOGRAM_BINS: usize = 25;
/// Fixed value range of the Monetary histogram.
pub const MONETARY_RANGE: (f64, f64) = (0.0, 1500.0);
/// Fixed value range of the Recency histogram.
pub const RECENCY_RANGE: (f64, f64) = (0.0, 50.0);

const CHART_WIDTH: u32 = 800;
const CHART_HEIGHT: u32 = 600;
/// Opacity used so overlapping outcome groups remain visible.
const GROUP_OPACITY: f64 = 0.75;
/// Series colors indexed by outcome (non-donors first).
const GROUP_COLORS: [RGBColor; 2] = [BLUE, RED];
/// Legend labels indexed by outcome.
const GROUP_LABELS: [&str; 2] = ["Did not donate", "Donated"];

/// Errors raised while drawing a chart.
#[derive(Debug, Error)]
pub enum ChartError {
    /// The plotting backend rejected a drawing operation.
    #[error("Chart rendering failed: {0}")]
    Render(String),
}

fn render_err(err: impl std::fmt::Display) -> ChartError {
    ChartError::Render(err.to_string())
}

/// A rendered chart as raw RGB pixels ready for texture upload.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartImage {
    /// Window caption for the chart.
    pub title: String,
    /// Pixel width of the buffer.
    pub width: u32,
    /// Pixel height of the buffer.
    pub height: u32,
    /// Tightly packed RGB8 pixels, row major.
    pub rgb: Vec<u8>,
}

/// Binned counts for one histogram, one series per outcome group.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramSpec {
    /// Inclusive value range covered by the bins.
    pub range: (f64, f64),
    /// Per-bin counts indexed by outcome (non-donors first).
    pub counts: [Vec<u32>; 2],
}

impl HistogramSpec {
    /// Width of one bin.
    pub fn bin_width(&self) -> f64 {
        (self.range.1 - self.range.0) / HISTOGRAM_BINS as f64
    }

    /// Total number of samples that fell inside the range.
    pub fn total(&self) -> u32 {
        self.counts.iter().flatten().sum()
    }
}

/// Histogram of the Monetary column over [`MONETARY_RANGE`].
pub fn monetary_histogram(table: &DonationTable) -> HistogramSpec {
    histogram(table, MONETARY_RANGE, |record| record.monetary)
}

/// Histogram of the Recency column over [`RECENCY_RANGE`].
pub fn recency_histogram(table: &DonationTable) -> HistogramSpec {
    histogram(table, RECENCY_RANGE, |record| f64::from(record.recency))
}

fn histogram(
    table: &DonationTable,
    range: (f64, f64),
    value: impl Fn(&crate::dataset::DonationRecord) -> f64,
) -> HistogramSpec {
    let width = (range.1 - range.0) / HISTOGRAM_BINS as f64;
    let mut counts = [vec![0u32; HISTOGRAM_BINS], vec![0u32; HISTOGRAM_BINS]];
    for record in table.records() {
        let v = value(record);
        // Samples outside the fixed range are dropped from the chart.
        if v < range.0 || v > range.1 {
            continue;
        }
        let bin = (((v - range.0) / width) as usize).min(HISTOGRAM_BINS - 1);
        counts[usize::from(record.donated)][bin] += 1;
    }
    HistogramSpec { range, counts }
}

/// Build all four visualization charts from the current dataset snapshot.
pub fn build_all(table: &DonationTable) -> Result<Vec<ChartImage>, ChartError> {
    Ok(vec![
        render_donation_bar(&stats::donation_stats(table))?,
        render_scatter(table)?,
        render_histogram(
            &monetary_histogram(table),
            "Highest Donation in cc for Blood",
            "Amount Donated (cc)",
        )?,
        render_histogram(
            &recency_histogram(table),
            "Standard Deviation of Recency (months)",
            "Recency (months)",
        )?,
    ])
}

/// Grouped bar chart of mean Monetary per outcome with std-dev error bars.
fn render_donation_bar(groups: &[OutcomeStats]) -> Result<ChartImage, ChartError> {
    let title = "Mean Amount Donated by Each Person (cc)";
    let y_max = groups
        .iter()
        .map(|g| g.mean + g.std_dev)
        .fold(1.0f64, f64::max)
        * 1.15;

    let mut buffer = blank_buffer();
    {
        let root =
            BitMapBackend::with_buffer(&mut buffer, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 30))
            .margin(10)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .build_cartesian_2d((0..groups.len()).into_segmented(), 0f64..y_max)
            .map_err(render_err)?;

        let labels: Vec<&str> = groups
            .iter()
            .map(|g| GROUP_LABELS[usize::from(g.donated)])
            .collect();
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc("Donated")
            .y_desc("Mean Amount Donated (cc)")
            .axis_desc_style(("sans-serif", 15))
            .x_label_formatter(&|value| match value {
                SegmentValue::Exact(index) | SegmentValue::CenterOf(index) => labels
                    .get(*index)
                    .map(|label| (*label).to_string())
                    .unwrap_or_default(),
                SegmentValue::Last => String::new(),
            })
            .draw()
            .map_err(render_err)?;

        chart
            .draw_series(groups.iter().enumerate().map(|(index, group)| {
                let color = GROUP_COLORS[usize::from(group.donated)];
                Rectangle::new(
                    [
                        (SegmentValue::Exact(index), 0.0),
                        (SegmentValue::Exact(index + 1), group.mean),
                    ],
                    color.mix(GROUP_OPACITY).filled(),
                )
            }))
            .map_err(render_err)?;

        chart
            .draw_series(groups.iter().enumerate().map(|(index, group)| {
                ErrorBar::new_vertical(
                    SegmentValue::CenterOf(index),
                    (group.mean - group.std_dev).max(0.0),
                    group.mean,
                    group.mean + group.std_dev,
                    BLACK.filled(),
                    12,
                )
            }))
            .map_err(render_err)?;

        root.present().map_err(render_err)?;
    }
    Ok(finish(title, buffer))
}

/// Scatter plot of Monetary against Frequency, colored by outcome.
fn render_scatter(table: &DonationTable) -> Result<ChartImage, ChartError> {
    let title = "Total Number of Donations vs. Frequency of Donations";
    let x_max = table
        .records()
        .iter()
        .map(|r| r.monetary)
        .fold(1.0f64, f64::max)
        * 1.05;
    let y_max = table
        .records()
        .iter()
        .map(|r| f64::from(r.frequency))
        .fold(1.0f64, f64::max)
        * 1.05;

    let mut buffer = blank_buffer();
    {
        let root =
            BitMapBackend::with_buffer(&mut buffer, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 30))
            .margin(10)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d(0f64..x_max, 0f64..y_max)
            .map_err(render_err)?;

        chart
            .configure_mesh()
            .x_desc("Total Number of Donations (cc)")
            .y_desc("Frequency of Donations (times)")
            .axis_desc_style(("sans-serif", 15))
            .draw()
            .map_err(render_err)?;

        for donated in [false, true] {
            let color = GROUP_COLORS[usize::from(donated)];
            chart
                .draw_series(
                    table
                        .records()
                        .iter()
                        .filter(|record| record.donated == donated)
                        .map(|record| {
                            Circle::new(
                                (record.monetary, f64::from(record.frequency)),
                                4,
                                color.mix(GROUP_OPACITY).filled(),
                            )
                        }),
                )
                .map_err(render_err)?
                .label(GROUP_LABELS[usize::from(donated)])
                .legend(move |(x, y)| Circle::new((x + 5, y), 4, color.filled()));
        }

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(render_err)?;

        root.present().map_err(render_err)?;
    }
    Ok(finish(title, buffer))
}

/// Overlaid per-group histogram with partial opacity.
fn render_histogram(
    spec: &HistogramSpec,
    title: &str,
    x_desc: &str,
) -> Result<ChartImage, ChartError> {
    let y_max = spec
        .counts
        .iter()
        .flatten()
        .copied()
        .max()
        .unwrap_or(1)
        .max(1) as f64
        * 1.15;
    let bin_width = spec.bin_width();

    let mut buffer = blank_buffer();
    {
        let root =
            BitMapBackend::with_buffer(&mut buffer, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 30))
            .margin(10)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d(spec.range.0..spec.range.1, 0f64..y_max)
            .map_err(render_err)?;

        chart
            .configure_mesh()
            .x_desc(x_desc)
            .y_desc("Count")
            .axis_desc_style(("sans-serif", 15))
            .draw()
            .map_err(render_err)?;

        for (group, counts) in spec.counts.iter().enumerate() {
            let color = GROUP_COLORS[group];
            chart
                .draw_series(counts.iter().enumerate().filter(|(_, c)| **c > 0).map(
                    |(bin, count)| {
                        let left = spec.range.0 + bin as f64 * bin_width;
                        Rectangle::new(
                            [(left, 0.0), (left + bin_width, f64::from(*count))],
                            color.mix(GROUP_OPACITY).filled(),
                        )
                    },
                ))
                .map_err(render_err)?
                .label(GROUP_LABELS[group])
                .legend(move |(x, y)| {
                    Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled())
                });
        }

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(render_err)?;

        root.present().map_err(render_err)?;
    }
    Ok(finish(title, buffer))
}

fn blank_buffer() -> Vec<u8> {
    vec![0u8; (CHART_WIDTH * CHART_HEIGHT * 3) as usize]
}

fn finish(title: &str, rgb: Vec<u8>) -> ChartImage {
    ChartImage {
        title: title.to_string(),
        width: CHART_WIDTH,
        height: CHART_HEIGHT,
        rgb,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DonationRecord;

    fn record(recency: u32, frequency: u32, monetary: f64, donated: bool) -> DonationRecord {
        DonationRecord {
            recency,
            frequency,
            monetary,
            time: 40,
            donated,
        }
    }

    fn sample_table() -> DonationTable {
        DonationTable::from_records(vec![
            record(2, 4, 1000.0, true),
            record(4, 2, 500.0, true),
            record(12, 1, 250.0, false),
            record(23, 5, 1250.0, false),
            record(48, 8, 2000.0, false),
        ])
        .unwrap()
    }

    #[test]
    fn histogram_drops_out_of_range_samples() {
        let table = sample_table();
        let spec = monetary_histogram(&table);
        // The 2000cc donor falls outside [0, 1500] and is not counted.
        assert_eq!(spec.total(), 4);
        assert_eq!(spec.counts[0].len(), HISTOGRAM_BINS);
        assert_eq!(spec.counts[1].len(), HISTOGRAM_BINS);
    }

    #[test]
    fn histogram_bins_by_group() {
        let table = sample_table();
        let spec = monetary_histogram(&table);
        let width = spec.bin_width();
        assert_eq!(width, 60.0);
        // 1000cc lands in bin 16 for donors; 250cc in bin 4 for non-donors.
        assert_eq!(spec.counts[1][(1000.0 / width) as usize], 1);
        assert_eq!(spec.counts[0][(250.0 / width) as usize], 1);
    }

    #[test]
    fn recency_histogram_counts_high_recency_in_last_bin() {
        let table = sample_table();
        let spec = recency_histogram(&table);
        // Recency 48 is inside [0, 50]; everything counted.
        assert_eq!(spec.total(), 5);
        assert_eq!(spec.counts[0][HISTOGRAM_BINS - 1], 1);
    }

    #[test]
    fn build_all_produces_four_charts() {
        let table = sample_table();
        let images = build_all(&table).unwrap();
        assert_eq!(images.len(), 4);
        for image in &images {
            assert_eq!(image.rgb.len(), (image.width * image.height * 3) as usize);
            assert!(image.rgb.iter().any(|&px| px != 255));
        }
    }

    #[test]
    fn rebuilding_charts_is_idempotent() {
        let table = sample_table();
        let first = build_all(&table).unwrap();
        let second = build_all(&table).unwrap();
        assert!(first == second);
    }
}
