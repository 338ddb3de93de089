//! Grouped summary statistics over the donation table.

use super::DonationTable;

/// Mean and spread of the Monetary column for one outcome group.
#[derive(Debug, Clone, PartialEq)]
pub struct OutcomeStats {
    /// Outcome group this row describes.
    pub donated: bool,
    /// Number of donors in the group.
    pub count: usize,
    /// Mean amount donated.
    pub mean: f64,
    /// Sample standard deviation of the amount donated.
    pub std_dev: f64,
}

/// Per-outcome mean and standard deviation of the Monetary column.
///
/// Groups are ordered non-donors first; a group absent from the data is
/// omitted. Re-running over an unchanged table yields identical values.
pub fn donation_stats(table: &DonationTable) -> Vec<OutcomeStats> {
    [false, true]
        .into_iter()
        .filter_map(|donated| {
            let values: Vec<f64> = table
                .records()
                .iter()
                .filter(|record| record.donated == donated)
                .map(|record| record.monetary)
                .collect();
            if values.is_empty() {
                return None;
            }
            let (mean, std_dev) = mean_std(&values);
            Some(OutcomeStats {
                donated,
                count: values.len(),
                mean,
                std_dev,
            })
        })
        .collect()
}

fn mean_std(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    if values.len() < 2 {
        // Single-member groups report zero spread.
        return (mean, 0.0);
    }
    let variance = values
        .iter()
        .map(|value| (value - mean).powi(2))
        .sum::<f64>()
        / (n - 1.0);
    (mean, variance.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DonationRecord;
    use approx::assert_relative_eq;

    fn record(monetary: f64, donated: bool) -> DonationRecord {
        DonationRecord {
            recency: 2,
            frequency: (monetary / 250.0) as u32,
            monetary,
            time: 40,
            donated,
        }
    }

    #[test]
    fn computes_mean_and_std_per_group() {
        let table = DonationTable::from_records(vec![
            record(250.0, false),
            record(750.0, false),
            record(1000.0, true),
            record(2000.0, true),
            record(3000.0, true),
        ])
        .unwrap();

        let stats = donation_stats(&table);
        assert_eq!(stats.len(), 2);

        assert!(!stats[0].donated);
        assert_eq!(stats[0].count, 2);
        assert_relative_eq!(stats[0].mean, 500.0);
        assert_relative_eq!(stats[0].std_dev, (125_000.0f64).sqrt());

        assert!(stats[1].donated);
        assert_eq!(stats[1].count, 3);
        assert_relative_eq!(stats[1].mean, 2000.0);
        assert_relative_eq!(stats[1].std_dev, 1000.0);
    }

    #[test]
    fn repeated_runs_are_identical() {
        let table = DonationTable::from_records(vec![
            record(500.0, false),
            record(1250.0, true),
            record(250.0, false),
        ])
        .unwrap();
        assert_eq!(donation_stats(&table), donation_stats(&table));
    }
}
