use std::collections::BTreeMap;

use crate::config::Thresholds;
use crate::error::{ProcessingError, Result};
use crate::models::{
    Category, ClassifiedRecord, ProbabilityDetail, TrendDirection, TrendEntry,
    WeatherAnalysisResponse, YearlyTrend,
};

/// Split point used for trend comparison: the second half gets the extra
/// record when the length is odd.
pub fn default_split_index(len: usize) -> usize {
    len / 2
}

/// Split an ordered slice at `split_index` (clamped to the slice length)
pub fn split_halves<T>(items: &[T], split_index: usize) -> (&[T], &[T]) {
    items.split_at(split_index.min(items.len()))
}

pub struct ProbabilityAggregator {
    thresholds: Thresholds,
}

impl ProbabilityAggregator {
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    /// Count and percentage for one category; `None` when no record can decide it
    pub fn tally(&self, records: &[ClassifiedRecord], category: Category) -> Option<ProbabilityDetail> {
        let total = records.iter().filter(|r| r.is_decidable(category)).count();
        let count = records
            .iter()
            .filter(|r| r.is_decidable(category) && r.meets(category))
            .count();

        ProbabilityDetail::from_counts(count, total, category.threshold_description(&self.thresholds))
            .ok()
    }

    /// Odds for every category the series can decide.
    ///
    /// An empty series is an error. A category no record can decide is left
    /// out of the map rather than reported as 0%.
    pub fn probability_details(
        &self,
        records: &[ClassifiedRecord],
    ) -> Result<BTreeMap<Category, ProbabilityDetail>> {
        if records.is_empty() {
            return Err(ProcessingError::NoData(
                "no classified years to aggregate".to_string(),
            ));
        }

        let mut details = BTreeMap::new();
        for category in Category::ALL {
            match self.tally(records, category) {
                Some(detail) => {
                    details.insert(category, detail);
                }
                None => {
                    tracing::warn!(%category, "No year has the readings for this condition");
                }
            }
        }

        if details.is_empty() {
            return Err(ProcessingError::NoData(
                "no year has readings for any condition".to_string(),
            ));
        }

        Ok(details)
    }

    pub fn trend_analysis(&self, records: &[ClassifiedRecord]) -> Vec<TrendEntry> {
        self.trend_analysis_at(records, default_split_index(records.len()))
    }

    /// Compare odds in `records[..split_index]` against `records[split_index..]`
    pub fn trend_analysis_at(
        &self,
        records: &[ClassifiedRecord],
        split_index: usize,
    ) -> Vec<TrendEntry> {
        let (first_half, second_half) = split_halves(records, split_index);

        Category::ALL
            .iter()
            .filter_map(|&category| {
                let before = self.tally(first_half, category)?;
                let after = self.tally(second_half, category)?;
                let change_percent = after.percentage - before.percentage;

                Some(TrendEntry {
                    category,
                    trend: TrendDirection::classify(change_percent),
                    change_percent,
                })
            })
            .collect()
    }

    /// Per-year odds for charting, ascending by year
    pub fn yearly_trends(&self, records: &[ClassifiedRecord]) -> Vec<YearlyTrend> {
        let mut by_year: BTreeMap<i32, Vec<ClassifiedRecord>> = BTreeMap::new();
        for record in records {
            by_year.entry(record.year()).or_default().push(record.clone());
        }

        by_year
            .into_iter()
            .map(|(year, year_records)| {
                let percentages = Category::ALL
                    .iter()
                    .filter_map(|&category| {
                        self.tally(&year_records, category)
                            .map(|detail| (category, detail.percentage))
                    })
                    .collect();
                YearlyTrend { year, percentages }
            })
            .collect()
    }

    /// Build the full analysis response from one classified record per year
    pub fn aggregate(&self, mut records: Vec<ClassifiedRecord>) -> Result<WeatherAnalysisResponse> {
        // Halves must be chronological; the matcher already delivers ascending years
        records.sort_by_key(|r| r.year());

        let probability_details = self.probability_details(&records)?;
        let probability = probability_details
            .iter()
            .map(|(category, detail)| (*category, detail.percentage))
            .collect();

        Ok(WeatherAnalysisResponse {
            probability,
            probability_details,
            trend_analysis: self.trend_analysis(&records),
            yearly_trends: self.yearly_trends(&records),
            data_points: records.len(),
            historical_data: records,
        })
    }
}

impl Default for ProbabilityAggregator {
    fn default() -> Self {
        Self::new(Thresholds::default())
    }
}
