use crate::config::Thresholds;
use crate::models::{Category, ClassifiedRecord, DailyRecord};
use crate::processors::year_matcher::MatchedSeries;

/// Tags records with the conditions they meet. Expects imperial units.
pub struct ThresholdClassifier {
    thresholds: Thresholds,
}

impl ThresholdClassifier {
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn classify(&self, record: &DailyRecord) -> ClassifiedRecord {
        let meets = |category: Category| category.meets(record, &self.thresholds);

        ClassifiedRecord {
            record: record.clone(),
            meets_hot: meets(Category::VeryHot),
            meets_cold: meets(Category::VeryCold),
            meets_windy: meets(Category::VeryWindy),
            meets_wet: meets(Category::VeryWet),
            meets_uncomfortable: meets(Category::VeryUncomfortable),
        }
    }

    pub fn classify_all(&self, records: &[DailyRecord]) -> Vec<ClassifiedRecord> {
        records.iter().map(|r| self.classify(r)).collect()
    }

    pub fn classify_series(&self, series: &MatchedSeries) -> Vec<ClassifiedRecord> {
        series.records().map(|r| self.classify(r)).collect()
    }
}

impl Default for ThresholdClassifier {
    fn default() -> Self {
        Self::new(Thresholds::default())
    }
}
