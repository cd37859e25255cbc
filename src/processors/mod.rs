pub mod calendar_resolver;
pub mod probability_aggregator;
pub mod threshold_classifier;
pub mod typical_day;
pub mod unit_normalizer;
pub mod year_matcher;

pub use calendar_resolver::{parse_target_date, CalendarResolver, ResolvedCalendar};
pub use probability_aggregator::{default_split_index, split_halves, ProbabilityAggregator};
pub use threshold_classifier::ThresholdClassifier;
pub use typical_day::TypicalDayAverager;
pub use unit_normalizer::{convert_to_imperial, Conversion, SourceUnit, UnitNormalizer};
pub use year_matcher::{MatchedSeries, YearSeriesMatcher};
