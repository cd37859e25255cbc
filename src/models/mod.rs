pub mod calendar;
pub mod category;
pub mod location;
pub mod record;
pub mod report;

pub use calendar::{is_leap_year, CalendarDay, DayResolution, Season, YearWindow};
pub use category::Category;
pub use location::Coordinate;
pub use record::{ClassifiedRecord, DailyRecord, DailyRecordBuilder, YearlySample};
pub use report::{
    Averages, Coverage, Period, ProbabilityDetail, TrendDirection, TrendEntry, TypicalDaySummary,
    Units, WeatherAnalysisResponse, YearlyTrend,
};
