pub mod aggregate;
pub mod cursor;
pub mod engine;
pub mod match_log;
pub mod report;

pub use aggregate::{AggregateStore, MapStats};
pub use cursor::HistoryCursor;
pub use engine::{StatsEngine, Submission};
pub use match_log::MatchLog;
pub use report::{pick_rate_report, MapBreakdown, PickCountRow, PickRateRow, TrendPoint};
