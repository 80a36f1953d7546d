pub mod canonical;
pub mod normalize;
pub mod wire;

pub use canonical::{Report, ReportMetrics, ReportStatus, ViewerUrls};
pub use normalize::{report_from_analysis, report_from_history};
pub use wire::{AnalyzeResponse, HistoryRecord, WireMetrics, WireUrls};
