pub mod counters;
pub mod log;

pub use counters::AnalysisCounters;
pub use log::LogManager;
