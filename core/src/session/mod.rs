pub mod render;
pub mod state;
pub mod transition;

pub use render::{content_pane, is_active_row, ContentPane};
pub use state::{
    DateRange, SessionState, UploadState, ViewSelection, DEFAULT_END_DATE, DEFAULT_START_DATE,
};
pub use transition::{apply, AnalysisRequest, Effect, SessionEvent};
