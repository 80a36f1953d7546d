use crate::prelude::ClientError;
use crate::report::{report_from_history, HistoryRecord, Report};
use crate::session::state::{SessionState, UploadState, ViewSelection};
use crate::telemetry::LogManager;

/// External triggers the session reacts to: operator input plus completion of
/// the two asynchronous service calls.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    FileSelected(String),
    StartDateChanged(String),
    EndDateChanged(String),
    AnalysisRequested,
    AnalysisFinished(Result<Report, ClientError>),
    HistoryLoaded(Result<Vec<HistoryRecord>, ClientError>),
    HistoryRowSelected(HistoryRecord),
    ViewSelected(ViewSelection),
    ErrorDismissed,
}

/// Everything the HTTP client needs to issue one analyze call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub file: String,
    pub start_date: String,
    pub end_date: String,
}

/// Side effect the shell must start after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    RunAnalysis(AnalysisRequest),
    LoadHistory,
}

/// Applies one event to the session and reports the side effect to start.
///
/// Guard failures are silent no-ops: the triggering control is expected to be
/// disabled in the shell, and the guard here is the defensive backstop.
pub fn apply(state: &mut SessionState, event: SessionEvent) -> Effect {
    match event {
        SessionEvent::FileSelected(path) => {
            state.selected_file = if path.trim().is_empty() {
                None
            } else {
                Some(path)
            };
            Effect::None
        }
        SessionEvent::StartDateChanged(date) => {
            state.dates.start = date;
            Effect::None
        }
        SessionEvent::EndDateChanged(date) => {
            state.dates.end = date;
            Effect::None
        }
        SessionEvent::AnalysisRequested => {
            if state.upload == UploadState::InFlight {
                return Effect::None;
            }
            let Some(file) = state.selected_file.clone() else {
                return Effect::None;
            };
            state.upload = UploadState::InFlight;
            // Cleared before the response arrives so a stale report is never
            // shown next to the progress indicator.
            state.current_report = None;
            state.last_error = None;
            Effect::RunAnalysis(AnalysisRequest {
                file,
                start_date: state.dates.start.clone(),
                end_date: state.dates.end.clone(),
            })
        }
        SessionEvent::AnalysisFinished(Ok(report)) => {
            state.current_report = Some(report);
            state.upload = UploadState::Idle;
            Effect::LoadHistory
        }
        SessionEvent::AnalysisFinished(Err(error)) => {
            state.upload = UploadState::Idle;
            state.last_error = Some(error);
            Effect::None
        }
        SessionEvent::HistoryLoaded(Ok(records)) => {
            LogManager::new().record(&format!(
                "inspection history refreshed ({} records)",
                records.len()
            ));
            state.history = records;
            Effect::None
        }
        SessionEvent::HistoryLoaded(Err(error)) => {
            // Non-fatal: keep the previous snapshot and the current report.
            LogManager::new().record_failure(&format!("history refresh failed: {error}"));
            Effect::None
        }
        SessionEvent::HistoryRowSelected(record) => {
            state.current_report = Some(report_from_history(&record));
            Effect::None
        }
        SessionEvent::ViewSelected(view) => {
            state.view = view;
            Effect::None
        }
        SessionEvent::ErrorDismissed => {
            state.last_error = None;
            Effect::None
        }
    }
}
