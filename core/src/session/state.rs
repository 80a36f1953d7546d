use crate::prelude::ClientError;
use crate::report::{HistoryRecord, Report};

/// Which of the three content panes is displayed. Independent lifecycle from
/// the report: it survives report changes and is never reset automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewSelection {
    #[default]
    ThreeD,
    TwoD,
    Pdf,
}

impl ViewSelection {
    pub const ALL: [ViewSelection; 3] =
        [ViewSelection::ThreeD, ViewSelection::TwoD, ViewSelection::Pdf];

    pub fn label(self) -> &'static str {
        match self {
            ViewSelection::ThreeD => "3D FORENSICS",
            ViewSelection::TwoD => "SATELLITE MAP",
            ViewSelection::Pdf => "OFFICIAL REPORT",
        }
    }
}

/// Admission control for the analyze call: at most one request in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadState {
    #[default]
    Idle,
    InFlight,
}

/// Default inspection window, first day of the baseline month plus four months.
pub const DEFAULT_START_DATE: &str = "2024-01-01";
pub const DEFAULT_END_DATE: &str = "2024-04-30";

/// Inspection window sent with every analyze request, ISO `YYYY-MM-DD`.
/// Stored verbatim; ordering is not validated client-side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

impl Default for DateRange {
    fn default() -> Self {
        Self {
            start: DEFAULT_START_DATE.into(),
            end: DEFAULT_END_DATE.into(),
        }
    }
}

/// The whole operator session. Every mutation flows through
/// [`transition::apply`](crate::session::transition::apply); the view layer
/// only reads it.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub selected_file: Option<String>,
    pub dates: DateRange,
    pub upload: UploadState,
    pub current_report: Option<Report>,
    pub history: Vec<HistoryRecord>,
    pub view: ViewSelection,
    pub last_error: Option<ClientError>,
}

impl SessionState {
    /// The analyze trigger is armed iff a boundary file is selected and no
    /// request is outstanding.
    pub fn can_run_analysis(&self) -> bool {
        self.selected_file.is_some() && self.upload == UploadState::Idle
    }

    pub fn analysis_in_flight(&self) -> bool {
        self.upload == UploadState::InFlight
    }
}
