use serde::{Deserialize, Serialize};

/// Lifecycle of a report; `Pending` exists only while a request is outstanding.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ReportStatus {
    Pending,
    Success,
}

/// Metrics block of a canonical report. Always fully populated; fields the
/// service omitted are zero after normalization.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ReportMetrics {
    pub illegal_area_m2: f64,
    pub volume_m3: f64,
    pub avg_depth_m: f64,
    pub truckloads: u64,
}

/// Viewer artifact links. `model_3d` is absent exactly when the pipeline
/// skipped the 3D build (zero excavated volume).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ViewerUrls {
    pub report: Option<String>,
    pub map: Option<String>,
    pub model_3d: Option<String>,
}

/// Canonical in-memory result of one analysis run, whether it arrived fresh
/// from the analyze endpoint or was reloaded from the inspection history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Report {
    pub status: ReportStatus,
    pub job_id: String,
    pub metrics: ReportMetrics,
    pub urls: ViewerUrls,
}

impl Report {
    /// A site is non-compliant as soon as any illegal area was detected.
    pub fn non_compliant(&self) -> bool {
        self.metrics.illegal_area_m2 > 0.0
    }
}
