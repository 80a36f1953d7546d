//! Single normalization layer between the two service representations and the
//! canonical [`Report`].
//!
//! | canonical                  | analyze response            | history record     |
//! |----------------------------|-----------------------------|--------------------|
//! | `job_id`                   | `job_id`                    | `job_id`           |
//! | `metrics.illegal_area_m2`  | `metrics.illegal_area_m2`   | `illegal_area_m2`  |
//! | `metrics.volume_m3`        | `metrics.volume_m3`         | `volume_m3`        |
//! | `metrics.avg_depth_m`      | `metrics.avg_depth_m`       | `avg_depth_m`      |
//! | `metrics.truckloads`       | `metrics.truckloads`        | `truckloads`       |
//! | `urls.report`              | `urls.report`               | `report_url`       |
//! | `urls.map`                 | `urls.map`                  | `map_url`          |
//! | `urls.model_3d`            | `urls."3d_model"`           | `model_url`        |
//!
//! Absent metrics become zero here, and only here; absent URLs stay absent so
//! the viewer can show its placeholder.

use crate::report::canonical::{Report, ReportMetrics, ReportStatus, ViewerUrls};
use crate::report::wire::{AnalyzeResponse, HistoryRecord, WireMetrics};

fn metric(value: Option<f64>) -> f64 {
    value.unwrap_or(0.0)
}

fn truckloads(value: Option<f64>) -> u64 {
    value.map(|count| count.max(0.0).round() as u64).unwrap_or(0)
}

fn metrics_from_wire(wire: WireMetrics) -> ReportMetrics {
    ReportMetrics {
        illegal_area_m2: metric(wire.illegal_area_m2),
        volume_m3: metric(wire.volume_m3),
        avg_depth_m: metric(wire.avg_depth_m),
        truckloads: truckloads(wire.truckloads),
    }
}

/// Canonical report from a fresh analyze response.
pub fn report_from_analysis(response: AnalyzeResponse) -> Report {
    Report {
        status: ReportStatus::Success,
        job_id: response.job_id,
        metrics: metrics_from_wire(response.metrics),
        urls: ViewerUrls {
            report: response.urls.report,
            map: response.urls.map,
            model_3d: response.urls.model_3d,
        },
    }
}

/// Canonical report reconstructed from a persisted inspection row. History
/// rows are always completed runs, so the result is `Success` by definition.
pub fn report_from_history(record: &HistoryRecord) -> Report {
    Report {
        status: ReportStatus::Success,
        job_id: record.job_id.clone(),
        metrics: ReportMetrics {
            illegal_area_m2: metric(record.illegal_area_m2),
            volume_m3: metric(record.volume_m3),
            avg_depth_m: metric(record.avg_depth_m),
            truckloads: truckloads(record.truckloads),
        },
        urls: ViewerUrls {
            report: record.report_url.clone(),
            map: record.map_url.clone(),
            model_3d: record.model_url.clone(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_history() -> HistoryRecord {
        HistoryRecord {
            id: 7,
            job_id: "J1".into(),
            filename: "site.kml".into(),
            created_at: "2024-05-01T12:00:00".into(),
            illegal_area_m2: Some(500.0),
            volume_m3: Some(1200.0),
            avg_depth_m: Some(3.5),
            truckloads: Some(80.0),
            report_url: Some("r.pdf".into()),
            map_url: Some("m.html".into()),
            model_url: Some("3d.html".into()),
        }
    }

    #[test]
    fn analysis_response_normalizes_to_success_report() {
        let body = r#"{
            "job_id": "J1",
            "metrics": {"illegal_area_m2": 500, "volume_m3": 1200, "avg_depth_m": 3.5, "truckloads": 80},
            "urls": {"report": "r.pdf", "map": "m.html", "3d_model": "3d.html"}
        }"#;
        let response: AnalyzeResponse = serde_json::from_str(body).unwrap();
        let report = report_from_analysis(response);

        assert_eq!(report.status, ReportStatus::Success);
        assert_eq!(report.job_id, "J1");
        assert_eq!(report.metrics.illegal_area_m2, 500.0);
        assert_eq!(report.metrics.truckloads, 80);
        assert_eq!(report.urls.model_3d.as_deref(), Some("3d.html"));
        assert!(report.non_compliant());
    }

    #[test]
    fn missing_metrics_default_to_zero() {
        let body = r#"{"job_id": "J2", "metrics": {"illegal_area_m2": 10.5}, "urls": {}}"#;
        let response: AnalyzeResponse = serde_json::from_str(body).unwrap();
        let report = report_from_analysis(response);

        assert_eq!(report.metrics.illegal_area_m2, 10.5);
        assert_eq!(report.metrics.volume_m3, 0.0);
        assert_eq!(report.metrics.avg_depth_m, 0.0);
        assert_eq!(report.metrics.truckloads, 0);
        assert_eq!(report.urls, ViewerUrls::default());
    }

    #[test]
    fn zero_volume_response_has_no_model_url() {
        let body = r#"{
            "job_id": "J3",
            "metrics": {"illegal_area_m2": 500, "volume_m3": 0, "avg_depth_m": 0, "truckloads": 0},
            "urls": {"report": "r.pdf", "map": "m.html"}
        }"#;
        let response: AnalyzeResponse = serde_json::from_str(body).unwrap();
        let report = report_from_analysis(response);

        assert_eq!(report.metrics.volume_m3, 0.0);
        assert!(report.urls.model_3d.is_none());
    }

    #[test]
    fn history_record_reconstructs_equivalent_report() {
        let record = sample_history();
        let report = report_from_history(&record);

        assert_eq!(report.status, ReportStatus::Success);
        assert_eq!(report.job_id, record.job_id);
        assert_eq!(report.metrics.illegal_area_m2, 500.0);
        assert_eq!(report.metrics.volume_m3, 1200.0);
        assert_eq!(report.metrics.avg_depth_m, 3.5);
        assert_eq!(report.metrics.truckloads, 80);
        assert_eq!(report.urls.report.as_deref(), Some("r.pdf"));
        assert_eq!(report.urls.map.as_deref(), Some("m.html"));
        assert_eq!(report.urls.model_3d.as_deref(), Some("3d.html"));
    }

    #[test]
    fn history_reconstruction_is_idempotent() {
        let record = sample_history();
        assert_eq!(report_from_history(&record), report_from_history(&record));
    }

    #[test]
    fn negative_truckloads_clamp_to_zero() {
        let record = HistoryRecord {
            truckloads: Some(-3.0),
            ..sample_history()
        };
        assert_eq!(report_from_history(&record).metrics.truckloads, 0);
    }
}
