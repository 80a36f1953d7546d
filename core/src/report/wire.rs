use serde::{Deserialize, Serialize};

/// Body returned by `POST /api/analyze`. Every metric and artifact link is
/// optional on the wire; normalization fills the gaps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub job_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default)]
    pub metrics: WireMetrics,
    #[serde(default)]
    pub urls: WireUrls,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct WireMetrics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub illegal_area_m2: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_m3: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_depth_m: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub truckloads: Option<f64>,
}

/// Artifact links as the service names them; `3d_model` is omitted entirely
/// for zero-volume sites.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WireUrls {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map: Option<String>,
    #[serde(default, rename = "3d_model", skip_serializing_if = "Option::is_none")]
    pub model_3d: Option<String>,
}

/// Flattened inspection row returned by `GET /api/history`, most recent first.
/// `id` is the stable list key; `job_id` joins a row to the report it produced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryRecord {
    pub id: i64,
    pub job_id: String,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub illegal_area_m2: Option<f64>,
    #[serde(default)]
    pub volume_m3: Option<f64>,
    #[serde(default)]
    pub avg_depth_m: Option<f64>,
    #[serde(default)]
    pub truckloads: Option<f64>,
    #[serde(default)]
    pub report_url: Option<String>,
    #[serde(default)]
    pub map_url: Option<String>,
    #[serde(default)]
    pub model_url: Option<String>,
}

impl HistoryRecord {
    /// Date portion of the service timestamp, for list rendering.
    pub fn created_date(&self) -> &str {
        self.created_at.get(..10).unwrap_or(&self.created_at)
    }

    pub fn non_compliant(&self) -> bool {
        self.illegal_area_m2.unwrap_or(0.0) > 0.0
    }

    pub fn rounded_volume_m3(&self) -> f64 {
        self.volume_m3.unwrap_or(0.0).round()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_volume_urls_omit_model_key() {
        let urls = WireUrls {
            report: Some("r.pdf".into()),
            map: Some("m.html".into()),
            model_3d: None,
        };
        let encoded = serde_json::to_string(&urls).unwrap();
        assert!(!encoded.contains("3d_model"));
    }

    #[test]
    fn model_url_round_trips_under_wire_name() {
        let encoded = r#"{"report":"r.pdf","map":"m.html","3d_model":"3d.html"}"#;
        let urls: WireUrls = serde_json::from_str(encoded).unwrap();
        assert_eq!(urls.model_3d.as_deref(), Some("3d.html"));
    }

    #[test]
    fn history_record_created_date_truncates_timestamp() {
        let record = HistoryRecord {
            id: 1,
            job_id: "a1b2c3d4".into(),
            filename: "site.kml".into(),
            created_at: "2024-05-17T09:30:00".into(),
            illegal_area_m2: Some(12.0),
            volume_m3: Some(130.4),
            avg_depth_m: Some(1.1),
            truckloads: Some(9.0),
            report_url: None,
            map_url: None,
            model_url: None,
        };
        assert_eq!(record.created_date(), "2024-05-17");
        assert!(record.non_compliant());
        assert_eq!(record.rounded_volume_m3(), 130.0);
    }
}
