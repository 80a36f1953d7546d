//! HTTP client for the two analysis-service endpoints. Both calls map every
//! failure into [`ClientError`] at the point of invocation; nothing here
//! panics or leaks a transport error upward.

use mineguardcore::report::{report_from_analysis, AnalyzeResponse, HistoryRecord, Report};
use mineguardcore::session::AnalysisRequest;
use mineguardcore::{ClientError, ClientResult};
use std::path::Path;

/// Multipart upload of the boundary file plus the inspection window.
/// The service owns all validation of the file contents and the dates.
pub async fn analyze(analyze_url: String, request: AnalysisRequest) -> ClientResult<Report> {
    let bytes = tokio::fs::read(&request.file)
        .await
        .map_err(|e| ClientError::Transport(format!("reading {}: {e}", request.file)))?;
    let filename = Path::new(&request.file)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "boundary.kml".into());

    let form = reqwest::multipart::Form::new()
        .part("file", reqwest::multipart::Part::bytes(bytes).file_name(filename))
        .text("start_date", request.start_date)
        .text("end_date", request.end_date);

    let client = reqwest::Client::new();
    let response = client
        .post(&analyze_url)
        .multipart(form)
        .send()
        .await
        .map_err(|e| ClientError::Transport(e.to_string()))?;

    if !response.status().is_success() {
        let status = response.status().as_u16();
        let detail = response.text().await.unwrap_or_else(|_| "".into());
        return Err(ClientError::Backend { status, detail });
    }

    let body = response
        .json::<AnalyzeResponse>()
        .await
        .map_err(|e| ClientError::Decode(e.to_string()))?;
    Ok(report_from_analysis(body))
}

/// Full history snapshot, most recent first, exactly as the service returns it.
pub async fn fetch_history(history_url: String) -> ClientResult<Vec<HistoryRecord>> {
    let response = reqwest::get(&history_url)
        .await
        .map_err(|e| ClientError::Transport(e.to_string()))?;

    if !response.status().is_success() {
        let status = response.status().as_u16();
        let detail = response.text().await.unwrap_or_else(|_| "".into());
        return Err(ClientError::Backend { status, detail });
    }

    response
        .json::<Vec<HistoryRecord>>()
        .await
        .map_err(|e| ClientError::Decode(e.to_string()))
}
