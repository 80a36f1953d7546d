use crate::api::store::InspectionStore;
use crate::scenario::profile::MetricsGenerator;
use crate::scenario::ScenarioProfile;
use bytes::BufMut;
use futures_util::TryStreamExt;
use mineguardcore::report::{AnalyzeResponse, HistoryRecord, WireUrls};
use mineguardcore::session::{DEFAULT_END_DATE, DEFAULT_START_DATE};
use serde_json::json;
use std::{
    net::SocketAddr,
    sync::{Arc, Mutex, RwLock},
    thread,
};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tokio::runtime::Builder;
use warp::{http::StatusCode, multipart::FormData, Filter};

#[derive(Debug)]
struct AnalysisFailure(String);

impl warp::reject::Reject for AnalysisFailure {}

/// Hosts the analyze/history endpoints and the placeholder artifact route.
pub struct AnalysisServer {
    store: Arc<RwLock<InspectionStore>>,
}

impl AnalysisServer {
    pub fn start(port: u16, profile: ScenarioProfile, seed: u64) -> Self {
        let store = Arc::new(RwLock::new(InspectionStore::new()));
        let generator = Arc::new(Mutex::new(MetricsGenerator::new(profile, seed)));

        let store_for_filter = store.clone();
        let store_filter = warp::any().map(move || store_for_filter.clone());
        let generator_filter = warp::any().map(move || generator.clone());

        let history_route = warp::path!("api" / "history")
            .and(warp::get())
            .and(store_filter.clone())
            .map(|store: Arc<RwLock<InspectionStore>>| {
                warp::reply::json(&store.read().unwrap().snapshot())
            });

        let analyze_route = warp::path!("api" / "analyze")
            .and(warp::post())
            .and(warp::multipart::form().max_length(32 * 1024 * 1024))
            .and(store_filter)
            .and(generator_filter)
            .and_then(
                move |form: FormData,
                      store: Arc<RwLock<InspectionStore>>,
                      generator: Arc<Mutex<MetricsGenerator>>| async move {
                    match handle_analyze(form, port, store, generator).await {
                        Ok(response) => Ok::<_, warp::Rejection>(warp::reply::with_status(
                            warp::reply::json(&response),
                            StatusCode::OK,
                        )),
                        Err(err) => {
                            log::error!("analyze error: {err:#}");
                            Err(warp::reject::custom(AnalysisFailure(format!("{err:#}"))))
                        }
                    }
                },
            );

        let artifact_route = warp::path("static")
            .and(warp::path("outputs"))
            .and(warp::path::tail())
            .map(|tail: warp::path::Tail| format!("placeholder artifact: {}", tail.as_str()));

        let routes = history_route
            .or(analyze_route)
            .or(artifact_route)
            .recover(handle_rejection);

        thread::spawn(move || {
            let runtime = Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("failed to build runtime");
            runtime.block_on(async move {
                warp::serve(routes)
                    .run(SocketAddr::from(([127, 0, 0, 1], port)))
                    .await;
            });
        });

        Self { store }
    }

    pub fn publish_status(&self, message: &str) {
        println!("[SIM] {}", message);
    }

    #[cfg(test)]
    pub fn inspection_count(&self) -> usize {
        self.store.read().unwrap().len()
    }
}

struct UploadForm {
    filename: String,
    start_date: String,
    end_date: String,
}

async fn read_upload(form: FormData) -> anyhow::Result<UploadForm> {
    let parts: Vec<warp::multipart::Part> = form
        .try_collect()
        .await
        .map_err(|e| anyhow::anyhow!("reading multipart form: {e}"))?;

    let mut filename = None;
    // Missing dates fall back to the baseline inspection window.
    let mut start_date = DEFAULT_START_DATE.to_string();
    let mut end_date = DEFAULT_END_DATE.to_string();

    for part in parts {
        let name = part.name().to_string();
        let part_filename = part.filename().map(str::to_string);
        let data = part
            .stream()
            .try_fold(Vec::new(), |mut acc, buf| {
                acc.put(buf);
                async move { Ok(acc) }
            })
            .await
            .map_err(|e| anyhow::anyhow!("reading part {name}: {e}"))?;

        match name.as_str() {
            "file" => {
                if data.is_empty() {
                    anyhow::bail!("uploaded boundary file is empty");
                }
                filename = Some(part_filename.unwrap_or_else(|| "upload.kml".into()));
            }
            "start_date" => start_date = String::from_utf8_lossy(&data).into_owned(),
            "end_date" => end_date = String::from_utf8_lossy(&data).into_owned(),
            _ => {}
        }
    }

    let Some(filename) = filename else {
        anyhow::bail!("missing file field");
    };
    Ok(UploadForm {
        filename,
        start_date,
        end_date,
    })
}

/// Artifact links for one job. The model link is omitted for zero-volume runs,
/// matching the real pipeline's policy.
fn artifact_urls(port: u16, job_id: &str, zero_volume: bool) -> WireUrls {
    let base = format!("http://127.0.0.1:{port}/static/outputs/{job_id}");
    WireUrls {
        report: Some(format!("{base}/report.pdf")),
        map: Some(format!("{base}/map.html")),
        model_3d: if zero_volume {
            None
        } else {
            Some(format!("{base}/model_3d.html"))
        },
    }
}

async fn handle_analyze(
    form: FormData,
    port: u16,
    store: Arc<RwLock<InspectionStore>>,
    generator: Arc<Mutex<MetricsGenerator>>,
) -> anyhow::Result<AnalyzeResponse> {
    let upload = read_upload(form).await?;

    let (job_id, metrics) = {
        let mut generator = generator.lock().unwrap();
        (generator.next_job_id(), generator.next_metrics())
    };
    let zero_volume = metrics.volume_m3.unwrap_or(0.0) <= 0.0;
    let urls = artifact_urls(port, &job_id, zero_volume);

    let created_at = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default();
    let record = HistoryRecord {
        id: 0,
        job_id: job_id.clone(),
        filename: upload.filename,
        created_at,
        illegal_area_m2: metrics.illegal_area_m2,
        volume_m3: metrics.volume_m3,
        avg_depth_m: metrics.avg_depth_m,
        truckloads: metrics.truckloads,
        report_url: urls.report.clone(),
        map_url: urls.map.clone(),
        model_url: urls.model_3d.clone(),
    };
    let stored = store.write().unwrap().insert(record);
    log::info!(
        "job {} recorded for window {}..{} ({} inspections)",
        stored.job_id,
        upload.start_date,
        upload.end_date,
        store.read().unwrap().len()
    );

    Ok(AnalyzeResponse {
        job_id,
        status: Some("success".into()),
        metrics,
        urls,
    })
}

async fn handle_rejection(
    err: warp::Rejection,
) -> Result<impl warp::Reply, std::convert::Infallible> {
    if let Some(AnalysisFailure(detail)) = err.find::<AnalysisFailure>() {
        return Ok(warp::reply::with_status(
            warp::reply::json(&json!({ "detail": detail })),
            StatusCode::INTERNAL_SERVER_ERROR,
        ));
    }
    Ok(warp::reply::with_status(
        warp::reply::json(&json!({ "detail": "not found" })),
        StatusCode::NOT_FOUND,
    ))
}
