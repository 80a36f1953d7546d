use crate::report::HistoryRecord;
use crate::session::state::{SessionState, ViewSelection};

/// What the content pane shows; a pure projection of session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentPane {
    /// No report on screen yet: the "ready for analysis" empty state.
    AwaitingAnalysis,
    /// Embed the artifact at this URL.
    Embed(String),
    /// 3D tab selected but the run produced no model (zero excavated volume).
    MissingModel,
}

/// Resolves the content pane for the active tab.
///
/// Only the 3D pane falls back to a placeholder; the 2D and PDF panes embed
/// whatever link the run carries, even an absent one.
pub fn content_pane(state: &SessionState) -> ContentPane {
    let Some(report) = &state.current_report else {
        return ContentPane::AwaitingAnalysis;
    };
    match state.view {
        ViewSelection::ThreeD => match &report.urls.model_3d {
            Some(url) => ContentPane::Embed(url.clone()),
            None => ContentPane::MissingModel,
        },
        ViewSelection::TwoD => ContentPane::Embed(report.urls.map.clone().unwrap_or_default()),
        ViewSelection::Pdf => ContentPane::Embed(report.urls.report.clone().unwrap_or_default()),
    }
}

/// A history row is highlighted iff it produced the report on screen.
pub fn is_active_row(state: &SessionState, record: &HistoryRecord) -> bool {
    state
        .current_report
        .as_ref()
        .is_some_and(|report| report.job_id == record.job_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{report_from_analysis, AnalyzeResponse};
    use crate::session::transition::{apply, SessionEvent};

    fn session_with_response(body: &str) -> SessionState {
        let response: AnalyzeResponse = serde_json::from_str(body).unwrap();
        let mut state = SessionState::default();
        state.current_report = Some(report_from_analysis(response));
        state
    }

    const FULL_RESPONSE: &str = r#"{
        "job_id": "J1",
        "metrics": {"illegal_area_m2": 500, "volume_m3": 1200, "avg_depth_m": 3.5, "truckloads": 80},
        "urls": {"report": "r.pdf", "map": "m.html", "3d_model": "3d.html"}
    }"#;

    const ZERO_VOLUME_RESPONSE: &str = r#"{
        "job_id": "J1",
        "metrics": {"illegal_area_m2": 500, "volume_m3": 0, "avg_depth_m": 3.5, "truckloads": 80},
        "urls": {"report": "r.pdf", "map": "m.html"}
    }"#;

    #[test]
    fn empty_session_always_shows_the_ready_state() {
        let mut state = SessionState::default();
        for view in ViewSelection::ALL {
            apply(&mut state, SessionEvent::ViewSelected(view));
            assert_eq!(content_pane(&state), ContentPane::AwaitingAnalysis);
        }
    }

    #[test]
    fn three_d_pane_embeds_the_model_when_present() {
        let state = session_with_response(FULL_RESPONSE);
        assert_eq!(content_pane(&state), ContentPane::Embed("3d.html".into()));
        assert!(state.current_report.as_ref().unwrap().non_compliant());
    }

    #[test]
    fn zero_volume_run_shows_the_model_placeholder() {
        let state = session_with_response(ZERO_VOLUME_RESPONSE);
        assert_eq!(content_pane(&state), ContentPane::MissingModel);
    }

    #[test]
    fn map_and_pdf_panes_embed_unconditionally() {
        let mut state = session_with_response(ZERO_VOLUME_RESPONSE);

        apply(&mut state, SessionEvent::ViewSelected(ViewSelection::TwoD));
        assert_eq!(content_pane(&state), ContentPane::Embed("m.html".into()));

        apply(&mut state, SessionEvent::ViewSelected(ViewSelection::Pdf));
        assert_eq!(content_pane(&state), ContentPane::Embed("r.pdf".into()));

        // Absent links still embed, as an empty target.
        state.current_report.as_mut().unwrap().urls.map = None;
        apply(&mut state, SessionEvent::ViewSelected(ViewSelection::TwoD));
        assert_eq!(content_pane(&state), ContentPane::Embed(String::new()));
    }

    #[test]
    fn full_run_lands_on_an_embedded_model() {
        let mut state = SessionState::default();
        apply(&mut state, SessionEvent::FileSelected("site.kml".into()));
        apply(&mut state, SessionEvent::StartDateChanged("2024-01-01".into()));
        apply(&mut state, SessionEvent::EndDateChanged("2024-04-30".into()));
        apply(&mut state, SessionEvent::AnalysisRequested);
        assert_eq!(content_pane(&state), ContentPane::AwaitingAnalysis);

        let response: AnalyzeResponse = serde_json::from_str(FULL_RESPONSE).unwrap();
        apply(
            &mut state,
            SessionEvent::AnalysisFinished(Ok(report_from_analysis(response))),
        );

        let report = state.current_report.as_ref().unwrap();
        assert_eq!(report.job_id, "J1");
        assert!(report.non_compliant());
        assert_eq!(content_pane(&state), ContentPane::Embed("3d.html".into()));
    }

    #[test]
    fn exactly_the_matching_row_is_active() {
        let mut state = session_with_response(FULL_RESPONSE);
        let matching = HistoryRecord {
            id: 1,
            job_id: "J1".into(),
            filename: "site.kml".into(),
            created_at: String::new(),
            illegal_area_m2: None,
            volume_m3: None,
            avg_depth_m: None,
            truckloads: None,
            report_url: None,
            map_url: None,
            model_url: None,
        };
        let other = HistoryRecord {
            id: 2,
            job_id: "J2".into(),
            ..matching.clone()
        };

        assert!(is_active_row(&state, &matching));
        assert!(!is_active_row(&state, &other));

        state.current_report = None;
        assert!(!is_active_row(&state, &matching));
    }
}
