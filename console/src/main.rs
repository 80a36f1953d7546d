use iced::{
    widget::{button, column, row, scrollable, text, text_input, Column, Container, Row},
    Alignment, Element, Length, Task, Theme,
};
use mineguardcore::report::{HistoryRecord, Report};
use mineguardcore::session::{
    apply, content_pane, is_active_row, ContentPane, Effect, SessionEvent, SessionState,
    ViewSelection,
};
use mineguardcore::telemetry::AnalysisCounters;
use mineguardcore::ClientError;

use crate::config::ConsoleConfig;

mod client;
mod config;

fn main() -> iced::Result {
    env_logger::init();
    iced::application(Console::boot, Console::update, Console::view)
        .title(application_title)
        .theme(application_theme)
        .run()
}

fn application_title(_: &Console) -> String {
    "MineGuard Operator Console".into()
}

fn application_theme(_: &Console) -> Theme {
    Theme::Dark
}

#[derive(Debug)]
struct Console {
    config: ConsoleConfig,
    session: SessionState,
    counters: AnalysisCounters,
}

#[derive(Debug, Clone)]
enum Message {
    BoundaryPathChanged(String),
    StartDateChanged(String),
    EndDateChanged(String),
    RunAnalysis,
    AnalysisFinished(Result<Report, ClientError>),
    HistoryLoaded(Result<Vec<HistoryRecord>, ClientError>),
    HistoryRowClicked(usize),
    ViewTabSelected(ViewSelection),
    ErrorDismissed,
}

impl Console {
    fn boot() -> (Self, Task<Message>) {
        let config = ConsoleConfig::load_or_default(config::DEFAULT_CONFIG_PATH);
        let history_url = config.history_url();
        (
            Console {
                config,
                session: SessionState::default(),
                counters: AnalysisCounters::new(),
            },
            Task::perform(client::fetch_history(history_url), Message::HistoryLoaded),
        )
    }

    fn update(state: &mut Self, message: Message) -> Task<Message> {
        let event = match message {
            Message::BoundaryPathChanged(path) => SessionEvent::FileSelected(path),
            Message::StartDateChanged(date) => SessionEvent::StartDateChanged(date),
            Message::EndDateChanged(date) => SessionEvent::EndDateChanged(date),
            Message::RunAnalysis => SessionEvent::AnalysisRequested,
            Message::AnalysisFinished(result) => {
                match &result {
                    Ok(_) => state.counters.record_completed(),
                    Err(_) => state.counters.record_failed(),
                }
                SessionEvent::AnalysisFinished(result)
            }
            Message::HistoryLoaded(result) => SessionEvent::HistoryLoaded(result),
            Message::HistoryRowClicked(index) => {
                let Some(record) = state.session.history.get(index).cloned() else {
                    return Task::none();
                };
                SessionEvent::HistoryRowSelected(record)
            }
            Message::ViewTabSelected(view) => SessionEvent::ViewSelected(view),
            Message::ErrorDismissed => SessionEvent::ErrorDismissed,
        };

        match apply(&mut state.session, event) {
            Effect::None => Task::none(),
            Effect::RunAnalysis(request) => Task::perform(
                client::analyze(state.config.analyze_url(), request),
                Message::AnalysisFinished,
            ),
            Effect::LoadHistory => Task::perform(
                client::fetch_history(state.config.history_url()),
                Message::HistoryLoaded,
            ),
        }
    }

    fn view(state: &Self) -> Element<'_, Message> {
        let sidebar = column![state.upload_panel(), state.history_panel()]
            .spacing(16)
            .width(Length::Fixed(360.0));

        let layout = row![sidebar, state.report_panel()]
            .spacing(20)
            .align_y(Alignment::Start)
            .padding(20);

        Container::new(layout)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn upload_panel(&self) -> Element<'_, Message> {
        let boundary_path = self.session.selected_file.clone().unwrap_or_default();

        let mut run = button(text(if self.session.analysis_in_flight() {
            "Processing..."
        } else {
            "RUN DETECTION"
        }))
        .padding(10)
        .width(Length::Fill);
        if self.session.can_run_analysis() {
            run = run.on_press(Message::RunAnalysis);
        }

        let mut panel = column![
            text("New Analysis").size(26),
            text_input("Path to KML / zipped Shapefile", &boundary_path)
                .on_input(Message::BoundaryPathChanged)
                .padding(6),
            row![
                text_input("Start date", &self.session.dates.start)
                    .on_input(Message::StartDateChanged)
                    .padding(6),
                text_input("End date", &self.session.dates.end)
                    .on_input(Message::EndDateChanged)
                    .padding(6),
            ]
            .spacing(8),
            run,
        ]
        .spacing(10);

        if let Some(error) = &self.session.last_error {
            panel = panel.push(
                column![
                    text(format!("Analysis failed: {error}")).size(13),
                    button("Dismiss").on_press(Message::ErrorDismissed).padding(6),
                ]
                .spacing(6),
            );
        }

        let (completed, failed) = self.counters.snapshot();
        panel = panel.push(
            text(format!(
                "Session: {} completed / {} failed | {}",
                completed, failed, self.config.api_base_url
            ))
            .size(11),
        );

        panel.into()
    }

    fn history_panel(&self) -> Element<'_, Message> {
        let rows = if self.session.history.is_empty() {
            Column::new().push(text("No inspections recorded yet").size(12))
        } else {
            self.session.history.iter().enumerate().fold(
                Column::new().spacing(4),
                |col, (index, record)| col.push(self.history_row(index, record)),
            )
        };

        column![
            text("Inspection Log").size(26),
            Container::new(scrollable(rows).height(Length::Fixed(420.0))).padding(6),
        ]
        .spacing(8)
        .into()
    }

    fn history_row(&self, index: usize, record: &HistoryRecord) -> Element<'_, Message> {
        let marker = if is_active_row(&self.session, record) {
            "> "
        } else {
            ""
        };
        let tag = if record.non_compliant() {
            "ILLEGAL"
        } else {
            "CLEAN"
        };

        button(
            column![
                row![
                    text(format!("{marker}{}", record.filename)).size(13),
                    text(tag).size(11),
                ]
                .spacing(8),
                text(format!(
                    "{} | vol {:.0} m³",
                    record.created_date(),
                    record.rounded_volume_m3()
                ))
                .size(11),
            ]
            .spacing(2),
        )
        .on_press(Message::HistoryRowClicked(index))
        .padding(6)
        .width(Length::Fill)
        .into()
    }

    fn report_panel(&self) -> Element<'_, Message> {
        let pane = self.content_pane_view();

        let Some(report) = &self.session.current_report else {
            return column![pane].spacing(12).width(Length::Fill).into();
        };

        let metrics = &report.metrics;
        let metrics_row = row![
            metric_cell("DETECTED ILLEGAL AREA", format!("{:.0} m²", metrics.illegal_area_m2)),
            metric_cell("STOLEN VOLUME", format!("{:.0} m³", metrics.volume_m3)),
            metric_cell("AVG. PIT DEPTH", format!("{:.2} m", metrics.avg_depth_m)),
            metric_cell("IMPACT (TRUCKLOADS)", metrics.truckloads.to_string()),
        ]
        .spacing(12);

        let badge = text(if report.non_compliant() {
            "NON-COMPLIANT"
        } else {
            "COMPLIANT"
        })
        .size(14);

        let tabs = ViewSelection::ALL
            .iter()
            .fold(Row::new().spacing(8), |tab_row, view| {
                let label = if self.session.view == *view {
                    format!("[ {} ]", view.label())
                } else {
                    view.label().to_string()
                };
                tab_row.push(
                    button(text(label).size(13))
                        .on_press(Message::ViewTabSelected(*view))
                        .padding(8),
                )
            });

        column![
            metrics_row,
            row![tabs, badge].spacing(16).align_y(Alignment::Center),
            Container::new(pane).padding(12).width(Length::Fill),
        ]
        .spacing(12)
        .width(Length::Fill)
        .into()
    }

    fn content_pane_view(&self) -> Element<'_, Message> {
        match content_pane(&self.session) {
            ContentPane::AwaitingAnalysis => column![
                text("Ready for Analysis").size(26),
                text("Select a mining lease boundary (KML or zipped Shapefile) and run detection.")
                    .size(14),
            ]
            .spacing(8)
            .into(),
            ContentPane::Embed(url) => column![
                text(format!("Embedded view: {}", self.session.view.label())).size(16),
                text(url).size(13),
            ]
            .spacing(8)
            .into(),
            ContentPane::MissingModel => column![
                text("No 3D model available").size(16),
                text("Zero excavated volume was detected for this site.").size(13),
            ]
            .spacing(8)
            .into(),
        }
    }
}

fn metric_cell<'a>(label: &'a str, value: String) -> Element<'a, Message> {
    Container::new(column![text(label).size(11), text(value).size(22)].spacing(4))
        .padding(10)
        .into()
}
