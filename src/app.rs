//! Application state and poll event dispatch.

use std::time::{Duration, Instant};

use tracing::info;

use crate::data::TimeFormatter;
use crate::render::{ControlPanel, ControlTableRenderer, GaugeBoard, GaugeRenderer};
use crate::scheduler::{PollEvent, PollState, RefreshHandle, Target};
use crate::source::FetchError;
use crate::ui::Theme;

/// How long a status message stays visible.
const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

/// Main application state.
pub struct App {
    pub running: bool,
    pub show_help: bool,

    // Display targets, owned by their renderers
    pub gauges: GaugeRenderer<GaugeBoard>,
    pub controls: ControlTableRenderer<ControlPanel>,

    // Poll bookkeeping
    pub gauge_poll: PollState,
    pub control_poll: PollState,
    pub last_gauge_update: Option<Instant>,
    pub last_control_update: Option<Instant>,
    pub gauge_error: Option<FetchError>,
    pub control_error: Option<FetchError>,
    pub firmware_version: Option<u32>,

    source_description: String,
    refresh: RefreshHandle,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App.
    ///
    /// The control table starts out header-only until the first control
    /// poll succeeds.
    pub fn new(
        source_description: impl Into<String>,
        refresh: RefreshHandle,
        formatter: TimeFormatter,
        theme: Theme,
    ) -> Self {
        let mut controls = ControlTableRenderer::new(ControlPanel::new(), formatter);
        controls.render(None);

        Self {
            running: true,
            show_help: false,
            gauges: GaugeRenderer::new(GaugeBoard::new()),
            controls,
            gauge_poll: PollState::Idle,
            control_poll: PollState::Idle,
            last_gauge_update: None,
            last_control_update: None,
            gauge_error: None,
            control_error: None,
            firmware_version: None,
            source_description: source_description.into(),
            refresh,
            theme,
            status_message: None,
        }
    }

    /// Returns a description of the measurement source.
    pub fn source_description(&self) -> &str {
        &self.source_description
    }

    /// Apply a scheduler event.
    ///
    /// A successful fetch is rendered to its target and clears that target's
    /// error. A failed fetch only records the error; whatever is on screen
    /// stays as it was.
    pub fn apply(&mut self, event: PollEvent) {
        match event {
            PollEvent::Started(target) => *self.poll_state_mut(target) = PollState::Polling,
            PollEvent::Finished { target, result } => {
                *self.poll_state_mut(target) = PollState::Idle;
                match result {
                    Ok(snapshot) => {
                        match target {
                            Target::Gauges => {
                                self.gauges.render(&snapshot);
                                self.last_gauge_update = Some(Instant::now());
                            }
                            Target::Controls => {
                                self.controls.render(Some(&snapshot));
                                self.last_control_update = Some(Instant::now());
                            }
                        }
                        if snapshot.firmware_version.is_some() {
                            self.firmware_version = snapshot.firmware_version;
                        }
                        *self.error_mut(target) = None;
                    }
                    Err(err) => *self.error_mut(target) = Some(err),
                }
            }
        }
    }

    fn poll_state_mut(&mut self, target: Target) -> &mut PollState {
        match target {
            Target::Gauges => &mut self.gauge_poll,
            Target::Controls => &mut self.control_poll,
        }
    }

    fn error_mut(&mut self, target: Target) -> &mut Option<FetchError> {
        match target {
            Target::Gauges => &mut self.gauge_error,
            Target::Controls => &mut self.control_error,
        }
    }

    /// The outstanding fetch error, if any. A stale control table is
    /// reported ahead of stale gauges.
    pub fn last_error(&self) -> Option<(Target, &FetchError)> {
        self.control_error
            .as_ref()
            .map(|e| (Target::Controls, e))
            .or_else(|| self.gauge_error.as_ref().map(|e| (Target::Gauges, e)))
    }

    /// Ask the scheduler for an immediate control refresh.
    pub fn refresh_controls(&mut self) {
        if self.refresh.request() {
            self.set_status_message("Refreshing controls...".to_string());
        } else {
            self.set_status_message("Refresh already pending".to_string());
        }
    }

    /// Switch between ISO timestamps and time-of-day, then refresh so the
    /// table picks up the new style.
    pub fn toggle_epoch_style(&mut self) {
        let mut formatter = self.controls.formatter();
        formatter.style = formatter.style.toggle();
        self.controls.set_formatter(formatter);
        info!(style = formatter.style.label(), "epoch style changed");

        self.refresh.request();
        self.set_status_message(format!("Timestamps: {}", formatter.style.label()));
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired.
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < STATUS_MESSAGE_TTL {
                return Some(msg);
            }
        }
        None
    }

    /// Whether any target has a fetch in flight.
    pub fn is_polling(&self) -> bool {
        self.gauge_poll == PollState::Polling || self.control_poll == PollState::Polling
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::data::{EpochStyle, Snapshot, Zone};
    use crate::render::GaugeId;
    use crate::test_support::sample_snapshot;
    use tokio::sync::mpsc;

    pub(crate) fn test_app() -> (App, mpsc::Receiver<()>) {
        let (tx, rx) = mpsc::channel(1);
        let app = App::new(
            "test",
            RefreshHandle::new(tx),
            TimeFormatter::new(Zone::Utc, EpochStyle::Iso),
            Theme::dark(),
        );
        (app, rx)
    }

    fn finished(target: Target, snapshot: Snapshot) -> PollEvent {
        PollEvent::Finished {
            target,
            result: Ok(snapshot),
        }
    }

    fn failed(target: Target) -> PollEvent {
        PollEvent::Finished {
            target,
            result: Err(FetchError::Network("connection refused".into())),
        }
    }

    #[test]
    fn test_new_app_shows_header_only_table() {
        let (app, _rx) = test_app();

        let table = app.controls.target().table().unwrap();
        assert!(table.is_header_only());
        assert!(app.gauges.target().is_empty());
    }

    #[test]
    fn test_poll_state_transitions() {
        let (mut app, _rx) = test_app();

        app.apply(PollEvent::Started(Target::Gauges));
        assert_eq!(app.gauge_poll, PollState::Polling);
        assert_eq!(app.control_poll, PollState::Idle);
        assert!(app.is_polling());

        app.apply(finished(Target::Gauges, sample_snapshot()));
        assert_eq!(app.gauge_poll, PollState::Idle);
        assert!(!app.is_polling());
    }

    #[test]
    fn test_success_renders_only_its_target() {
        let (mut app, _rx) = test_app();

        app.apply(finished(Target::Gauges, sample_snapshot()));
        assert_eq!(app.gauges.target().value(GaugeId::WaterTemp), Some(26.0));
        assert!(app.controls.target().table().unwrap().is_header_only());
        assert!(app.last_gauge_update.is_some());
        assert!(app.last_control_update.is_none());

        app.apply(finished(Target::Controls, sample_snapshot()));
        assert_eq!(app.controls.target().table().unwrap().rows.len(), 20);
    }

    #[test]
    fn test_failure_leaves_display_unchanged() {
        let (mut app, _rx) = test_app();
        app.apply(finished(Target::Gauges, sample_snapshot()));
        app.apply(finished(Target::Controls, sample_snapshot()));

        let board_before = app.gauges.target().clone();
        let table_before = app.controls.target().table().cloned();
        let rebuilds_before = app.controls.target().rebuilds();

        app.apply(failed(Target::Gauges));
        app.apply(failed(Target::Controls));

        assert_eq!(app.gauges.target(), &board_before);
        assert_eq!(app.controls.target().table().cloned(), table_before);
        assert_eq!(app.controls.target().rebuilds(), rebuilds_before);
        assert!(app.gauge_error.is_some());
        assert!(app.control_error.is_some());
    }

    #[test]
    fn test_success_clears_error() {
        let (mut app, _rx) = test_app();
        app.apply(failed(Target::Gauges));
        assert!(app.last_error().is_some());

        app.apply(finished(Target::Gauges, sample_snapshot()));
        assert!(app.last_error().is_none());
    }

    #[test]
    fn test_errors_tracked_per_target() {
        let (mut app, _rx) = test_app();
        app.apply(failed(Target::Controls));

        // A later gauge success leaves the control table stale
        app.apply(finished(Target::Gauges, sample_snapshot()));
        let (target, err) = app.last_error().unwrap();
        assert_eq!(target, Target::Controls);
        assert_eq!(err.kind(), crate::source::FailureKind::NetworkFailure);

        app.apply(failed(Target::Gauges));
        app.apply(finished(Target::Controls, sample_snapshot()));
        assert_eq!(app.last_error().map(|(t, _)| t), Some(Target::Gauges));

        app.apply(finished(Target::Gauges, sample_snapshot()));
        assert!(app.last_error().is_none());
    }

    #[test]
    fn test_firmware_version_tracked() {
        let (mut app, _rx) = test_app();
        let snapshot = Snapshot {
            firmware_version: Some(4),
            ..sample_snapshot()
        };

        app.apply(finished(Target::Gauges, snapshot));
        app.apply(finished(Target::Gauges, sample_snapshot()));
        assert_eq!(app.firmware_version, Some(4));
    }

    #[test]
    fn test_refresh_controls_sends_request() {
        let (mut app, mut rx) = test_app();

        app.refresh_controls();
        assert!(rx.try_recv().is_ok());
        assert_eq!(app.get_status_message(), Some("Refreshing controls..."));

        app.refresh_controls();
        app.refresh_controls();
        assert_eq!(app.get_status_message(), Some("Refresh already pending"));
    }

    #[test]
    fn test_toggle_epoch_style() {
        let (mut app, mut rx) = test_app();

        app.toggle_epoch_style();
        assert_eq!(app.controls.formatter().style, EpochStyle::Time);
        assert!(rx.try_recv().is_ok());

        app.toggle_epoch_style();
        assert_eq!(app.controls.formatter().style, EpochStyle::Iso);
    }
}
