//! Poll scheduling for the two display targets.
//!
//! The gauges and the control table are refreshed independently:
//!
//! - **Gauges** poll on a fixed cadence.
//! - **Controls** poll on an optional cadence, and on demand through a
//!   [`RefreshHandle`].
//!
//! Both targets fetch once immediately so the dashboard is populated before
//! the first tick. Each target runs in its own background task and reports
//! through a channel the UI drains without blocking. A failed fetch is logged
//! and forwarded; the loop keeps going and the next tick tries again.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};
use tracing::{debug, warn};

use crate::data::Snapshot;
use crate::source::{FetchError, MeasurementSource};

/// Shortest cadence accepted; anything smaller is raised to this.
pub const MIN_CADENCE: Duration = Duration::from_millis(100);

/// Which display a poll feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Gauges,
    Controls,
}

impl Target {
    pub fn label(&self) -> &'static str {
        match self {
            Target::Gauges => "gauges",
            Target::Controls => "controls",
        }
    }
}

/// Whether a target has a fetch in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PollState {
    #[default]
    Idle,
    Polling,
}

/// Polling intervals for the two targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cadence {
    /// Interval between gauge polls.
    pub gauges: Duration,
    /// Interval between control polls; `None` means manual refresh only.
    pub controls: Option<Duration>,
}

impl Default for Cadence {
    fn default() -> Self {
        Self {
            gauges: Duration::from_secs(10),
            controls: None,
        }
    }
}

/// Progress reported by the scheduler.
#[derive(Debug, Clone, PartialEq)]
pub enum PollEvent {
    /// A fetch for `target` has been issued.
    Started(Target),
    /// A fetch for `target` completed.
    Finished {
        target: Target,
        result: Result<Snapshot, FetchError>,
    },
}

/// Requests an out-of-band control refresh.
///
/// Requests made while one is already queued are merged into it.
#[derive(Debug, Clone)]
pub struct RefreshHandle {
    tx: mpsc::Sender<()>,
}

impl RefreshHandle {
    pub fn new(tx: mpsc::Sender<()>) -> Self {
        Self { tx }
    }

    /// Ask for a control refresh. Returns `false` if one is already pending
    /// or the scheduler has stopped.
    pub fn request(&self) -> bool {
        self.tx.try_send(()).is_ok()
    }
}

/// Owns the polling tasks for both targets.
///
/// Dropping the scheduler aborts its tasks; in-flight fetches are abandoned.
#[derive(Debug)]
pub struct PollScheduler {
    events: mpsc::Receiver<PollEvent>,
    refresh: RefreshHandle,
    tasks: Vec<JoinHandle<()>>,
}

impl PollScheduler {
    /// Spawn the gauge and control loops on the current tokio runtime.
    pub fn spawn<S>(source: S, cadence: Cadence) -> Self
    where
        S: MeasurementSource + 'static,
    {
        let source: Arc<dyn MeasurementSource> = Arc::new(source);
        let (event_tx, events) = mpsc::channel(32);
        let (refresh_tx, refresh_rx) = mpsc::channel(1);

        let gauges = tokio::spawn(run_gauges(
            source.clone(),
            cadence.gauges.max(MIN_CADENCE),
            event_tx.clone(),
        ));
        let controls = tokio::spawn(run_controls(
            source,
            cadence.controls.map(|c| c.max(MIN_CADENCE)),
            refresh_rx,
            event_tx,
        ));

        Self {
            events,
            refresh: RefreshHandle::new(refresh_tx),
            tasks: vec![gauges, controls],
        }
    }

    /// A handle for requesting manual control refreshes.
    pub fn refresh_handle(&self) -> RefreshHandle {
        self.refresh.clone()
    }

    /// Take the next pending event without waiting.
    pub fn try_next(&mut self) -> Option<PollEvent> {
        self.events.try_recv().ok()
    }

    /// Wait for the next event.
    pub async fn next(&mut self) -> Option<PollEvent> {
        self.events.recv().await
    }
}

impl Drop for PollScheduler {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}

async fn run_gauges(
    source: Arc<dyn MeasurementSource>,
    period: Duration,
    events: mpsc::Sender<PollEvent>,
) {
    let mut ticker = time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        // The first tick completes immediately
        ticker.tick().await;
        if !poll_once(source.as_ref(), Target::Gauges, &events).await {
            break;
        }
    }
}

async fn run_controls(
    source: Arc<dyn MeasurementSource>,
    period: Option<Duration>,
    mut refresh: mpsc::Receiver<()>,
    events: mpsc::Sender<PollEvent>,
) {
    if !poll_once(source.as_ref(), Target::Controls, &events).await {
        return;
    }

    let mut ticker = period.map(|p| {
        let mut ticker = time::interval_at(Instant::now() + p, p);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker
    });

    loop {
        tokio::select! {
            request = refresh.recv() => {
                if request.is_none() {
                    break;
                }
                debug!("manual control refresh");
            }
            _ = next_tick(&mut ticker) => {}
        }
        if !poll_once(source.as_ref(), Target::Controls, &events).await {
            break;
        }
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending().await,
    }
}

/// Run one fetch and report it. Returns `false` once nobody is listening.
async fn poll_once(
    source: &dyn MeasurementSource,
    target: Target,
    events: &mpsc::Sender<PollEvent>,
) -> bool {
    if events.send(PollEvent::Started(target)).await.is_err() {
        return false;
    }

    let result = source.fetch().await;
    match &result {
        Ok(_) => debug!(target = target.label(), "poll succeeded"),
        Err(e) => warn!(
            target = target.label(),
            kind = %e.kind(),
            error = %e,
            "poll failed; display left unchanged"
        ),
    }

    events
        .send(PollEvent::Finished { target, result })
        .await
        .is_ok()
}
