use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::Event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::runtime::Runtime;
use tracing::info;
use tracing_subscriber::EnvFilter;

use poolwatch::render::{
    ControlPanel, ControlTableRenderer, GaugeBoard, GaugeId, GaugeRenderer, TextId,
};
use poolwatch::ui::{self, Theme};
use poolwatch::{
    events, App, EpochStyle, FileSource, MeasurementClient, MeasurementSource, PollScheduler,
    Settings, Zone,
};

#[derive(Parser, Debug)]
#[command(name = "poolwatch")]
#[command(about = "Terminal dashboard for a pool equipment controller")]
struct Args {
    /// TOML settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Controller base URL (e.g. http://192.168.1.50)
    #[arg(short, long, conflicts_with = "file")]
    endpoint: Option<String>,

    /// Read snapshots from a saved /getMeasures body instead of the controller
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Seconds between gauge polls
    #[arg(short, long)]
    gauge_interval: Option<u64>,

    /// Seconds between control table polls (default: manual refresh only)
    #[arg(long)]
    control_interval: Option<u64>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Show timestamps in UTC instead of local time
    #[arg(long)]
    utc: bool,

    /// Show timestamps as time of day instead of ISO-8601
    #[arg(long)]
    time_of_day: bool,

    /// Log file (empty string disables file logging)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Fetch one snapshot, print it and exit
    #[arg(long)]
    once: bool,
}

impl Args {
    fn apply(&self, settings: &mut Settings) {
        if let Some(ref endpoint) = self.endpoint {
            settings.endpoint = endpoint.clone();
        }
        if let Some(secs) = self.gauge_interval {
            settings.gauge_interval_secs = secs;
        }
        if let Some(secs) = self.control_interval {
            settings.control_interval_secs = Some(secs);
        }
        if let Some(secs) = self.timeout {
            settings.request_timeout_secs = secs;
        }
        if self.utc {
            settings.time_zone = Zone::Utc;
        }
        if self.time_of_day {
            settings.epoch_style = EpochStyle::Time;
        }
        if let Some(ref path) = self.log_file {
            settings.log_file = Some(path.clone());
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = Settings::load(args.config.as_deref())?;
    args.apply(&mut settings);
    settings.validate()?;

    init_logging(&settings, args.once)?;

    let rt = Runtime::new()?;

    match args.file {
        Some(ref path) => run(FileSource::new(path), &settings, &rt, args.once),
        None => {
            settings.validate_endpoint()?;
            let client = MeasurementClient::builder()
                .endpoint(settings.endpoint.clone())
                .timeout(settings.request_timeout())
                .build()?;
            run(client, &settings, &rt, args.once)
        }
    }
}

/// Install the tracing subscriber.
///
/// The TUI owns the terminal, so logs go to a file unless running `--once`.
fn init_logging(settings: &Settings, once: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_level))
        .context("invalid log filter")?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if once {
        builder.with_writer(io::stderr).init();
        return Ok(());
    }

    if let Some(path) = settings.log_path() {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;
        builder.with_writer(Mutex::new(file)).with_ansi(false).init();
    }

    Ok(())
}

fn run<S>(source: S, settings: &Settings, rt: &Runtime, once: bool) -> Result<()>
where
    S: MeasurementSource + 'static,
{
    if once {
        return print_once(&source, settings, rt);
    }

    info!(source = source.description(), "starting dashboard");
    let description = source.description().to_string();
    let cadence = settings.cadence();

    // Spawning needs the runtime context; the tasks keep running on the
    // runtime's worker threads while the UI loop blocks this one.
    let scheduler = rt.block_on(async move { PollScheduler::spawn(source, cadence) });
    let app = App::new(
        description,
        scheduler.refresh_handle(),
        settings.formatter(),
        Theme::auto_detect(),
    );

    run_tui(app, scheduler)
}

/// Run the TUI until the user quits.
fn run_tui(mut app: App, mut scheduler: PollScheduler) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    let result = run_app(&mut terminal, &mut app, &mut scheduler);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("dashboard stopped");
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    scheduler: &mut PollScheduler,
) -> Result<()> {
    while app.running {
        while let Some(event) = scheduler.try_next() {
            app.apply(event);
        }

        terminal.draw(|frame| ui::draw(frame, app))?;

        // Poll for events with a short timeout
        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }
    }

    Ok(())
}

/// Fetch a single snapshot and print both displays as plain text.
fn print_once<S>(source: &S, settings: &Settings, rt: &Runtime) -> Result<()>
where
    S: MeasurementSource,
{
    let snapshot = rt
        .block_on(source.fetch())
        .with_context(|| format!("fetch from {} failed", source.description()))?;

    let mut gauges = GaugeRenderer::new(GaugeBoard::new());
    gauges.render(&snapshot);
    let mut controls = ControlTableRenderer::new(ControlPanel::new(), settings.formatter());
    controls.render(Some(&snapshot));

    let board = gauges.target();
    println!("{}", source.description());
    if let Some(version) = snapshot.firmware_version {
        println!("firmware {}", version);
    }
    println!();
    for id in TextId::ALL {
        println!("{:<28}{}", id.label(), board.text(id).unwrap_or("--"));
    }
    for id in GaugeId::ALL {
        let value = match board.value(id) {
            Some(v) => format!("{:.2}", v),
            None => "--".to_string(),
        };
        println!("{:<28}{} {}", id.title(), value, id.unit());
    }

    if let Some(table) = controls.target().table() {
        println!();
        println!("{:<28}{}", table.headers[0], table.headers[1]);
        for row in &table.rows {
            println!("{:<28}{}", row.label, row.value);
        }
    }

    Ok(())
}
