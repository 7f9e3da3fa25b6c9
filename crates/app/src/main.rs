use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{AppServices, ChartService, Clock, ExperimentController, LoadedDataset, ServicesConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    UnexpectedArgument(String),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::UnexpectedArgument(arg) => write!(f, "unexpected argument: {arg}"),
        }
    }
}

impl std::error::Error for ArgsError {}

struct DesktopApp {
    services: AppServices,
}

impl UiApp for DesktopApp {
    fn data(&self) -> Arc<LoadedDataset> {
        self.services.data()
    }

    fn charts(&self) -> Arc<ChartService> {
        self.services.charts()
    }

    fn new_controller(&self) -> ExperimentController {
        self.services.new_controller()
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app");
    eprintln!();
    eprintln!("The app takes no arguments. Environment:");
    eprintln!("  CHARTLAB_SHEET_CSV_URL      published spreadsheet (CSV export or share link)");
    eprintln!("  CHARTLAB_LOAD_TIMEOUT_SECS  startup fetch timeout, default 10");
    eprintln!("  RUST_LOG                    log filter, default info");
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    if let Some(arg) = std::env::args().nth(1) {
        print_usage();
        return Err(ArgsError::UnexpectedArgument(arg).into());
    }

    let config = ServicesConfig::from_env()?;

    // The dataset is read once before the window opens; the desktop launcher
    // brings its own runtime, so this one is dropped before launch.
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()?;
    let services = runtime.block_on(AppServices::load(&config, Clock::default_clock()));
    drop(runtime);

    let data = services.data();
    info!(
        rows = data.dataset.len(),
        fallback = data.is_fallback(),
        "starting experiment window"
    );

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp { services });
    let context = build_app_context(app);

    // tao may open the window pinned above others on some macOS setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title(ui::WINDOW_TITLE)
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn main() {
    init_tracing();
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
