use std::path::PathBuf;
use std::process;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand, ValueEnum};

use themesync_core::shared::config::ThemeSyncConfig;
use themesync_core::sync::controller_factory::{
    create_controller, create_platform_controller, open_store,
};
use themesync_core::sync::theme_controller::ThemeController;
use themesync_core::theme::domain::theme_backend::BackendError;
use themesync_core::theme::domain::theme_mode::{SystemTheme, ThemeMode};
use themesync_core::theme::infrastructure::in_process_backend::InProcessBackend;
use themesync_core::theme::infrastructure::manual_signal_monitor::ManualSignalMonitor;
use themesync_core::theme::infrastructure::root_node::RootNode;

/// Inspect and change the application theme.
#[derive(Parser)]
#[command(name = "themesync")]
struct Cli {
    /// JSON config file with `store_path` and `poll_interval_ms`.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Preferences file (overrides the config file).
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// OS color-scheme poll interval in milliseconds.
    #[arg(long, global = true)]
    poll_ms: Option<u64>,

    /// Pretend the OS reports this color scheme instead of probing it.
    #[arg(long, global = true, value_enum)]
    os: Option<OsScheme>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OsScheme {
    Light,
    Dark,
}

impl From<OsScheme> for SystemTheme {
    fn from(scheme: OsScheme) -> Self {
        match scheme {
            OsScheme::Light => SystemTheme::Light,
            OsScheme::Dark => SystemTheme::Dark,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Print the saved mode, the OS color scheme and the resolved theme.
    Status,

    /// Change the theme mode: light, dark or system.
    Set { mode: String },

    /// Follow OS color-scheme changes and report every theme switch.
    Watch {
        /// Stop after this many seconds (default: run until killed).
        #[arg(long)]
        seconds: Option<u64>,
    },

    /// Print what the backend mirror reports.
    Backend,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let controller = build_controller(&config, cli.os)?;

    match cli.command {
        Command::Status => print_status(&controller),
        Command::Set { mode } => run_set(controller, &mode)?,
        Command::Watch { seconds } => run_watch(controller, seconds.map(Duration::from_secs)),
        Command::Backend => run_backend(&controller)?,
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<ThemeSyncConfig, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => ThemeSyncConfig::from_file(path)?,
        None => ThemeSyncConfig::default(),
    };
    if let Some(store) = &cli.store {
        config.store_path = Some(store.clone());
    }
    if let Some(poll_ms) = cli.poll_ms {
        config.poll_interval_ms = poll_ms;
    }
    Ok(config)
}

fn build_controller(
    config: &ThemeSyncConfig,
    os: Option<OsScheme>,
) -> Result<ThemeController, Box<dyn std::error::Error>> {
    let target = Box::new(RootNode::new());
    let backend = Box::new(InProcessBackend::new());
    let controller = match os {
        Some(scheme) => create_controller(
            Box::new(ManualSignalMonitor::new(scheme.into())),
            Box::new(open_store(config)?),
            target,
            backend,
        ),
        None => create_platform_controller(config, target, backend)?,
    };
    Ok(controller)
}

fn print_status(controller: &ThemeController) {
    println!("mode:   {}", controller.theme_mode().as_str());
    println!("system: {}", controller.system_theme());
    println!("theme:  {}", controller.current_theme());
}

fn run_set(mut controller: ThemeController, mode: &str) -> Result<(), Box<dyn std::error::Error>> {
    controller.set_mode(mode)?;
    print_status(&controller);
    controller.teardown();
    Ok(())
}

fn run_watch(mut controller: ThemeController, limit: Option<Duration>) {
    print_status(&controller);
    let deadline = limit.map(|limit| Instant::now() + limit);
    let mut last = controller.current_theme();

    loop {
        let slice = match deadline {
            Some(deadline) => {
                let remaining = deadline.saturating_duration_since(Instant::now());
                if remaining.is_zero() {
                    break;
                }
                remaining.min(Duration::from_secs(1))
            }
            None => Duration::from_secs(1),
        };

        if controller.wait_event(slice) == 0 {
            continue;
        }
        let theme = controller.current_theme();
        if theme != last {
            println!("theme:  {theme} (system {})", controller.system_theme());
            last = theme;
        } else {
            log::debug!("System changed to {} without a theme switch", controller.system_theme());
        }
    }

    controller.teardown();
}

fn run_backend(controller: &ThemeController) -> Result<(), Box<dyn std::error::Error>> {
    let (theme, system_theme) = backend_report(controller)?;
    println!("backend theme:        {}", theme.as_str());
    println!("backend system theme: {}", system_theme.as_str());
    Ok(())
}

/// What the backend mirror holds once the startup notification has landed.
fn backend_report(controller: &ThemeController) -> Result<(ThemeMode, ThemeMode), BackendError> {
    controller.flush();
    let bridge = controller.bridge();
    Ok((bridge.fetch_saved_theme()?, bridge.fetch_system_theme()?))
}
