// Forbid accidental stdout/stderr writes in the *library* portion of the TUI.
// Errors that happen before the alternate screen is entered opt out locally.
#![deny(clippy::print_stdout, clippy::print_stderr)]
use app::App;
use folio_core::Session;
use folio_core::config::Config;
use folio_core::config::ConfigOverrides;
use folio_core::profile::Profile;
use std::fs::OpenOptions;
use tracing_appender::non_blocking;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

mod app;
mod app_event;
mod app_event_sender;
mod cli;
mod colors;
mod composer;
mod composer_history;
mod config_override;
mod history_view;
mod hyperlink;
mod tui;

pub use cli::Cli;
pub use cli::OverlapCliArg;
pub use config_override::CliConfigOverrides;
pub use history_view::HistoryView;
pub use hyperlink::HyperlinkTarget;

pub fn run_main(cli: Cli) -> std::io::Result<()> {
    let overrides = ConfigOverrides {
        prompt: cli.prompt.clone(),
        stagger_ms: cli.stagger_ms,
        overlap: cli.overlap.map(Into::into),
        show_banner: cli.no_banner.then_some(false),
        hyperlinks: cli.no_hyperlinks.then_some(false),
    };

    // Parse `-c` overrides from the CLI.
    let cli_kv_overrides = match cli.config_overrides.parse_overrides() {
        Ok(v) => v,
        #[allow(clippy::print_stderr)]
        Err(e) => {
            eprintln!("Error parsing -c overrides: {e}");
            std::process::exit(1);
        }
    };

    #[allow(clippy::print_stderr)]
    let config = match Config::load_with_cli_overrides(cli_kv_overrides, overrides) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error loading configuration: {err}");
            std::process::exit(1);
        }
    };

    let log_dir = folio_core::config::log_dir(&config);
    std::fs::create_dir_all(&log_dir)?;
    // Open (or create) the log file, appending to it.
    let mut log_file_opts = OpenOptions::new();
    log_file_opts.create(true).append(true);

    // Ensure the file is only readable and writable by the current user.
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        log_file_opts.mode(0o600);
    }

    let log_file = log_file_opts.open(log_dir.join("folio-tui.log"))?;

    // Wrap file in non-blocking writer.
    let (non_blocking, _guard) = non_blocking(log_file);

    let default_filter = if cli.debug {
        "folio_core=info,folio_tui=info"
    } else {
        "folio_core=warn,folio_tui=warn"
    };

    // use RUST_LOG env var, defaulting based on debug flag.
    let env_filter = || {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
    };

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_target(false)
        .with_filter(env_filter());

    let _ = tracing_subscriber::registry().with(file_layer).try_init();

    tracing::info!(
        folio_home = %config.folio_home.display(),
        overlap = %config.tui.overlap,
        "starting folio"
    );

    run_ratatui_app(cli, config).map_err(|err| std::io::Error::other(err.to_string()))
}

fn run_ratatui_app(cli: Cli, config: Config) -> color_eyre::Result<()> {
    color_eyre::install()?;

    // Forward panic reports through tracing, then chain to the previous hook
    // so users still get a full report after the terminal is restored.
    let prev_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tracing::error!("panic: {info}");
        prev_hook(info);
    }));

    // Build the session before touching the terminal so errors print cleanly.
    let session = Session::from_config(&config, Profile::default())?;

    let mut terminal = tui::init(&config)?;
    terminal.clear()?;

    let mut app = App::new(&config, session, cli.commands);
    let app_result = app.run(&mut terminal);

    restore();
    app_result
}

#[expect(
    clippy::print_stderr,
    reason = "TUI should no longer be displayed, so we can write to stderr."
)]
fn restore() {
    if let Err(err) = tui::restore() {
        eprintln!(
            "failed to restore terminal. Run `reset` or restart your terminal to recover: {err}"
        );
    }
}
