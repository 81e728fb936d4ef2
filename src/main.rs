// mdpick - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Config loading and logging initialisation
// 3. One native picker round
// 4. Emitting the selection to stdout or a file

use clap::Parser;
use mdpick::app::import::{self, OutputFormat};
use mdpick::platform::config::{self, PlatformPaths};
use mdpick::platform::native::NativeHost;
use mdpick::util::{constants, logging};
use mdpick::FilePicker;
use std::path::{Path, PathBuf};

/// mdpick - open a Markdown file through the native file dialog.
///
/// Prints the chosen file's content to stdout (or writes it to --output).
/// Exits 1 when no file was obtained.
#[derive(Parser, Debug)]
#[command(name = "mdpick", version, about)]
struct Cli {
    /// Emit `{ "name", "content" }` JSON instead of raw content.
    #[arg(long)]
    json: bool,

    /// Write the result to this file instead of stdout.
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Dialog title (overrides config).
    #[arg(short = 't', long = "title")]
    title: Option<String>,

    /// Directory the dialog opens in (overrides config).
    #[arg(short = 'C', long = "dir")]
    dir: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    let paths = PlatformPaths::resolve();
    let (mut app_config, config_warnings) = config::load_config(&paths.config_dir);

    logging::init(cli.debug, app_config.log_level.as_deref());
    for warning in &config_warnings {
        tracing::warn!("{}", warning);
    }

    tracing::info!(version = constants::APP_VERSION, debug = cli.debug, "mdpick starting");

    if let Some(title) = cli.title {
        app_config.dialog_title = title;
    }
    if let Some(dir) = cli.dir {
        app_config.start_directory = Some(dir);
    }

    let picker = FilePicker::new(NativeHost::from_config(&app_config));
    let Some(selection) = futures::executor::block_on(picker.open_picker()) else {
        tracing::info!("No file selected");
        std::process::exit(constants::EXIT_NO_SELECTION);
    };

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    let written = match cli.output {
        Some(ref path) => import::write_to(path, &selection, format),
        None => import::emit(&selection, format, std::io::stdout().lock(), Path::new("<stdout>")),
    };

    if let Err(e) = written {
        tracing::error!(error = %e, "Failed to emit selection");
        eprintln!("Error: {e}");
        std::process::exit(constants::EXIT_OUTPUT_FAILED);
    }
}
