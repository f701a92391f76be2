//! sift - Entry Point

use clap::Parser;
use sift::config::{self, CliOverrides, ResolvedConfig};
use sift::model::AppError;
use sift::source::FileSource;
use sift::state::{AppState, ReloadMode};
use sift::storage::SlotStore;
use std::path::PathBuf;
use tracing::{error, info};

/// sift - reveal lines of a text file by stacking keyword filters
#[derive(Parser, Debug)]
#[command(name = "sift")]
#[command(version)]
#[command(about = "Terminal viewer that reveals lines of a text file by stacking keyword filters")]
pub struct Args {
    /// Path to the text file to view
    pub file: PathBuf,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory holding saved filter slots
    #[arg(long)]
    pub slots_dir: Option<PathBuf>,

    /// Log at debug level
    #[arg(long)]
    pub debug: bool,

    /// Start with line wrapping off
    #[arg(long)]
    pub no_wrap: bool,

    /// Start with line numbers shown
    #[arg(short = 'n', long)]
    pub line_numbers: bool,

    /// Reload the file when it changes and scroll to the end (like tail -f)
    #[arg(short, long, conflicts_with = "follow")]
    pub tail: bool,

    /// Reload the file when it changes and scroll to the top
    #[arg(short, long)]
    pub follow: bool,

    /// Start with a filter on this keyword (repeatable, one filter each)
    #[arg(short, long = "keyword", value_name = "TEXT")]
    pub keywords: Vec<String>,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            slots_dir: self.slots_dir.clone(),
            wrap: self.no_wrap.then_some(false),
            line_numbers: self.line_numbers.then_some(true),
        }
    }

    fn reload_mode(&self) -> ReloadMode {
        if self.tail {
            ReloadMode::AutoTail
        } else if self.follow {
            ReloadMode::AutoHead
        } else {
            ReloadMode::Manual
        }
    }
}

/// Opens the file and slot store and applies the startup flags.
fn open_session(args: &Args, config: &ResolvedConfig) -> Result<AppState, AppError> {
    let store = SlotStore::open(&config.slots_dir)?;
    let mut state = AppState::open(
        FileSource::new(&args.file),
        store,
        config.view_config(),
        config.context_policy(),
    )?
    .with_help(sift::view::help_content());

    for keyword in &args.keywords {
        state.current_view_mut().push_keyword(keyword, true);
    }
    Ok(state.with_reload_mode(args.reload_mode()))
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    // Defaults → Config File → Env Vars → CLI Args
    let config = config::resolve(args.config.clone(), args.overrides())?;

    sift::logging::init(&config.log_file_path, args.debug)?;
    info!(config = ?config, file = %args.file.display(), "Configuration loaded and resolved");

    let state = open_session(&args, &config)?;
    sift::view::run_with_state(state, config.poll_interval())?;
    Ok(())
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(args) {
        error!(error = %e, "sift exited with an error");
        eprintln!("sift: {e}");
        std::process::exit(1);
    }
}
