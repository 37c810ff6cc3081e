use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use crate::client::{AnalysisObserver, ApiClient};
use crate::error::AnalysisError;
use crate::models::{DisplayEntry, Highlights};
use crate::parsers::is_csv_file;
use crate::scheduler::{SchedulePolicy, Scheduler};
use crate::storage::{FileStore, HistoryStorage};
use crate::store::HistoryStore;
use crate::utils::{AppConfig, format_date};

#[derive(Parser)]
#[command(name = "galactic-analytics")]
#[command(version = "0.1.0")]
#[command(about = "Analyze galactic spending CSV files and browse past results", long_about = None)]
pub struct Cli {
    /// Analysis backend base URL (overrides API_HOST)
    #[arg(long, global = true)]
    pub api_host: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Upload a CSV file and record its highlights
    Analyze { file: PathBuf },
    /// List past analyses, newest first
    History,
    /// Show the highlights of a past analysis
    Show { id: String },
    /// Remove a past analysis
    Remove { id: String },
    /// Erase the whole history
    Clear,
    /// Download a generated sample report
    Generate {
        /// Directory to save the report into
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    let Some(command) = &cli.command else {
        println!("Use --help for usage information");
        return Ok(());
    };

    let config = AppConfig::from_env()?.with_api_host(cli.api_host.clone());
    match command {
        Commands::Analyze { file } => analyze(&config, file).await?,
        Commands::History => list_history(&config),
        Commands::Show { id } => show(&config, id)?,
        Commands::Remove { id } => {
            open_store(&config).remove_from_history(id).context("Failed to remove history item")?;
            println!("Removed {}", id);
        }
        Commands::Clear => {
            open_store(&config).clear_history().context("Failed to clear history")?;
            println!("History cleared");
        }
        Commands::Generate { out } => {
            let client = ApiClient::from_config(&config)?;
            let path = client.generate_report(out).await?;
            println!("Report saved to {}", path.display());
        }
    }

    Ok(())
}

fn open_store(config: &AppConfig) -> HistoryStore<FileStore> {
    HistoryStore::load(HistoryStorage::new(FileStore::new(config.data_dir())))
}

/// Collects the analysis outcome and forwards status lines to the progress scheduler
struct CliObserver<'a> {
    progress: &'a Scheduler<String>,
    entries: Vec<DisplayEntry>,
    highlights: Option<Highlights>,
    error: Option<AnalysisError>,
}

impl AnalysisObserver for CliObserver<'_> {
    fn on_entries(&mut self, entries: &[DisplayEntry]) {
        self.entries = entries.to_vec();
    }

    fn on_data(&mut self, highlights: Highlights) {
        self.progress.trigger("parsing file...".to_string());
        self.highlights = Some(highlights);
    }

    fn on_error(&mut self, error: AnalysisError) {
        self.error = Some(error);
    }

    fn on_complete(&mut self) {
        self.progress.trigger("done!".to_string());
    }
}

async fn analyze(config: &AppConfig, file: &Path) -> Result<()> {
    if !is_csv_file(file) {
        bail!("Only *.csv files can be uploaded: {}", file.display());
    }
    let file_name = file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .context("Upload path has no file name")?;

    let client = ApiClient::from_config(config)?;
    let mut store = open_store(config);

    let progress = Scheduler::new(SchedulePolicy::FrameAligned, |line: String| {
        eprintln!("{}", line);
    });
    progress.trigger(format!("uploading {}...", file_name));

    let mut observer =
        CliObserver { progress: &progress, entries: Vec::new(), highlights: None, error: None };
    client.analyze(file, &mut observer).await;
    let CliObserver { entries, highlights, error, .. } = observer;
    progress.flush().await;

    if let Some(error) = error {
        return Err(error.into());
    }
    let highlights = highlights.context("Analysis finished without highlights")?;

    let item = store
        .add_to_history(file_name, Some(highlights))
        .context("Failed to save analysis to history")?;

    print_entries(&entries);
    println!();
    println!("Saved as {}", item.id);
    Ok(())
}

fn list_history(config: &AppConfig) {
    let store = open_store(config);

    if store.history().is_empty() {
        println!("No analyses yet");
        return;
    }

    for item in store.history() {
        let marker = if item.has_highlights() { "" } else { "  (no highlights)" };
        println!("{}  {}  {}{}", item.id, format_date(&item.timestamp), item.file_name, marker);
    }
}

fn show(config: &AppConfig, id: &str) -> Result<()> {
    let mut store = open_store(config);
    let item = store.find(id).cloned().with_context(|| format!("No history item with id {}", id))?;

    store.set_selected_item(item);
    store.show_modal();

    match store.selected_item() {
        Some(item) if store.is_open_modal() => {
            println!("{} ({})", item.file_name, format_date(&item.timestamp));
            println!();
            let entries =
                item.highlights.as_ref().map(Highlights::display_entries).unwrap_or_default();
            print_entries(&entries);
        }
        Some(item) => println!("No highlights recorded for {}", item.file_name),
        None => {}
    }

    Ok(())
}

fn print_entries(entries: &[DisplayEntry]) {
    let width = entries.iter().map(|e| e.title.chars().count()).max().unwrap_or(0);
    for entry in entries {
        println!("{:>width$}  {}", entry.title, entry.description, width = width);
    }
}
