mod cli;
mod settings;
mod source;

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use eyre::{bail, Result, WrapErr};
use reader_core::config::{data_root, log_dir, ReaderSettings};
use reader_core::layout::{layout, LayoutOptions};
use reader_core::pipeline::prepare;
use reader_core::state::{load_history, record, save_history, HistoryEntry, HISTORY_FILE};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use ui::app::CrosstermEvents;
use ui::chapters::{ChapterBrowser, ChapterSource};

use crate::cli::Cli;
use crate::source::FileSource;

/// Exit status when `--dump` finds no chapter text.
const EXIT_NO_CONTENT: u8 = 2;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let _log_guard = init_logging(cli.verbose);

    let mut settings = settings::load(cli.config.as_deref())?;
    settings::apply_cli(&mut settings, &cli);

    let history_path = data_root().map(|d| d.join(HISTORY_FILE));
    if cli.history {
        print_history(history_path.as_deref());
        return Ok(ExitCode::SUCCESS);
    }

    let (source, start, novel) = match cli.resume {
        Some(n) => resume_target(history_path.as_deref(), n)?,
        None => {
            let source = FileSource::new(cli.files.clone());
            let novel = cli
                .title
                .clone()
                .or_else(|| source.folder_name())
                .unwrap_or_else(|| "Untitled".to_string());
            (source, cli.start_index(), novel)
        }
    };
    if let Some(index) = start.filter(|&i| i >= source.len()) {
        bail!(
            "--start {} is past the last chapter ({})",
            index + 1,
            source.len()
        );
    }

    if cli.dump {
        return dump(&source, start.unwrap_or(0), cli.width, &settings);
    }

    let mut terminal = ui::terminal::init().wrap_err("initialising terminal")?;
    let mut browser = ChapterBrowser::new(novel.clone(), source, settings);
    let outcome = browser.run(&mut terminal, &mut CrosstermEvents, start);
    ui::terminal::restore().wrap_err("restoring terminal")?;
    let last = outcome?;

    if let (Some(index), Some(path)) = (last, history_path) {
        let source = browser.source();
        let mut entries = load_history(&path);
        record(
            &mut entries,
            HistoryEntry::new(novel, index, source.title(index), source.key(index)),
        );
        if let Err(err) = save_history(&path, &entries) {
            warn!(path = %path.display(), %err, "could not save history");
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Logs go to a file so they never draw over the reader. Returns `None`
/// when there is nowhere to write them.
fn init_logging(verbose: u8) -> Option<WorkerGuard> {
    let dir = log_dir()?;
    std::fs::create_dir_all(&dir).ok()?;
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let file_appender = tracing_appender::rolling::never(&dir, "proseview.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .ok()?;
    Some(guard)
}

fn dump(source: &FileSource, index: usize, width: u16, settings: &ReaderSettings) -> Result<ExitCode> {
    let markup = source
        .load(index)
        .wrap_err_with(|| format!("reading {}", source.key(index)))?;
    let text = match prepare(&markup, &settings.marker(), settings.min_content_len) {
        Ok(text) => text,
        Err(err) => {
            info!(%err, "dump found no content");
            eprintln!("No chapter content found in {}: {err}", source.key(index));
            return Ok(ExitCode::from(EXIT_NO_CONTENT));
        }
    };
    let options = LayoutOptions::new(width as usize).with_paragraph_gap(settings.paragraph_gap);
    for line in layout(&text, &options) {
        println!("{line}");
    }
    Ok(ExitCode::SUCCESS)
}

/// Rebuilds the chapter list of history entry `n` (1-based) from the folder
/// its saved chapter lives in.
fn resume_target(history: Option<&Path>, n: u64) -> Result<(FileSource, Option<usize>, String)> {
    let entries = history.map(load_history).unwrap_or_default();
    let Some(entry) = usize::try_from(n - 1).ok().and_then(|i| entries.get(i)) else {
        bail!("no history entry {n} ({} saved)", entries.len());
    };
    let chapter = Path::new(&entry.source);
    let (source, position) = FileSource::siblings_of(chapter)
        .wrap_err_with(|| format!("reopening {}", entry.source))?;
    if source.is_empty() {
        bail!("no chapters left next to {}", entry.source);
    }
    let start = position.unwrap_or_else(|| {
        warn!(source = %entry.source, "saved chapter is gone, using its index");
        entry.chapter_index.min(source.len() - 1)
    });
    info!(novel = %entry.novel, start, "resuming from history");
    Ok((source, Some(start), entry.novel.clone()))
}

fn print_history(path: Option<&Path>) {
    let entries = path.map(load_history).unwrap_or_default();
    if entries.is_empty() {
        println!("No reading history");
        return;
    }
    for (i, entry) in entries.iter().enumerate() {
        println!(
            "{:>2}. {} - Chapter {}: {} [{}] ({})",
            i + 1,
            entry.novel,
            entry.chapter_index + 1,
            entry.chapter_title,
            entry.source,
            entry.saved_at.format("%Y-%m-%d %H:%M"),
        );
    }
}
