//! Czytelnia command-line tool.
//!
//! Generates the JSONL interchange file from a story directory, moves it in
//! and out of the document store, and lists or toggles stories on any backend.

use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use czytelnia::app::App;
use czytelnia::config::{AppConfig, ConfigOverrides};
use czytelnia::database::connection::Database;
use czytelnia::logging;
use czytelnia::managers::library_manager::{LibraryManager, LibraryManagerTrait, StoryView};
use czytelnia::repository::DocumentStoryRepository;
use czytelnia::services::story_import::{
    count_records, export_records, generate_records, import_records, read_jsonl, write_jsonl,
};
use czytelnia::types::story::StoryRecord;

#[derive(Parser, Debug)]
#[command(author, version, about = "Czytelnia story library tool", long_about = None)]
struct Cli {
    #[command(flatten)]
    config: ConfigOverrides,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a JSONL file from the story directory
    Generate {
        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Upsert a JSONL file into the document store
    Import { input: PathBuf },
    /// Dump the document store as JSONL
    Export {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Count the records of a JSONL file
    Count { input: PathBuf },
    /// List stories in reading order
    List,
    /// Print one story
    Show { id: String },
    /// Mark a story as read
    MarkRead { id: String },
    /// Mark a story as unread
    MarkUnread { id: String },
}

fn open_document_store(config: &AppConfig) -> Result<DocumentStoryRepository> {
    std::fs::create_dir_all(&config.data_dir)
        .with_context(|| format!("Failed to create {}", config.data_dir.display()))?;
    let db = Database::open(config.database_path())
        .with_context(|| format!("Failed to open {}", config.database_path().display()))?;
    Ok(DocumentStoryRepository::new(Arc::new(db)))
}

fn write_records_to(output: Option<PathBuf>, records: &[StoryRecord]) -> Result<()> {
    match output {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_jsonl(BufWriter::new(file), records)?;
            info!(count = records.len(), path = %path.display(), "Wrote story records");
        }
        None => write_jsonl(io::stdout().lock(), records)?,
    }
    Ok(())
}

fn set_read(config: AppConfig, id: &str, value: bool) -> Result<()> {
    let mut app = App::new(config)?;
    let mut library = LibraryManager::new(app.repository.as_mut());
    let mut view = library.open_story(id);
    if let StoryView::NotFound { .. } = view {
        bail!("Story not found: {}", id);
    }
    library.set_read(&mut view, value)?;
    println!("{} {}", id, if value { "read" } else { "unread" });
    Ok(())
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();
    let config = AppConfig::from_env()?.with_overrides(cli.config);

    match cli.command {
        Command::Generate { output } => {
            let records = generate_records(&config.stories_dir)?;
            write_records_to(output, &records)?;
        }
        Command::Import { input } => {
            let file =
                File::open(&input).with_context(|| format!("Failed to open {}", input.display()))?;
            let records = read_jsonl(BufReader::new(file))?;
            let mut repo = open_document_store(&config)?;
            let summary = import_records(&mut repo, &records)?;
            println!("Imported {} stories ({} stored)", summary.imported, repo.count()?);
        }
        Command::Export { output } => {
            let repo = open_document_store(&config)?;
            let records = export_records(&repo)?;
            write_records_to(output, &records)?;
        }
        Command::Count { input } => {
            let file =
                File::open(&input).with_context(|| format!("Failed to open {}", input.display()))?;
            println!("{}", count_records(BufReader::new(file))?);
        }
        Command::List => {
            let mut app = App::new(config)?;
            let library = LibraryManager::new(app.repository.as_mut());
            let overview = library.overview()?;
            if overview.is_empty {
                println!("No stories yet.");
                return Ok(());
            }
            for story in &overview.stories {
                let mark = if story.is_read { "x" } else { " " };
                println!("[{}] {:>3}  {}  ({})", mark, story.number, story.title, story.id);
            }
            println!(
                "{}/{} read ({:.0}%)",
                overview.read_count, overview.total, overview.progress_percent
            );
        }
        Command::Show { id } => {
            let mut app = App::new(config)?;
            let library = LibraryManager::new(app.repository.as_mut());
            match library.open_story(&id) {
                StoryView::Found(story) => {
                    println!("{}. {}\n", story.number, story.title);
                    println!("{}", story.content);
                }
                StoryView::NotFound { id } => bail!("Story not found: {}", id),
            }
        }
        Command::MarkRead { id } => set_read(config, &id, true)?,
        Command::MarkUnread { id } => set_read(config, &id, false)?,
    }
    Ok(())
}
