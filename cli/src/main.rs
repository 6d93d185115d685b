mod tui;

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};
use chrono::{DateTime, Local};
use clap::{ArgAction, Parser};
use tabled::settings::Style;
use tabled::{Table, Tabled};
use taskpad_core::{FileStore, Filter, Notice, TaskEngine};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "taskpad")]
#[command(about = "A small local task list", long_about = None)]
struct Cli {
    /// Data directory (defaults to ~/.taskpad)
    #[arg(long = "data")]
    data: Option<PathBuf>,

    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,

    #[arg(short = 'q', long = "quiet", action = ArgAction::Count)]
    quiet: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Add a new task (usage: add Buy milk)
    Add {
        /// Task text; multiple words are joined with spaces
        #[arg(trailing_var_arg = true)]
        text: Vec<String>,
    },
    /// List tasks
    List {
        /// Show all, active or completed tasks
        #[arg(
            long,
            default_value = "all",
            value_parser = clap::builder::ValueParser::new(|s: &str| s.parse::<Filter>())
        )]
        filter: Filter,
    },
    /// Toggle completion of a task by id (prefix allowed)
    Done { id: String },
    /// Delete a task by id (prefix allowed)
    Rm { id: String },
    /// Toggle the dark/light display preference
    Theme,
    /// Open the terminal user interface
    Tui,
}

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "St")]
    status: String,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Created")]
    created: String,
    #[tabled(rename = "Task")]
    text: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet)?;

    let store = FileStore::new(cli.data)?;
    let mut engine = TaskEngine::load(store);

    match cli.command {
        Some(Commands::Add { text }) => {
            let text = text.join(" ");
            match engine.add_task(&text) {
                Ok(_) => {
                    // Prepend order: the task just added is the first one
                    let task = engine.tasks_matching(Filter::All)[0];
                    println!("Task added: {} (ID: {})", task.text, short_id(&task.id));
                }
                Err(e) => println!("Error: {}.", e),
            }
        }
        Some(Commands::List { filter }) => print_list(&engine, filter),
        Some(Commands::Done { id }) => {
            let id = resolve_id(&engine, &id)?;
            match engine.toggle_task(id) {
                Some(Notice::TaskCompleted) => println!("Task completed."),
                _ => println!("Task reopened."),
            }
        }
        Some(Commands::Rm { id }) => {
            let id = resolve_id(&engine, &id)?;
            engine.delete_task(id);
            println!("Task deleted.");
        }
        Some(Commands::Theme) => {
            let on = engine.toggle_dark_mode();
            println!("Dark mode {}.", if on { "on" } else { "off" });
        }
        Some(Commands::Tui) | None => tui::run(engine)?,
    }
    Ok(())
}

fn print_list(engine: &TaskEngine<FileStore>, filter: Filter) {
    let tasks = engine.tasks_matching(filter);
    if tasks.is_empty() {
        match filter {
            Filter::All => println!("No tasks found."),
            _ => println!("No {} tasks.", filter.label()),
        }
        return;
    }

    let rows: Vec<TaskRow> = tasks
        .iter()
        .map(|task| {
            let created: DateTime<Local> = DateTime::from(task.created_at);
            TaskRow {
                status: if task.completed { "✔" } else { "☐" }.to_string(),
                id: short_id(&task.id),
                created: created.format("%Y-%m-%d").to_string(),
                text: task.text.clone(),
            }
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::modern());
    println!("{}", table);
    println!(
        "{} active · {} done",
        engine.active_count(),
        engine.completed_count()
    );
}

/// Resolve a full or prefix id against the collection. Unknown and
/// ambiguous prefixes are command-line errors; the engine never sees them.
fn resolve_id(engine: &TaskEngine<FileStore>, input: &str) -> Result<Uuid> {
    let matches: Vec<Uuid> = engine
        .tasks_matching(Filter::All)
        .iter()
        .filter(|t| t.id.to_string().starts_with(input))
        .map(|t| t.id)
        .collect();

    match matches.len() {
        1 => Ok(matches[0]),
        0 => bail!("no task matches id '{}'", input),
        n => bail!("id '{}' is ambiguous ({} matches)", input, n),
    }
}

fn short_id(id: &Uuid) -> String {
    id.to_string()[..8].to_string()
}

fn init_tracing(verbose: u8, quiet: u8) -> Result<()> {
    let default_level = if quiet >= 2 {
        "error"
    } else if quiet == 1 {
        "warn"
    } else if verbose >= 2 {
        "debug"
    } else if verbose == 1 {
        "info"
    } else {
        "warn"
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow!("invalid RUST_LOG / log filter: {e}"))?;

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();

    if let Err(err) = init_result {
        tracing::debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(())
}
