//! codeflow command-line tool.
//!
//! Provides the `codeflow` binary over the same script store, simulator and
//! AI collaborators the HTTP server uses, against a local SQLite file.

mod commands;
mod error;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::{Parser, Subcommand};

use codeflow_assist::{LlmAssistant, LlmConfig};
use codeflow_sim::config::DEFAULT_TICK;
use codeflow_storage::{ScriptStore, SqliteBlobStore};

use crate::commands::{ExplainSource, RunOptions};
use crate::error::CliError;

/// Python script workspace with a simulated terminal.
#[derive(Parser)]
#[command(name = "codeflow", about = "Python script workspace with a simulated terminal")]
struct Cli {
    /// Path to the script database file.
    #[arg(long, global = true, env = "CODEFLOW_DB_PATH", default_value = "codeflow.db")]
    db: String,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// List all scripts (id, name, last update in epoch ms).
    List,

    /// Print one script as JSON.
    Show { id: String },

    /// Create a script.
    Add {
        name: String,

        /// Read initial source from this file (`-` for stdin).
        #[arg(long)]
        from: Option<String>,
    },

    /// Replace a script's source.
    Edit {
        id: String,

        /// File holding the new source (`-` for stdin).
        #[arg(long)]
        from: String,
    },

    /// Delete a script.
    Delete { id: String },

    /// Write a script's source to a file or stdout.
    Export {
        id: String,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Simulate running a script.
    Run {
        id: String,

        /// Print everything at once instead of waiting between lines.
        #[arg(long)]
        instant: bool,

        /// Delay between staged lines in milliseconds.
        #[arg(long)]
        tick_ms: Option<u64>,
    },

    /// Generate a script from a description.
    Generate {
        prompt: String,

        /// Also store the result under this name.
        #[arg(long)]
        name: Option<String>,
    },

    /// Explain a stored script or a literal snippet.
    Explain {
        #[arg(required_unless_present = "snippet", conflicts_with = "snippet")]
        id: Option<String>,

        #[arg(long)]
        snippet: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(tracing::Level::WARN)
        .init();

    let cli = Cli::parse();
    let exit_code = match execute(cli).await {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("Error: {}", err);
            err.exit_code()
        }
    };
    process::exit(exit_code);
}

async fn execute(cli: Cli) -> Result<(), CliError> {
    let medium = SqliteBlobStore::new(&cli.db)?;
    let mut store = ScriptStore::new(medium);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::List => commands::list(&mut store, &mut out)?,
        Commands::Show { id } => commands::show(&mut store, &id, &mut out)?,
        Commands::Add { name, from } => {
            let content = from.as_deref().map(commands::read_source).transpose()?;
            commands::add(&mut store, &name, content.as_deref(), &mut out)?;
        }
        Commands::Edit { id, from } => {
            let content = commands::read_source(&from)?;
            commands::edit(&mut store, &id, &content)?;
        }
        Commands::Delete { id } => commands::delete(&mut store, &id)?,
        Commands::Export { id, output } => {
            commands::export(&mut store, &id, output.as_deref(), &mut out)?
        }
        Commands::Run {
            id,
            instant,
            tick_ms,
        } => {
            let options = RunOptions {
                instant,
                tick: tick_ms.map(Duration::from_millis).unwrap_or(DEFAULT_TICK),
            };
            commands::run(&mut store, &id, options, &mut out).await?;
        }
        Commands::Generate { prompt, name } => {
            let assistant = LlmAssistant::new(LlmConfig::from_env());
            commands::generate(&assistant, &mut store, &prompt, name.as_deref(), &mut out)
                .await?;
        }
        Commands::Explain { id, snippet } => {
            let assistant = LlmAssistant::new(LlmConfig::from_env());
            // clap guarantees exactly one of the two; an empty id fails parsing.
            let source = match &snippet {
                Some(text) => ExplainSource::Snippet(text),
                None => ExplainSource::Script(id.as_deref().unwrap_or_default()),
            };
            commands::explain(&assistant, &mut store, source, &mut out).await?;
        }
    }

    out.flush()?;
    Ok(())
}
