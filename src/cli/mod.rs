pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::config::HarnessConfig;

#[derive(Parser)]
#[command(name = "notesmaker-smoke")]
#[command(about = "Smoke-test the NotesMaker backend, AI and frontend services")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[arg(long, global = true, value_name = "URL", help = "Backend base URL [default: http://localhost:5000]")]
    pub backend_url: Option<String>,

    #[arg(long, global = true, value_name = "URL", help = "AI service base URL [default: http://localhost:5001]")]
    pub ai_url: Option<String>,

    #[arg(long, global = true, value_name = "URL", help = "Frontend base URL [default: http://localhost:5174]")]
    pub frontend_url: Option<String>,

    #[arg(long, global = true, help = "Also probe the notes, folders and AI bridge routes")]
    pub extended: bool,

    #[arg(long, global = true, help = "Probe services concurrently, keeping per-service order")]
    pub concurrent: bool,

    #[arg(long, global = true, help = "Exit with status 1 when any check fails or errors")]
    pub strict: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the check battery (default)")]
    Run,

    #[command(about = "Show the checks that would run, without sending requests")]
    List,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// How the process should exit after a successful invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Clean,
    ChecksFailed,
}

impl Cli {
    /// Layer command-line flags over `base`.
    pub fn apply(&self, mut base: HarnessConfig) -> HarnessConfig {
        if let Some(url) = &self.backend_url {
            base.services.backend_base_url = url.clone();
        }
        if let Some(url) = &self.ai_url {
            base.services.ai_base_url = url.clone();
        }
        if let Some(url) = &self.frontend_url {
            base.services.frontend_base_url = url.clone();
        }
        if self.extended {
            base.run.extended = true;
        }
        if self.concurrent {
            base.run.concurrent = true;
        }
        if self.strict {
            base.run.strict = true;
        }
        base
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<Outcome> {
    let output_format = OutputFormat::from_cli(&cli);
    let config = cli.apply(crate::config::config().clone());

    match cli.command {
        None | Some(Commands::Run) => commands::run::handle(&config, output_format).await,
        Some(Commands::List) => commands::list::handle(&config, output_format),
    }
}
