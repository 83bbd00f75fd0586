use clap::Parser;
use notesmaker_smoke::cli::{Cli, Outcome};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so NOTESMAKER_*_URL overrides apply without exporting them
    let _ = dotenvy::dotenv();

    // Diagnostics go to stderr; stdout carries the report
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match notesmaker_smoke::cli::run(cli).await {
        Ok(Outcome::Clean) => Ok(()),
        Ok(Outcome::ChecksFailed) => std::process::exit(1),
        Err(e) => {
            match std::env::var("CLI_VERBOSE").as_deref() {
                Ok("true") | Ok("1") => eprintln!("Error: {e:?}"),
                _ => eprintln!("Error: {e}"),
            }
            std::process::exit(1);
        }
    }
}
