use clap::{Parser, Subcommand};

mod check;
mod pipeline;
mod table;
mod validate;

#[derive(Debug, Parser)]
#[command(name = "mailable")]
#[command(about = "Batch postal address verification via the Google Address Validation API")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate every address in a CSV or Excel spreadsheet
    Validate(validate::ValidateArgs),
    /// Validate a single address and print the full verdict
    Check(check::CheckArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = mailable_core::load_app_config_from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .init();

    match cli.command {
        Commands::Validate(args) => validate::run_validate(&config, &args).await,
        Commands::Check(args) => check::run_check(&config, &args).await,
    }
}
