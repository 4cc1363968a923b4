use crate::commands::{
    run_benefits, run_eligibility, run_interpret, run_status, EligibilityArgs, InterpretArgs,
    StatusArgs,
};
use clap::{Parser, Subcommand};
use policy_navigator::config::AppConfig;
use policy_navigator::error::AppError;
use policy_navigator::gateway::HttpBenefitsGateway;
use policy_navigator::telemetry;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "Policy Navigator Console",
    about = "Interpret policy text, check benefit eligibility, and watch backend status from the command line",
    version
)]
struct Cli {
    /// Override the configured backend base URL
    #[arg(long, global = true)]
    base_url: Option<String>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit policy text and show the extracted eligibility rules
    Interpret(InterpretArgs),
    /// Match a citizen profile against the scheme catalog
    Eligibility(EligibilityArgs),
    /// List the backend's sample scheme catalog
    Benefits,
    /// Show backend connectivity and feature flags (default command)
    Status(StatusArgs),
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    let mut config = AppConfig::load()?;
    if let Some(base_url) = cli.base_url {
        config.backend.base_url = base_url;
    }

    telemetry::init(&config.telemetry)?;

    let gateway = HttpBenefitsGateway::new(&config.backend)?;
    debug!(?config.environment, base_url = %config.backend.base_url, "console configured");

    let command = cli
        .command
        .unwrap_or_else(|| Command::Status(StatusArgs::default()));

    match command {
        Command::Interpret(args) => run_interpret(gateway, args).await,
        Command::Eligibility(args) => run_eligibility(gateway, args).await,
        Command::Benefits => run_benefits(gateway).await,
        Command::Status(args) => run_status(gateway, &config.backend, args).await,
    }
}
