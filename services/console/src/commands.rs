use crate::render;
use chrono::Local;
use clap::{ArgGroup, Args};
use policy_navigator::config::BackendConfig;
use policy_navigator::domain::CitizenProfile;
use policy_navigator::error::AppError;
use policy_navigator::gateway::HttpBenefitsGateway;
use policy_navigator::screens::{BenefitsScreen, EligibilityScreen, InterpretScreen, ViewState};
use policy_navigator::status::{StatusPoller, StatusSnapshot};
use std::path::PathBuf;
use std::sync::Arc;

const SAMPLE_POLICY_TEXT: &str = "Students residing in Karnataka with family income below \
8 lakh per annum are eligible for an education scholarship of 50000 INR per year.";

#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("source")
        .required(true)
        .args(["text", "file", "sample"]),
))]
pub(crate) struct InterpretArgs {
    /// Raw policy text to interpret
    #[arg(long)]
    pub(crate) text: Option<String>,
    /// Read the policy text from a file
    #[arg(long)]
    pub(crate) file: Option<PathBuf>,
    /// Interpret a bundled sample policy
    #[arg(long)]
    pub(crate) sample: bool,
    /// Scheme name hint forwarded to the interpreter
    #[arg(long)]
    pub(crate) name: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct EligibilityArgs {
    /// Annual family income in INR
    #[arg(long)]
    pub(crate) income: f64,
    /// State of residence, e.g. Karnataka
    #[arg(long)]
    pub(crate) state: String,
    /// Whether the citizen is currently enrolled as a student
    #[arg(long)]
    pub(crate) student: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct StatusArgs {
    /// Keep watching and print every status change until interrupted
    #[arg(long)]
    pub(crate) watch: bool,
}

pub(crate) async fn run_interpret(
    gateway: HttpBenefitsGateway,
    args: InterpretArgs,
) -> Result<(), AppError> {
    let InterpretArgs {
        text,
        file,
        sample,
        name,
    } = args;

    let text = if sample {
        SAMPLE_POLICY_TEXT.to_string()
    } else if let Some(path) = file {
        std::fs::read_to_string(path)?
    } else {
        text.unwrap_or_default()
    };

    let mut screen = InterpretScreen::new(Arc::new(gateway));
    screen.submit(&text, name.as_deref()).await;

    match screen.state() {
        ViewState::Success(policy) => render::policy_details(policy),
        ViewState::Failure(message) => println!("{message}"),
        ViewState::Idle | ViewState::Loading => {}
    }
    Ok(())
}

pub(crate) async fn run_eligibility(
    gateway: HttpBenefitsGateway,
    args: EligibilityArgs,
) -> Result<(), AppError> {
    let EligibilityArgs {
        income,
        state,
        student,
    } = args;
    let profile = CitizenProfile {
        income,
        state,
        is_student: student,
    };

    let mut screen = EligibilityScreen::new(Arc::new(gateway));
    screen.submit(&profile).await;

    match screen.state() {
        ViewState::Success(matches) => render::benefit_matches(&profile, matches),
        ViewState::Failure(message) => println!("{message}"),
        ViewState::Idle | ViewState::Loading => {}
    }
    Ok(())
}

pub(crate) async fn run_benefits(gateway: HttpBenefitsGateway) -> Result<(), AppError> {
    let mut screen = BenefitsScreen::new(Arc::new(gateway));
    screen.load().await;

    match screen.state() {
        ViewState::Success(policies) => render::policy_catalog(policies),
        ViewState::Failure(message) => println!("{message}"),
        ViewState::Idle | ViewState::Loading => {}
    }
    Ok(())
}

pub(crate) async fn run_status(
    gateway: HttpBenefitsGateway,
    config: &BackendConfig,
    args: StatusArgs,
) -> Result<(), AppError> {
    let StatusArgs { watch } = args;

    let handle = StatusPoller::new(Arc::new(gateway), config.status_poll_interval).activate();
    let mut snapshots = handle.subscribe();

    if watch {
        println!(
            "Watching backend status (probing every {}s, Ctrl-C to stop)",
            config.status_poll_interval.as_secs()
        );
        loop {
            tokio::select! {
                changed = snapshots.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let snapshot = snapshots.borrow_and_update().clone();
                    println!("[{}] {}", Local::now().format("%H:%M:%S"), render::status_line(&snapshot));
                }
                _ = tokio::signal::ctrl_c() => break,
            }
        }
        return Ok(());
    }

    while snapshots.changed().await.is_ok() {
        let snapshot = snapshots.borrow_and_update().clone();
        if !matches!(snapshot, StatusSnapshot::Loading) {
            render::status_snapshot(&snapshot);
            break;
        }
    }
    Ok(())
}
