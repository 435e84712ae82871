//! Terminal client for the company profiler service.
//!
//! Validates the URL locally, submits it through an [`AnalysisSession`] and
//! prints the rendered profile.

use clap::Parser;
use company_profiler::client::{AnalysisSession, HttpAnalysisApi, SubmitOutcome};
use company_profiler::config::{ClientSettings, DEFAULT_API_URL};
use company_profiler::core::{AnalysisState, ProfileView};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "profiler-cli", version, about = "Analyze a company website")]
struct Cli {
    /// Website to analyze, e.g. https://example.com
    website_url: String,

    /// Base URL of the profiler API (defaults to PROFILER_API_URL / VITE_API_URL)
    #[arg(long)]
    api_url: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();

    // Logs go to stderr so stdout only carries the profile
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let api_url = cli
        .api_url
        .unwrap_or_else(|| ClientSettings::from_env().api_url);

    if api_url != DEFAULT_API_URL {
        tracing::info!("Using profiler API at {}", api_url);
    }

    let session = AnalysisSession::new(HttpAnalysisApi::new(api_url));

    match session.submit(&cli.website_url).await {
        SubmitOutcome::Invalid { hint } => {
            eprintln!("{}", hint);
            ExitCode::from(2)
        }
        SubmitOutcome::Busy => {
            eprintln!("An analysis is already running.");
            ExitCode::from(1)
        }
        SubmitOutcome::Completed(AnalysisState::Success(profile)) => {
            print!("{}", ProfileView::from(&profile));
            ExitCode::SUCCESS
        }
        SubmitOutcome::Completed(state) => {
            eprintln!(
                "{}",
                state
                    .failure_message()
                    .unwrap_or(company_profiler::core::GENERIC_FAILURE)
            );
            ExitCode::from(1)
        }
    }
}
