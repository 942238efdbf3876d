//! Version Bumper - Main Entry Point

use std::process::ExitCode;

use clap::Parser;
use controller_tools::{
    config::{BumpArgs, BumpSettings},
    core::{
        bumper::VersionBumper,
        error::BumpResult,
        outcome::{EXIT_FAILURE, EXIT_SUCCESS, bump_exit_code},
        release::commit_and_tag,
        types::BumpReport,
    },
    logging::LogContext,
    vcs::GitVcs,
};
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let args = BumpArgs::parse();

    let logging = match LogContext::new("version_bump", args.verbose, args.logfile.as_deref()) {
        Ok(logging) => logging,
        Err(e) => {
            eprintln!("Failed to open log file: {}", e);
            return ExitCode::FAILURE;
        }
    };

    ExitCode::from(logging.attach(run(args)).await)
}

async fn run(args: BumpArgs) -> u8 {
    let json = args.json;

    let result = bump(args).await;
    let code = bump_exit_code(&result);
    let Ok(report) = result else {
        return code;
    };

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(rendered) => println!("{}", rendered),
            Err(e) => {
                error!("Failed to render report: {}", e);
                return EXIT_FAILURE;
            }
        }
    }

    EXIT_SUCCESS
}

async fn bump(args: BumpArgs) -> BumpResult<BumpReport> {
    let settings = BumpSettings::try_from(args)?;
    info!(
        "Scanning {} for a {} bump{}",
        settings.root.display(),
        settings.bump,
        if settings.dry_run { " (dry run)" } else { "" }
    );

    let report = VersionBumper::new(&settings).run().await?;
    commit_and_tag(&GitVcs::new(&settings.root), &settings, &report).await?;

    if let Some(version) = report.last_version {
        info!("Current version: {}", version);
    }

    Ok(report)
}
