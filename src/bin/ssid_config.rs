//! SSID Configurator - Main Entry Point

use std::{io, process::ExitCode};

use clap::Parser;
use controller_tools::{
    config::{SsidArgs, SsidSettings},
    core::{
        configurator::provision,
        error::{ConfigureError, ConfigureResult},
        outcome::{EXIT_FAILURE, configure_exit_code},
        params::{TerminalPrompter, acquire},
    },
    logging::LogContext,
};
use tracing::info;

fn main() -> ExitCode {
    let args = SsidArgs::parse();

    let logging = match LogContext::new("ssid_config", args.verbose, args.logfile.as_deref()) {
        Ok(logging) => logging,
        Err(e) => {
            eprintln!("Failed to open log file: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Failed to start runtime: {}", e);
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    let code = runtime.block_on(logging.attach(run(args)));
    // A prompt interrupted by Ctrl-C may still block on stdin
    runtime.shutdown_background();

    ExitCode::from(code)
}

async fn run(args: SsidArgs) -> u8 {
    configure_exit_code(&configure(args).await)
}

async fn configure(args: SsidArgs) -> ConfigureResult<()> {
    let settings = SsidSettings::try_from(args)?;

    tokio::select! {
        biased;
        _ = tokio::signal::ctrl_c() => {
            info!("Received SIGINT (Ctrl+C), stopping; commands already sent stay applied");
            Err(ConfigureError::Cancelled)
        }
        result = acquire_and_provision(&settings) => result,
    }
}

async fn acquire_and_provision(settings: &SsidSettings) -> ConfigureResult<()> {
    let prompt_settings = settings.clone();
    let dispatch = tracing::dispatcher::get_default(|dispatch| dispatch.clone());
    let params = tokio::task::spawn_blocking(move || {
        tracing::dispatcher::with_default(&dispatch, || {
            acquire(&prompt_settings, &mut TerminalPrompter::new())
        })
    })
    .await
    .map_err(|e| ConfigureError::Terminal(io::Error::other(e)))??;

    info!(
        "Configuring SSID {} on {} (vlan {}, profile {}, hidden {})",
        params.ssid, params.host, params.vlan, params.wlan_profile, params.hidden
    );

    provision(settings, &params).await
}
