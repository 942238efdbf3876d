//! Mapping of run results to process exit statuses

use tracing::{error, info};

use crate::core::error::{BumpResult, ConfigureResult};

/// Exit status of a run that completed or was cancelled by the user
pub const EXIT_SUCCESS: u8 = 0;

/// Exit status of a run that failed
pub const EXIT_FAILURE: u8 = 1;

/// Exit status for an SSID configuration run
///
/// User cancellation counts as success. Any other error is logged once.
pub fn configure_exit_code(result: &ConfigureResult<()>) -> u8 {
    match result {
        Ok(()) => EXIT_SUCCESS,
        Err(e) if e.is_cancelled() => {
            info!("Cancelled by user");
            EXIT_SUCCESS
        }
        Err(e) => {
            error!("SSID configuration failed: {}", e);
            EXIT_FAILURE
        }
    }
}

/// Exit status for a version bump run
pub fn bump_exit_code<T>(result: &BumpResult<T>) -> u8 {
    match result {
        Ok(_) => EXIT_SUCCESS,
        Err(e) => {
            error!("Version bump failed: {}", e);
            EXIT_FAILURE
        }
    }
}
