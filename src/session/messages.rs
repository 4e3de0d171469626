//! Session start and stop messages

use crate::environment::Environment;
use crate::{print_cmd_info, print_cmd_success};
use std::time::Duration;

/// Print session startup message
pub fn print_session_starting(mode: &str, environment: &Environment, poll_interval: Duration) {
    print_cmd_info!(
        "Starting",
        "{} mode against {} ({}), polling every {} ms",
        mode,
        environment,
        environment.api_url(),
        poll_interval.as_millis()
    );
}

/// Print session shutdown message
pub fn print_session_shutdown() {
    print_cmd_info!("Shutting down...", "");
}

/// Print session exit message
pub fn print_session_exit_success() {
    print_cmd_success!("Smart Home Hub exited successfully", "");
}
