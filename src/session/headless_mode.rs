//! Headless mode execution

use super::{
    SessionData,
    messages::{print_session_exit_success, print_session_shutdown, print_session_starting},
};
use crate::print_cmd_info;
use crate::ui::UIConfig;
use crate::ui::dashboard::DashboardState;
use std::error::Error;
use std::time::Instant;

/// Runs the application in headless mode
///
/// Polls on the dashboard schedule and prints every displayable event plus
/// each connection status change, until Ctrl+C.
pub async fn run_headless_mode(mut session: SessionData) -> Result<(), Box<dyn Error>> {
    let environment = session.environment().clone();
    print_session_starting("headless", &environment, session.poll_interval);

    // Same state machine as the dashboard, without a screen
    let mut state = DashboardState::new(
        environment,
        Instant::now(),
        UIConfig::new(false, session.poll_interval),
    );
    let handle = session.poller.spawn(session.poll_interval);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    // Event loop: log events to console until shutdown
    loop {
        tokio::select! {
            _ = &mut ctrl_c => break,
            Some(event) = session.event_receiver.recv() => {
                if event.should_display() {
                    println!("{}", event);
                }
                let previous = state.status();
                state.add_event(event);
                state.update();
                if state.status() != previous {
                    print_cmd_info!("Status", "{}", state.status());
                }
            }
            else => break,
        }
    }

    print_session_shutdown();
    handle.shutdown().await;
    print_session_exit_success();

    Ok(())
}
