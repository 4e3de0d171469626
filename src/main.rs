mod backend;
mod cli_messages;
mod config;
mod consts;
mod environment;
mod error_classifier;
mod events;
mod logging;
mod session;
mod snapshot;
mod ui;
mod workers;

use crate::config::{Config, get_config_path};
use crate::consts::cli_consts::backend::API_URL_ENV_VAR;
use crate::session::commands::{self, snapshot_lines};
use crate::session::{run_headless_mode, run_tui_mode, setup_session};
use crate::workers::commander::DISPATCH_FAILED;
use clap::{ArgAction, Parser, Subcommand};
use std::error::Error;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Terminal dashboard for the smart home backend
struct Args {
    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the dashboard
    Start {
        /// Run without the terminal UI, printing events to stdout
        #[arg(long, action = ArgAction::SetTrue)]
        headless: bool,

        /// Enable background colors
        #[arg(long = "with-background", action = ArgAction::SetTrue)]
        with_background: bool,

        /// Backend base URL, or `production` / `local`
        #[arg(long, value_name = "URL")]
        api_url: Option<String>,

        /// Milliseconds between two realtime polls
        #[arg(long, value_name = "MS")]
        interval_ms: Option<u64>,
    },
    /// Poll the backend once and print every node
    Snapshot {
        /// Print the snapshot as JSON
        #[arg(long, action = ArgAction::SetTrue)]
        json: bool,

        /// Backend base URL, or `production` / `local`
        #[arg(long, value_name = "URL")]
        api_url: Option<String>,
    },
    /// Send a command to a node
    Send {
        /// Target node, e.g. `kitchen`
        device: String,

        /// Action, e.g. `LIGHT_ON` or `LIGHT_OFF`
        action: String,

        /// Backend base URL, or `production` / `local`
        #[arg(long, value_name = "URL")]
        api_url: Option<String>,
    },
    /// Update the alert thresholds of a node
    SetLimits {
        /// Target node
        device: String,

        /// Maximum temperature in °C
        #[arg(long, value_name = "CELSIUS")]
        temp_th: Option<f64>,

        /// Maximum gas reading in volts
        #[arg(long, value_name = "VOLTS")]
        gas_th: Option<f64>,

        /// Backend base URL, or `production` / `local`
        #[arg(long, value_name = "URL")]
        api_url: Option<String>,
    },
    /// Save default settings to the config file
    Configure {
        /// Backend base URL, or `production` / `local`
        #[arg(long, value_name = "URL")]
        api_url: Option<String>,

        /// Milliseconds between two realtime polls
        #[arg(long, value_name = "MS")]
        poll_interval_ms: Option<u64>,
    },
    /// Delete the config file
    Reset,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    logging::init_log_level();
    let args = Args::parse();

    let config_path = get_config_path()?;
    let config = Config::load_or_default(&config_path);
    let env_var = std::env::var(API_URL_ENV_VAR).ok();

    match args.command {
        Command::Start {
            headless,
            with_background,
            api_url,
            interval_ms,
        } => {
            let environment = config.resolve_environment(api_url.as_deref(), env_var.as_deref());
            let poll_interval = config.resolve_poll_interval(interval_ms);
            let session = setup_session(environment, poll_interval)?;
            if headless {
                run_headless_mode(session).await
            } else {
                run_tui_mode(session, with_background).await
            }
        }
        Command::Snapshot { json, api_url } => {
            let environment = config.resolve_environment(api_url.as_deref(), env_var.as_deref());
            let mut session = setup_session(environment, config.resolve_poll_interval(None))?;
            match commands::fetch_snapshot(&mut session).await {
                Ok(snapshot) if json => {
                    println!("{}", serde_json::to_string_pretty(&snapshot)?);
                    Ok(())
                }
                Ok(snapshot) => {
                    for line in snapshot_lines(&snapshot) {
                        println!("{}", line);
                    }
                    Ok(())
                }
                Err(e) => {
                    print_cmd_error!("Snapshot failed", "{}", e);
                    Err(e.into())
                }
            }
        }
        Command::Send {
            device,
            action,
            api_url,
        } => {
            let environment = config.resolve_environment(api_url.as_deref(), env_var.as_deref());
            let session = setup_session(environment, config.resolve_poll_interval(None))?;
            match commands::send_command(&session, &device, &action).await {
                Ok(command) => {
                    print_cmd_success!("Sent:", "{}", command);
                    Ok(())
                }
                Err(e) => {
                    print_cmd_error!(DISPATCH_FAILED);
                    Err(e.into())
                }
            }
        }
        Command::SetLimits {
            device,
            temp_th,
            gas_th,
            api_url,
        } => {
            let environment = config.resolve_environment(api_url.as_deref(), env_var.as_deref());
            let session = setup_session(environment, config.resolve_poll_interval(None))?;
            match commands::set_limits(&session, &device, temp_th, gas_th).await {
                Ok(limits) => {
                    print_cmd_success!("Limits updated", "{}: {}", device, limits);
                    Ok(())
                }
                Err(e) => {
                    print_cmd_error!("Failed to update limits", "{}", e);
                    Err(e.into())
                }
            }
        }
        Command::Configure {
            api_url,
            poll_interval_ms,
        } => {
            if api_url.is_none() && poll_interval_ms.is_none() {
                print_cmd_info!("Config", "{}", config_path.display());
                println!("{}", serde_json::to_string_pretty(&config)?);
                return Ok(());
            }
            let mut updated = config;
            updated.merge(Config::new(api_url, poll_interval_ms));
            updated
                .save(&config_path)
                .map_err(|e| format!("Failed to save config: {}", e))?;
            print_cmd_success!("Configuration saved", "{}", config_path.display());
            Ok(())
        }
        Command::Reset => {
            if Config::clear(&config_path)? {
                print_cmd_success!("Configuration removed", "{}", config_path.display());
            } else {
                print_cmd_info!("No config file found", "{}", config_path.display());
            }
            Ok(())
        }
    }
}
