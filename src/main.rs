mod calendar;
mod client;
mod commands;
mod config;
mod form;
mod models;
mod web;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;

use commands::BookingInput;

/// Restaurant booking form: pick a date, choose a slot, reserve a table.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Path to config file (defaults are used if it does not exist)
    #[arg(short = 'c', long, global = true, default_value = "booking.toml")]
    config: PathBuf,

    /// Booking service base URL, overrides the config file
    #[arg(long, global = true, env = "BOOKING_API_URL")]
    base_url: Option<String>,

    /// Print detailed API responses
    #[arg(short = 'v', long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the reservation form
    Serve {
        /// Listen address (e.g. "0.0.0.0:3000")
        #[arg(short = 'a', long, default_value = "0.0.0.0:3009")]
        addr: String,
    },

    /// List available time slots for a date
    ///
    /// Examples:
    ///   slots 2025-03-10
    ///   slots 2025-03-09T23:00:00Z   (instant, read in the configured timezone)
    Slots {
        /// Reservation date (YYYY-MM-DD or RFC 3339)
        #[arg(value_name = "DATE")]
        date: String,
    },

    /// Create a reservation
    Book {
        /// Reservation date (YYYY-MM-DD or RFC 3339)
        #[arg(short = 'd', long)]
        date: String,

        /// Time slot as listed by `slots` (e.g. "18:30")
        #[arg(short = 't', long)]
        time: String,

        /// Number of guests
        #[arg(short = 'g', long)]
        guests: String,

        /// Name for the reservation
        #[arg(short = 'n', long)]
        name: String,

        /// Phone number or email
        #[arg(long)]
        contact: String,

        /// Show the request without sending it
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let cfg = config::load_config(&cli.config, cli.base_url.as_deref())?;
    debug!("Using booking service at {}", cfg.service.base_url);

    match cli.command {
        Command::Serve { addr } => {
            web::serve(cfg, &addr).await?;
        }
        Command::Slots { date } => {
            commands::run_slots(&cfg, &date, cli.verbose).await?;
        }
        Command::Book {
            date,
            time,
            guests,
            name,
            contact,
            dry_run,
        } => {
            let input = BookingInput {
                date,
                time,
                guests,
                name,
                contact,
            };
            commands::run_book(&cfg, input, dry_run, cli.verbose).await?;
        }
    }

    Ok(())
}
