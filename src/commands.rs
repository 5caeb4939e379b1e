use anyhow::{bail, Result};
use tracing::{info, warn};

use crate::calendar;
use crate::client::BookingClient;
use crate::form::{self, BookingForm, Stage, SubmitOutcome};
use crate::models::{capitalize, BookingDetail, Config};

/// Reservation details given on the command line.
#[derive(Debug, Default)]
pub struct BookingInput {
    pub date: String,
    pub time: String,
    pub guests: String,
    pub name: String,
    pub contact: String,
}

pub async fn run_slots(config: &Config, date: &str, verbose: bool) -> Result<()> {
    let date = calendar::parse_selection(date, config.ui.timezone)?;
    let client = BookingClient::new(&config.service)?;

    let slots = client.available_slots(date).await?;
    if slots.is_empty() {
        println!("No available slots on {}", date);
        return Ok(());
    }

    println!("Available slots on {}:", date);
    for slot in &slots {
        println!("  {}", slot);
    }
    if verbose {
        println!("({} slots from {})", slots.len(), client.base_url());
    }
    Ok(())
}

pub async fn run_book(config: &Config, input: BookingInput, dry_run: bool, verbose: bool) -> Result<()> {
    let date = calendar::parse_selection(&input.date, config.ui.timezone)?;
    let client = BookingClient::new(&config.service)?;

    let mut form = BookingForm::new();
    form::select_date(&mut form, &client, Some(date)).await;
    if form.stage() == Stage::SlotReady {
        let slots = form.available_slots();
        if verbose {
            println!("Available slots on {}: {}", date, slots.join(", "));
        }
        if !slots.iter().any(|s| s == input.time.trim()) {
            warn!(
                "{} is not listed as available on {} (available: {}); submitting anyway",
                input.time,
                date,
                if slots.is_empty() { "none".to_string() } else { slots.join(", ") }
            );
        }
    }

    form.set_time(input.time);
    form.set_guests(input.guests);
    form.set_name(input.name);
    form.set_contact(input.contact);

    if dry_run {
        let Some(request) = form.begin_submit() else {
            bail!("Date, time, guests, name and contact are all required");
        };
        println!(
            "[DRY RUN] Would submit to {}:\n{}",
            client.base_url(),
            serde_json::to_string_pretty(&request)?
        );
        return Ok(());
    }

    match form::submit(&mut form, &client).await {
        SubmitOutcome::Confirmed => {
            info!("Booking confirmed for {}", date);
            print_confirmation(form.confirmation());
            if verbose {
                println!(
                    "Raw confirmation: {}",
                    serde_json::to_string_pretty(form.confirmation())?
                );
            }
            Ok(())
        }
        SubmitOutcome::Skipped => bail!("Date, time, guests, name and contact are all required"),
        SubmitOutcome::Failed => bail!(
            "{}",
            form.last_error().unwrap_or("Booking could not be created")
        ),
    }
}

fn print_confirmation(details: &[BookingDetail]) {
    println!("Booking created successfully.");
    for (i, detail) in details.iter().enumerate() {
        if i > 0 {
            println!();
        }
        for (key, value) in detail.entries() {
            println!("  {}: {}", capitalize(&key), value);
        }
    }
}
