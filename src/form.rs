//! Reservation form state and the two network round-trips that drive it.
//!
//! `BookingForm` is plain state: callers feed it user input and service
//! results. The async helpers at the bottom pair each state transition with
//! the matching `BookingClient` call.

use anyhow::Result;
use chrono::NaiveDate;
use tracing::{debug, error, info};

use crate::calendar;
use crate::client::BookingClient;
use crate::models::{BookingDetail, BookingRequest, GuestCount};

pub const SUBMIT_LABEL: &str = "Submit Booking";
pub const SUBMITTING_LABEL: &str = "Submitting...";

/// What the user has entered so far.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draft {
    pub date: Option<NaiveDate>,
    pub time: String,
    pub guests: String,
    pub name: String,
    pub contact: String,
}

impl Draft {
    fn is_complete(&self) -> bool {
        self.date.is_some()
            && [&self.time, &self.guests, &self.name, &self.contact]
                .iter()
                .all(|field| !field.trim().is_empty())
    }

    fn is_empty(&self) -> bool {
        *self == Draft::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Empty,
    DateSet,
    SlotReady,
    Submitting,
    Confirmed,
}

/// Issued for every slot fetch. Only the most recent ticket may update the
/// slot list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    date: NaiveDate,
}

impl FetchTicket {
    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A field was missing or a submission was already in flight.
    Skipped,
    Confirmed,
    Failed,
}

/// Options for the time-slot `<select>`.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotSelector<'a> {
    pub disabled: bool,
    pub placeholder: &'static str,
    pub options: &'a [String],
    pub selected: &'a str,
}

#[derive(Debug, Default)]
pub struct BookingForm {
    draft: Draft,
    available_slots: Vec<String>,
    slots_loaded_for: Option<NaiveDate>,
    fetch_seq: u64,
    submitting: bool,
    confirmation: Vec<BookingDetail>,
    slot_error: Option<String>,
    submit_error: Option<String>,
}

impl BookingForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn available_slots(&self) -> &[String] {
        &self.available_slots
    }

    pub fn confirmation(&self) -> &[BookingDetail] {
        &self.confirmation
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// The booking error if the last submit failed, otherwise the slot error.
    pub fn last_error(&self) -> Option<&str> {
        self.submit_error.as_deref().or(self.slot_error.as_deref())
    }

    pub fn submit_label(&self) -> &'static str {
        if self.submitting {
            SUBMITTING_LABEL
        } else {
            SUBMIT_LABEL
        }
    }

    pub fn stage(&self) -> Stage {
        if self.submitting {
            return Stage::Submitting;
        }
        match self.draft.date {
            None if self.draft.is_empty() && !self.confirmation.is_empty() => Stage::Confirmed,
            None => Stage::Empty,
            Some(date) if self.slots_loaded_for == Some(date) => Stage::SlotReady,
            Some(_) => Stage::DateSet,
        }
    }

    /// Change the selected date. Returns a ticket when the selection calls for
    /// a slot fetch. Re-picking a day whose slots are already loaded, or
    /// clearing the date, does not fetch; re-picking a day whose fetch failed
    /// or is still pending does.
    pub fn select_date(&mut self, date: Option<NaiveDate>) -> Option<FetchTicket> {
        if date == self.draft.date && (date.is_none() || self.slots_loaded_for == date) {
            return None;
        }
        self.draft.date = date;
        let date = date?;
        self.fetch_seq += 1;
        Some(FetchTicket {
            seq: self.fetch_seq,
            date,
        })
    }

    /// Apply a slot-fetch result. Returns `true` when the list was replaced.
    /// Results for superseded tickets are dropped; failures keep the previous
    /// list.
    pub fn apply_slots(&mut self, ticket: FetchTicket, result: Result<Vec<String>>) -> bool {
        if ticket.seq != self.fetch_seq || self.draft.date != Some(ticket.date) {
            debug!(
                "Discarding stale slot response for {} (ticket {}, latest {})",
                ticket.date, ticket.seq, self.fetch_seq
            );
            return false;
        }
        match result {
            Ok(slots) => {
                self.available_slots = slots;
                self.slots_loaded_for = Some(ticket.date);
                self.slot_error = None;
                true
            }
            Err(e) => {
                error!("Error fetching available slots for {}: {:#}", ticket.date, e);
                self.slot_error = Some(format!("Could not load times for {}.", ticket.date));
                false
            }
        }
    }

    pub fn set_time(&mut self, time: impl Into<String>) {
        self.draft.time = time.into();
    }

    pub fn set_guests(&mut self, guests: impl Into<String>) {
        self.draft.guests = guests.into();
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
    }

    pub fn set_contact(&mut self, contact: impl Into<String>) {
        self.draft.contact = contact.into();
    }

    pub fn slot_selector(&self) -> SlotSelector<'_> {
        match self.draft.date {
            None => SlotSelector {
                disabled: true,
                placeholder: "Select date first",
                options: &[],
                selected: "",
            },
            Some(_) => SlotSelector {
                disabled: false,
                placeholder: "Select a time slot",
                options: &self.available_slots,
                selected: &self.draft.time,
            },
        }
    }

    /// Start a submission. Returns the request to send, or `None` (leaving the
    /// form untouched) if a field is missing or a submission is in flight.
    pub fn begin_submit(&mut self) -> Option<BookingRequest> {
        if self.submitting || !self.draft.is_complete() {
            return None;
        }
        let date = self.draft.date?;
        self.submitting = true;
        Some(BookingRequest {
            date: calendar::api_date(date),
            time: self.draft.time.trim().to_string(),
            guests: GuestCount::from_input(&self.draft.guests),
            name: self.draft.name.trim().to_string(),
            contact: self.draft.contact.trim().to_string(),
        })
    }

    pub fn finish_submit(&mut self, result: Result<Vec<BookingDetail>>) -> SubmitOutcome {
        self.submitting = false;
        match result {
            Ok(details) => {
                info!("Booking created ({} detail record(s))", details.len());
                self.confirmation = details;
                self.reset_draft();
                self.slot_error = None;
                self.submit_error = None;
                SubmitOutcome::Confirmed
            }
            Err(e) => {
                error!("Create booking error: {:#}", e);
                self.submit_error =
                    Some("Your booking could not be created. Please try again.".to_string());
                SubmitOutcome::Failed
            }
        }
    }

    fn reset_draft(&mut self) {
        self.draft = Draft::default();
        self.available_slots.clear();
        self.slots_loaded_for = None;
        // outstanding fetches belong to the old draft
        self.fetch_seq += 1;
    }
}

/// Select a date and, when that issues a fetch, load its slots.
pub async fn select_date(form: &mut BookingForm, client: &BookingClient, date: Option<NaiveDate>) {
    if let Some(ticket) = form.select_date(date) {
        load_slots(form, client, ticket).await;
    }
}

pub async fn load_slots(form: &mut BookingForm, client: &BookingClient, ticket: FetchTicket) -> bool {
    let result = client.available_slots(ticket.date()).await;
    form.apply_slots(ticket, result)
}

pub async fn submit(form: &mut BookingForm, client: &BookingClient) -> SubmitOutcome {
    let Some(request) = form.begin_submit() else {
        debug!("Submit ignored: form incomplete or already submitting");
        return SubmitOutcome::Skipped;
    };
    info!(
        "Submitting booking for {} at {} {}",
        request.name, request.date, request.time
    );
    let result = client.create_booking(&request).await;
    form.finish_submit(result)
}
