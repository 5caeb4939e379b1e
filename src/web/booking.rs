use axum::extract::{Form, Query, State};
use axum::response::Html;
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::warn;

use super::views::render_page;
use super::AppState;
use crate::calendar;
use crate::form::{self, BookingForm, SubmitOutcome};

/// Draft fields as carried by the page's own inputs.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct DraftParams {
    date: String,
    time: String,
    guests: String,
    name: String,
    contact: String,
}

impl DraftParams {
    fn selected_date(&self, state: &AppState) -> Option<NaiveDate> {
        if self.date.trim().is_empty() {
            return None;
        }
        match calendar::parse_selection(&self.date, state.config.ui.timezone) {
            Ok(date) => Some(date),
            Err(e) => {
                warn!("Ignoring date selection: {:#}", e);
                None
            }
        }
    }

    fn fill(self, form: &mut BookingForm) {
        form.set_time(self.time);
        form.set_guests(self.guests);
        form.set_name(self.name);
        form.set_contact(self.contact);
    }
}

pub(crate) async fn form_handler(
    State(state): State<AppState>,
    Query(params): Query<DraftParams>,
) -> Html<String> {
    render_draft(&state, params).await
}

/// Date change from the page itself: the draft travels in the body so the
/// guest's name and contact stay out of the URL.
pub(crate) async fn reload_handler(
    State(state): State<AppState>,
    Form(params): Form<DraftParams>,
) -> Html<String> {
    render_draft(&state, params).await
}

async fn render_draft(state: &AppState, params: DraftParams) -> Html<String> {
    let mut form = BookingForm::new();
    let date = params.selected_date(state);
    params.fill(&mut form);
    form::select_date(&mut form, &state.client, date).await;

    Html(render_page(&state.config, &form))
}

pub(crate) async fn submit_handler(
    State(state): State<AppState>,
    Form(params): Form<DraftParams>,
) -> Html<String> {
    let mut form = BookingForm::new();
    let date = params.selected_date(&state);
    let ticket = form.select_date(date);
    params.fill(&mut form);

    let outcome = form::submit(&mut form, &state.client).await;
    // the retained draft needs its slots to re-render the selector
    if outcome != SubmitOutcome::Confirmed {
        if let Some(ticket) = ticket {
            form::load_slots(&mut form, &state.client, ticket).await;
        }
    }

    Html(render_page(&state.config, &form))
}
