use leptos::prelude::*;

use crate::calendar;
use crate::form::{BookingForm, SlotSelector, SUBMITTING_LABEL};
use crate::models::{capitalize, BookingDetail, Config};

const STYLE: &str = include_str!("../style.css");

pub const PAGE_TITLE: &str = "Restaurant Booking";
pub const PAGE_DESCRIPTION: &str = "A simple restaurant booking website.";

// Picking a date reloads the page with the slots for that day; submitting
// locks the button until the service answers.
fn form_script() -> String {
    format!(
        "var booking = document.getElementById('booking-form');
document.getElementById('date').addEventListener('change', function () {{
    booking.action = '/';
    booking.submit();
}});
booking.addEventListener('submit', function () {{
    var button = document.getElementById('submit-booking');
    button.disabled = true;
    button.textContent = '{}';
}});",
        SUBMITTING_LABEL
    )
}

pub(super) fn render_page(cfg: &Config, form: &BookingForm) -> String {
    let form_html = render_form(cfg, form);
    let details_html = render_confirmation(cfg, form.confirmation());

    view! {
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <meta name="description" content=PAGE_DESCRIPTION />
                <title>{PAGE_TITLE}</title>
                <style>{STYLE}</style>
            </head>
            <body>
                <main>
                    <section class="card" inner_html=form_html />
                    <div inner_html=details_html />
                </main>
            </body>
        </html>
    }
    .to_html()
}

fn render_form(cfg: &Config, form: &BookingForm) -> String {
    let draft = form.draft();
    let date = draft.date.map(calendar::api_date).unwrap_or_default();
    let selector = form.slot_selector();
    let slot_disabled = selector.disabled;
    let options_html = render_slot_options(&selector);
    let error_html = match form.last_error() {
        Some(msg) if cfg.ui.surface_errors => {
            let msg = msg.to_string();
            view! { <div class="error" role="alert">{msg}</div> }.to_html()
        }
        _ => String::new(),
    };
    let guests = draft.guests.clone();
    let name = draft.name.clone();
    let contact = draft.contact.clone();
    let submitting = form.is_submitting();
    let label = form.submit_label();
    let script = form_script();

    view! {
        <div class="booking-form">
            <h2>{PAGE_TITLE}</h2>
            <div inner_html=error_html />
            <form id="booking-form" method="post" action="/book">
                <div class="field">
                    <label for="date">"Reservation Date"</label>
                    <input type="date" id="date" name="date" value=date placeholder="Select Date" />
                    <noscript>
                        <button type="submit" class="secondary" formaction="/">
                            "Show available times"
                        </button>
                    </noscript>
                </div>
                <div class="field">
                    <label for="time">"Reservation Time"</label>
                    <select id="time" name="time" disabled=slot_disabled inner_html=options_html></select>
                </div>
                <div class="field">
                    <label for="guests">"Number of Guests"</label>
                    <input
                        type="number"
                        id="guests"
                        name="guests"
                        value=guests
                        placeholder="Enter Number of Guests"
                    />
                </div>
                <div class="field">
                    <label for="name">"Your Name"</label>
                    <input type="text" id="name" name="name" value=name placeholder="Enter Your Name" />
                </div>
                <div class="field">
                    <label for="contact">"Contact Details"</label>
                    <input
                        type="text"
                        id="contact"
                        name="contact"
                        value=contact
                        placeholder="Enter Your Contact"
                    />
                </div>
                <button type="submit" id="submit-booking" class="primary" disabled=submitting>
                    {label}
                </button>
            </form>
            <script inner_html=script></script>
        </div>
    }
    .to_html()
}

fn render_slot_options(selector: &SlotSelector<'_>) -> String {
    let placeholder = selector.placeholder;
    if selector.disabled {
        return view! { <option disabled=true>{placeholder}</option> }.to_html();
    }

    let mut html = view! { <option value="">{placeholder}</option> }.to_html();
    html.extend(selector.options.iter().map(|slot| {
        let value = slot.clone();
        let text = slot.clone();
        let selected = slot == selector.selected;
        view! { <option value=value selected=selected>{text}</option> }.to_html()
    }));
    html
}

fn render_confirmation(cfg: &Config, details: &[BookingDetail]) -> String {
    if details.is_empty() {
        return String::new();
    }

    let items_html: String = details
        .iter()
        .map(|detail| {
            let lines: String = detail
                .entries()
                .into_iter()
                .map(|(key, value)| {
                    let key = format!("{}:", capitalize(&key));
                    view! {
                        <p><span class="detail-key">{key}</span>" "{value}</p>
                    }
                    .to_html()
                })
                .collect();
            view! { <li inner_html=lines /> }.to_html()
        })
        .collect();

    // Let the panel render before scrolling to it.
    let scroll_script = format!(
        "setTimeout(function () {{ window.scrollTo({{ top: document.body.scrollHeight, behavior: 'smooth' }}); }}, {});",
        cfg.ui.scroll_delay_ms
    );

    view! {
        <section class="card confirmation" id="booking-details">
            <h3>"Booking Details"</h3>
            <p class="success">"Booking created successfully."</p>
            <ul inner_html=items_html />
            <script inner_html=scroll_script></script>
        </section>
    }
    .to_html()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_confirmation_hidden_when_empty() {
        assert!(render_confirmation(&Config::default(), &[]).is_empty());
    }

    #[test]
    fn test_confirmation_lists_every_entry() {
        let detail: BookingDetail = serde_json::from_value(json!({
            "date": "2025-03-10",
            "guests": 4,
            "note": null,
            "table": "12"
        }))
        .unwrap();

        let html = render_confirmation(&Config::default(), &[detail]);
        assert!(html.contains("Date:"));
        assert!(html.contains("2025-03-10"));
        assert!(html.contains("Guests:"));
        assert!(html.contains("Note:"));
        assert!(html.contains("Table:"));
        assert!(html.contains("}, 100);"));
    }

    #[test]
    fn test_slot_options_mark_selection() {
        let slots = vec!["18:00".to_string(), "18:30".to_string()];
        let selector = SlotSelector {
            disabled: false,
            placeholder: "Select a time slot",
            options: &slots,
            selected: "18:30",
        };
        let html = render_slot_options(&selector);
        assert!(html.contains("Select a time slot"));
        assert_eq!(html.matches("<option").count(), 3);
        assert_eq!(html.matches("selected").count(), 1);
    }
}
