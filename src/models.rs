use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_BASE_URL: &str = "https://restaurant-booking-backend-production-667c.up.railway.app";

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub service: ServiceConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub base_url: String,
    /// Transport timeout; unset means the reqwest default (none)
    pub timeout_secs: Option<u64>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct UiConfig {
    /// Zone used to turn a selected instant into a calendar day
    pub timezone: Tz,
    /// Render the last service error on the page instead of only logging it
    pub surface_errors: bool,
    pub scroll_delay_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            timezone: Tz::UTC,
            surface_errors: false,
            scroll_delay_ms: 100,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SlotsResponse {
    #[serde(rename = "availableSlots")]
    pub available_slots: Vec<String>,
}

/// Party size as sent to the service: a number when the entered text is a
/// positive integer, the text itself otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GuestCount {
    Number(u32),
    Text(String),
}

impl GuestCount {
    pub fn from_input(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.parse::<u32>() {
            Ok(n) if n > 0 => GuestCount::Number(n),
            _ => GuestCount::Text(trimmed.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingRequest {
    pub date: String,
    pub time: String,
    pub guests: GuestCount,
    pub name: String,
    pub contact: String,
}

/// Fields the form sent; the service echoes them back as strings or numbers.
pub const KNOWN_FIELDS: [&str; 5] = ["date", "time", "guests", "name", "contact"];

/// One booking as echoed back by the service, in the service's own key order.
/// Known fields must hold a string, a number or `null`; anything else the
/// service adds is kept as is.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct BookingDetail {
    fields: Map<String, Value>,
}

impl TryFrom<Map<String, Value>> for BookingDetail {
    type Error = String;

    fn try_from(fields: Map<String, Value>) -> Result<Self, Self::Error> {
        for key in KNOWN_FIELDS {
            match fields.get(key) {
                None | Some(Value::Null | Value::String(_) | Value::Number(_)) => {}
                Some(other) => {
                    return Err(format!("booking field '{key}' must be a string or number, got {other}"));
                }
            }
        }
        Ok(Self { fields })
    }
}

impl From<BookingDetail> for Map<String, Value> {
    fn from(detail: BookingDetail) -> Self {
        detail.fields
    }
}

impl BookingDetail {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Every returned field as display text, in response order. `null`
    /// shows as an empty value, nested values as compact JSON.
    pub fn entries(&self) -> Vec<(String, String)> {
        self.fields
            .iter()
            .map(|(key, value)| (key.clone(), display_value(value)))
            .collect()
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Upper-case the first letter of a field name for display.
pub fn capitalize(key: &str) -> String {
    let mut chars = key.chars();
    chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect())
        .unwrap_or_default()
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DetailPayload {
    Many(Vec<BookingDetail>),
    One(BookingDetail),
}

#[derive(Debug, Deserialize)]
pub struct BookingResponse {
    data: DetailPayload,
}

impl BookingResponse {
    pub fn into_details(self) -> Vec<BookingDetail> {
        match self.data {
            DetailPayload::Many(details) => details,
            DetailPayload::One(detail) => vec![detail],
        }
    }
}
