use std::time::Duration;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use tracing::debug;

use crate::calendar;
use crate::models::{BookingDetail, BookingRequest, BookingResponse, ServiceConfig, SlotsResponse};

const SLOTS_PATH: &str = "/api/bookings/get-available-slots";
const CREATE_PATH: &str = "/api/bookings/create-booking";

/// HTTP client for the remote booking service.
#[derive(Clone)]
pub struct BookingClient {
    client: Client,
    base_url: String,
}

impl BookingClient {
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn default_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/json, text/plain, */*"),
        );
        headers
    }

    /// Fetch the bookable time slots for a calendar day. An empty list means
    /// the day is fully booked.
    pub async fn available_slots(&self, date: NaiveDate) -> Result<Vec<String>> {
        let date = calendar::api_date(date);
        let url = format!(
            "{}{}?date={}",
            self.base_url,
            SLOTS_PATH,
            urlencoding::encode(&date)
        );

        let resp = self
            .client
            .get(&url)
            .headers(self.default_headers())
            .send()
            .await
            .context("Failed to fetch available slots")?;

        let status = resp.status();
        let text = resp.text().await.context("Failed to read slots response")?;
        debug!("Slots response for {} (status {}): {}", date, status, text);

        if !status.is_success() {
            bail!("Slot lookup for {date} failed with status {status}: {text}");
        }

        let body: SlotsResponse = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse slots (status {status}): {text}"))?;

        debug!("Fetched {} slots for {}", body.available_slots.len(), date);
        Ok(body.available_slots)
    }

    /// Create a booking and return the details the service echoes back.
    pub async fn create_booking(&self, request: &BookingRequest) -> Result<Vec<BookingDetail>> {
        let url = format!("{}{}", self.base_url, CREATE_PATH);
        let mut headers = self.default_headers();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let resp = self
            .client
            .post(&url)
            .headers(headers)
            .json(request)
            .send()
            .await
            .context("Failed to send booking request")?;

        let status = resp.status();
        let text = resp.text().await.context("Failed to read booking response")?;
        debug!("Booking response (status {}): {}", status, text);

        if !status.is_success() {
            bail!("Booking rejected with status {status}: {text}");
        }

        let body: BookingResponse = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse booking response (status {status}): {text}"))?;
        Ok(body.into_details())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GuestCount;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn setup() -> (MockServer, BookingClient) {
        let server = MockServer::start().await;
        let client = BookingClient::new(&ServiceConfig {
            base_url: format!("{}/", server.uri()),
            timeout_secs: None,
        })
        .unwrap();
        (server, client)
    }

    fn request() -> BookingRequest {
        BookingRequest {
            date: "2025-03-10".into(),
            time: "18:30".into(),
            guests: GuestCount::Number(4),
            name: "Alice".into(),
            contact: "555-1212".into(),
        }
    }

    #[tokio::test]
    async fn test_available_slots_sends_date_query() {
        let (server, client) = setup().await;

        Mock::given(method("GET"))
            .and(path(SLOTS_PATH))
            .and(query_param("date", "2025-03-10"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"availableSlots": ["18:00", "18:30", "19:00"]})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let slots = client.available_slots(date).await.unwrap();
        assert_eq!(slots, vec!["18:00", "18:30", "19:00"]);
    }

    #[tokio::test]
    async fn test_available_slots_empty_day() {
        let (server, client) = setup().await;

        Mock::given(method("GET"))
            .and(path(SLOTS_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"availableSlots": []})))
            .mount(&server)
            .await;

        let date = NaiveDate::from_ymd_opt(2025, 12, 25).unwrap();
        assert!(client.available_slots(date).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_available_slots_server_error() {
        let (server, client) = setup().await;

        Mock::given(method("GET"))
            .and(path(SLOTS_PATH))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let err = client.available_slots(date).await.unwrap_err();
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn test_available_slots_malformed_body() {
        let (server, client) = setup().await;

        Mock::given(method("GET"))
            .and(path(SLOTS_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"slots": ["18:00"]})))
            .mount(&server)
            .await;

        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        assert!(client.available_slots(date).await.is_err());
    }

    #[tokio::test]
    async fn test_create_booking_posts_json() {
        let (server, client) = setup().await;

        Mock::given(method("POST"))
            .and(path(CREATE_PATH))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({
                "date": "2025-03-10",
                "time": "18:30",
                "guests": 4,
                "name": "Alice",
                "contact": "555-1212"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "data": [{"date": "2025-03-10", "time": "18:30", "guests": 4, "name": "Alice"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let details = client.create_booking(&request()).await.unwrap();
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].get("name"), Some(&json!("Alice")));
        assert_eq!(details[0].get("guests"), Some(&json!(4)));
    }

    #[tokio::test]
    async fn test_create_booking_rejected() {
        let (server, client) = setup().await;

        Mock::given(method("POST"))
            .and(path(CREATE_PATH))
            .respond_with(
                ResponseTemplate::new(409).set_body_json(json!({"message": "Slot already booked"})),
            )
            .mount(&server)
            .await;

        let err = client.create_booking(&request()).await.unwrap_err();
        assert!(err.to_string().contains("409"));
    }

    #[tokio::test]
    async fn test_create_booking_unreachable() {
        let client = BookingClient::new(&ServiceConfig {
            base_url: "http://127.0.0.1:1".into(),
            timeout_secs: Some(2),
        })
        .unwrap();

        let err = client.create_booking(&request()).await.unwrap_err();
        assert!(format!("{err:#}").contains("Failed to send booking request"));
    }
}
