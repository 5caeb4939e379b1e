pub mod booking;
pub mod views;

use std::sync::Arc;

use anyhow::Result;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::client::BookingClient;
use crate::models::Config;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) config: Arc<Config>,
    pub(crate) client: BookingClient,
}

impl AppState {
    pub(crate) fn new(config: Config) -> Result<Self> {
        let client = BookingClient::new(&config.service)?;
        Ok(Self {
            config: Arc::new(config),
            client,
        })
    }
}

pub(crate) fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(booking::form_handler).post(booking::reload_handler))
        .route("/book", post(booking::submit_handler))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

pub async fn serve(config: Config, addr: &str) -> Result<()> {
    let state = AppState::new(config)?;
    info!("Booking service: {}", state.client.base_url());

    let listener = TcpListener::bind(addr).await?;
    info!("Booking form listening on http://{}", addr);
    axum::serve(listener, router(state)).await?;
    Ok(())
}
