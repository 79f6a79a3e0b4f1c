mod auto_reply;
mod error;
mod handlers;
mod types;
mod utils;

use crate::types::ServerConfig;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::prelude::*;

pub mod consts {
    pub const APP_BANNER: &str = "Missed call auto-responder is up.";
    pub const DEFAULT_HOST: &str = "0.0.0.0";
    pub const DEFAULT_PORT: u16 = 8000;

    pub const AFTER_HOURS_BUCKET: &str = "evening";
    /// Compared against the lowercased caller name.
    pub const VIP_CALLER_NAME: &str = "vip client";

    pub const AFTER_HOURS_REPLY: &str = "Hi! I'm away from the desk right now. Feel free to book a time on my calendar here: cal.com/coepi";
    pub const VIP_REPLY: &str =
        "Hey! Saw I just missed you. Wrapping up a call, will ring you back in 5.";
    pub const STANDARD_REPLIES: &[&str] = &[
        "Sorry I missed you! Can I text you back in a bit?",
        " missed your call. Is this urgent? I'm in a meeting.",
        "Hey, thanks for calling. Please leave a text and I'll get back to you!",
    ];
}

/// Every route the service answers, with CORS opened up for browser clients on any origin.
pub fn router() -> Router {
    Router::new()
        .route("/api/missed-call", post(handlers::missed_call_handler))
        .route("/", get(handlers::root_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::very_permissive())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is fine; everything has a default.
    dotenvy::dotenv().ok();
    let subscriber = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_file(true)
                .with_line_number(true),
        )
        .with(tracing_subscriber::filter::Targets::new().with_targets([
            ("hyper", tracing_subscriber::filter::LevelFilter::OFF),
            ("tower_http", tracing_subscriber::filter::LevelFilter::DEBUG),
            ("missed_call_rs", tracing_subscriber::filter::LevelFilter::DEBUG),
        ]));
    tracing::subscriber::set_global_default(subscriber)?;

    let config = ServerConfig::from_env()?;
    info!(addr=%config.bind_addr, "listening");

    axum::Server::try_bind(&config.bind_addr)?
        .serve(router().into_make_service())
        .with_graceful_shutdown(utils::shutdown_signal())
        .await?;

    Ok(())
}
