//! # Beacon CMS Server
//!
//! The main entry point for the Actix-web HTTP server: blog CRUD behind the
//! operator session gate, plus the contact-form-to-email relay.

use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

mod config;
mod forms;
mod handlers;
mod middleware;
mod state;
mod telemetry;

use config::AppConfig;
use state::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&telemetry::TelemetryConfig::from_env());

    let config = AppConfig::from_env();

    tracing::info!(
        "Starting Beacon CMS Server on {}:{}",
        config.host,
        config.port
    );

    let state = AppState::new(&config).await;
    let allowed_origins = config.allowed_origins.clone();

    HttpServer::new(move || {
        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST"])
            .allow_any_header()
            .supports_credentials()
            .max_age(3600);
        for origin in &allowed_origins {
            cors = cors.allowed_origin(origin);
        }

        App::new()
            .wrap(TracingLogger::default())
            .wrap(cors)
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
