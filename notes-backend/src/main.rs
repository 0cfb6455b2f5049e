//! Canvas notes backend.
//!
//! Serves note CRUD on `/notes` and pushes "notes changed" events to
//! WebSocket listeners on `/ws`, all on one port.

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::sync::Arc;

mod config;
mod controllers;
mod db;
mod error;
mod gateway;

use config::Config;
use db::Database;
use gateway::EventBroadcaster;

pub struct AppState {
    pub db: Arc<Database>,
    pub config: Config,
    pub broadcaster: Arc<EventBroadcaster>,
    /// Server start time for uptime calculation
    pub started_at: std::time::Instant,
}

/// Every route the server exposes
fn routes(cfg: &mut web::ServiceConfig) {
    controllers::health::config_routes(cfg);
    controllers::notes::config(cfg);
    cfg.route("/ws", web::get().to(gateway::actix_ws::ws_handler));
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Refusing to start: {}", e);
            std::process::exit(1);
        }
    };

    log::info!(
        "Opening database at {} (transport: {})",
        config.database_url,
        config.database_transport
    );
    let db = match Database::new(&config.database_url) {
        Ok(db) => Arc::new(db),
        Err(e) => {
            log::error!("Failed to initialize database: {}", e);
            std::process::exit(1);
        }
    };

    let broadcaster = Arc::new(EventBroadcaster::new());
    let port = config.port;
    let bind_address = config.bind_address.clone();
    let started_at = std::time::Instant::now();

    log::info!("Starting notes server on {}:{}", bind_address, port);
    log::info!("Change listeners available at /ws");

    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .app_data(web::Data::new(AppState {
                db: Arc::clone(&db),
                config: config.clone(),
                broadcaster: Arc::clone(&broadcaster),
                started_at,
            }))
            .app_data(controllers::json_config())
            .wrap(Logger::default())
            .wrap(cors)
            .configure(routes)
    })
    .bind((bind_address.as_str(), port))?
    .run();

    let server_handle = server.handle();

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl+C: {}", e);
            return;
        }
        log::info!("Received Ctrl+C, shutting down...");

        let server_stop = server_handle.stop(true);
        if tokio::time::timeout(std::time::Duration::from_secs(5), server_stop).await.is_err() {
            log::warn!("Timeout waiting for HTTP server to stop, forcing exit...");
        }

        log::info!("Shutdown complete");
    });

    log::info!("Server is up and running on port {}", port);
    server.await
}
