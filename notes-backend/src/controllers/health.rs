//! Health and version endpoints, plus a report of the running configuration.

use actix_web::{web, HttpResponse, Responder};

use crate::AppState;

/// Version from Cargo.toml, available at compile time
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/health").route(web::get().to(health_check)));
    cfg.service(web::resource("/api/version").route(web::get().to(get_version)));
    cfg.service(web::resource("/api/health/config").route(web::get().to(get_config_status)));
}

async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "version": VERSION
    }))
}

async fn get_version() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "version": VERSION
    }))
}

async fn get_config_status(state: web::Data<AppState>) -> impl Responder {
    let database_reachable = match state.db.ping() {
        Ok(()) => true,
        Err(e) => {
            log::warn!("Database ping failed: {}", e);
            false
        }
    };

    HttpResponse::Ok().json(serde_json::json!({
        "database_reachable": database_reachable,
        "database_transport": state.config.database_transport.as_str(),
        "listeners": state.broadcaster.client_count(),
        "uptime_secs": state.started_at.elapsed().as_secs()
    }))
}
