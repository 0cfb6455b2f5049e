pub mod health;
pub mod notes;

use actix_web::{error::InternalError, web, HttpResponse};
use notes_types::ErrorResponse;

/// JSON extractor settings shared by every route.
/// Rejected bodies come back as `400 {"error": ...}` instead of plain text.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        log::warn!("Rejected request body: {}", message);
        InternalError::from_response(err, HttpResponse::BadRequest().json(ErrorResponse::new(message)))
            .into()
    })
}
