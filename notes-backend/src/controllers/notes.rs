//! Notes REST API: CRUD on the canvas notes table.
//!
//! All four verbs share the `/notes` path; targets travel in the JSON body.
//! A storage failure is logged and answered with `500 {"error": ...}`.

use actix_web::{web, HttpResponse, Responder};
use notes_types::{CreateNoteRequest, DeleteNoteRequest, ErrorResponse, UpdateNoteRequest};

use crate::error::StorageError;
use crate::gateway::protocol::GatewayEvent;
use crate::AppState;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/notes")
            .route(web::get().to(list_notes))
            .route(web::post().to(create_note))
            .route(web::put().to(update_note))
            .route(web::delete().to(delete_note)),
    );
}

fn storage_failure(action: &str, err: StorageError) -> HttpResponse {
    log::error!("[NOTES] Failed to {}: {}", action, err);
    HttpResponse::InternalServerError().json(ErrorResponse::new(format!(
        "Failed to {}: {}",
        action, err
    )))
}

/// Get all notes, and tell listeners what the list now looks like
async fn list_notes(state: web::Data<AppState>) -> impl Responder {
    match state.db.list_notes() {
        Ok(notes) => {
            match GatewayEvent::notes_changed(&notes) {
                Ok(event) => {
                    state.broadcaster.broadcast(event);
                }
                Err(e) => log::error!("[NOTES] Skipping notes changed event: {}", e),
            }
            HttpResponse::Ok().json(notes)
        }
        Err(e) => storage_failure("list notes", e),
    }
}

async fn create_note(
    state: web::Data<AppState>,
    body: web::Json<CreateNoteRequest>,
) -> impl Responder {
    match state.db.create_note(&body.note_body) {
        Ok(created) => HttpResponse::Ok().json(created),
        Err(e) => storage_failure("create note", e),
    }
}

/// Overwrite an existing note. `[]` when the id matched nothing.
async fn update_note(
    state: web::Data<AppState>,
    body: web::Json<UpdateNoteRequest>,
) -> impl Responder {
    let note = &body.note;
    match state.db.update_note(note.note_id, &note.note_body, note.position) {
        Ok(updated) => HttpResponse::Ok().json(updated),
        Err(e) => storage_failure("update note", e),
    }
}

async fn delete_note(
    state: web::Data<AppState>,
    body: web::Json<DeleteNoteRequest>,
) -> impl Responder {
    match state.db.delete_note(body.note_id) {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => storage_failure("delete note", e),
    }
}
