//! WebSocket endpoint for change listeners, served on the HTTP port at `/ws`.

use actix_web::{web, HttpRequest, HttpResponse};
use actix_ws::Message;
use futures_util::StreamExt;

use crate::AppState;

pub async fn ws_handler(
    req: HttpRequest,
    body: web::Payload,
    state: web::Data<AppState>,
) -> Result<HttpResponse, actix_web::Error> {
    let (response, mut session, mut msg_stream) = actix_ws::handle(&req, body)?;

    let peer = req
        .peer_addr()
        .map(|addr| addr.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let broadcaster = state.broadcaster.clone();
    let (client_id, mut event_rx) = broadcaster.subscribe();
    log::info!("[GATEWAY] Listener connected from {} ({})", peer, client_id);

    actix_web::rt::spawn(async move {
        loop {
            tokio::select! {
                Some(event) = event_rx.recv() => {
                    let json = match serde_json::to_string(&event) {
                        Ok(json) => json,
                        Err(e) => {
                            log::error!("[GATEWAY] Failed to serialize event: {}", e);
                            continue;
                        }
                    };
                    if session.text(json).await.is_err() {
                        break;
                    }
                }
                msg = msg_stream.next() => {
                    match msg {
                        Some(Ok(Message::Ping(bytes))) => {
                            if session.pong(&bytes).await.is_err() {
                                break;
                            }
                        }
                        Some(Ok(Message::Close(reason))) => {
                            let _ = session.close(reason).await;
                            break;
                        }
                        // Listeners only receive; anything they send is ignored.
                        Some(Ok(_)) => {}
                        Some(Err(e)) => {
                            log::warn!("[GATEWAY] WebSocket error from {}: {}", client_id, e);
                            break;
                        }
                        None => break,
                    }
                }
                else => break,
            }
        }

        broadcaster.unsubscribe(&client_id);
        log::info!("[GATEWAY] Listener {} disconnected", client_id);
    });

    Ok(response)
}
