use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;

use common::protocol::{ClientEvent, ServerEvent};
use common::{ClientId, log};

use crate::web_server::WebServerState;

/// One task per observer connection. The writer half drains an mpsc channel
/// into JSON text frames; the broadcaster holds the channel's sender, so a
/// dropped connection just stops draining and gets unregistered below.
pub async fn handle_websocket(socket: WebSocket, state: WebServerState) {
    let (mut ws_sender, mut ws_receiver) = socket.split();

    let (tx, mut rx) = mpsc::channel::<ServerEvent>(128);

    let send_task = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            match serde_json::to_string(&event) {
                Ok(text) => {
                    if ws_sender.send(Message::Text(text.into())).await.is_err() {
                        break;
                    }
                }
                Err(e) => log!("Failed to encode server event: {}", e),
            }
        }
    });

    let client_id = ClientId::generate();
    state.broadcaster.register(client_id.clone(), tx.clone()).await;
    log!("Observer connected to leaderboard: {}", client_id);

    send_current_leaderboard(&state, &tx, &client_id).await;

    while let Some(result) = ws_receiver.next().await {
        match result {
            Ok(msg) => {
                let text = match msg {
                    Message::Text(text) => text,
                    Message::Close(_) => break,
                    _ => continue,
                };

                let event = match serde_json::from_str::<ClientEvent>(text.as_str()) {
                    Ok(event) => event,
                    Err(e) => {
                        log!("[ws:{}] Failed to decode client event: {}", client_id, e);
                        continue;
                    }
                };

                match event {
                    ClientEvent::NewScore { entry } => {
                        log!(
                            "[ws:{}] New score received: {} ({})",
                            client_id,
                            entry.player_name,
                            entry.score
                        );
                        if let Err(e) = state.leaderboard.submit(entry).await {
                            log!("[ws:{}] Failed to record score: {}", client_id, e);
                        }
                    }
                }
            }
            Err(e) => {
                log!("[ws:{}] WebSocket error: {}", client_id, e);
                break;
            }
        }
    }

    state.broadcaster.unregister(&client_id).await;
    log!("Observer disconnected from leaderboard: {}", client_id);

    send_task.abort();
}

/// New observers see the current standings immediately, before any
/// submission happens.
async fn send_current_leaderboard(
    state: &WebServerState,
    tx: &mpsc::Sender<ServerEvent>,
    client_id: &ClientId,
) {
    match state.leaderboard.top10().await {
        Ok(entries) => {
            if tx.send(ServerEvent::Leaderboard { entries }).await.is_err() {
                log!("[ws:{}] Failed to push initial leaderboard", client_id);
            }
        }
        Err(e) => log!("[ws:{}] Failed to read leaderboard: {}", client_id, e),
    }
}
