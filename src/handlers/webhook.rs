use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::db::queries;
use crate::models::BookingStatus;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct TelegramUpdate {
    pub callback_query: Option<CallbackQuery>,
}

#[derive(Deserialize)]
pub struct CallbackQuery {
    pub data: String,
    pub message: CallbackMessage,
}

#[derive(Deserialize)]
pub struct CallbackMessage {
    pub message_id: i64,
    pub chat: CallbackChat,
    #[serde(default)]
    pub text: String,
}

#[derive(Deserialize)]
pub struct CallbackChat {
    pub id: i64,
}

/// Telegram redelivers updates that are not answered with a 200, so this
/// handler acks with a plain `OK` no matter what happened inside.
pub async fn telegram_webhook(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    if let Some(callback) = parse_callback(&body) {
        if let Err(e) = apply_decision(&state, &callback).await {
            tracing::error!(error = %e, "failed to process decision callback");
        }
    }

    ([(header::CONTENT_TYPE, "text/plain")], "OK").into_response()
}

/// Anything that is not JSON carrying a `callback_query` is not an operator
/// decision and is dropped without complaint.
fn parse_callback(body: &[u8]) -> Option<CallbackQuery> {
    serde_json::from_slice::<TelegramUpdate>(body)
        .ok()?
        .callback_query
}

async fn apply_decision(state: &Arc<AppState>, callback: &CallbackQuery) -> anyhow::Result<()> {
    // Callback data is "<action>_<id>", e.g. "aceptar_4f1c…".
    let mut parts = callback.data.splitn(2, '_');
    let action = parts.next().unwrap_or_default();
    let Some(id) = parts.next() else {
        tracing::warn!(data = %callback.data, "callback data carries no booking id");
        return Ok(());
    };

    let status = BookingStatus::from_action(action);

    // No existence or current-status check: a stale or repeated callback
    // overwrites whatever is there, and an unknown id updates zero rows.
    {
        let db = state.db.lock().unwrap();
        queries::set_booking_status(&db, id, status)?;
    }

    let text = format!(
        "{}\n\n*--- ESTADO: {} ---*",
        callback.message.text,
        status.as_str().to_uppercase()
    );
    state
        .messaging
        .edit_message(callback.message.chat.id, callback.message.message_id, &text)
        .await?;

    tracing::info!(booking_id = %id, status = status.as_str(), "booking decision applied");

    Ok(())
}
