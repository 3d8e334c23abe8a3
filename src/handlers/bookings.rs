use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::db::queries;
use crate::models::{Booking, BookingStatus};
use crate::services::messaging::ActionButton;
use crate::state::AppState;

/// Booking request as submitted by the public booking page.
#[derive(Deserialize)]
pub struct CreateBookingRequest {
    pub nombre: Option<String>,
    pub vehiculo: Option<String>,
    pub fecha: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateBookingRequest>,
) -> Response {
    let (Some(nombre), Some(vehiculo), Some(fecha)) = (
        non_empty(req.nombre),
        non_empty(req.vehiculo),
        non_empty(req.fecha),
    ) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "message": "Faltan datos en la solicitud." })),
        )
            .into_response();
    };

    match store_and_notify(&state, nombre, vehiculo, fecha).await {
        Ok(message) => {
            (StatusCode::OK, Json(serde_json::json!({ "message": message }))).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to process booking request");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "message": "Error interno del servidor." })),
            )
                .into_response()
        }
    }
}

/// Matched by the intake route for every verb other than POST.
pub async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(serde_json::json!({ "message": "Método no permitido" })),
    )
        .into_response()
}

/// Store write happens before the operator notification; a failed send leaves
/// the pending row in place.
async fn store_and_notify(
    state: &Arc<AppState>,
    nombre: String,
    vehiculo: String,
    fecha: String,
) -> anyhow::Result<String> {
    let id = Uuid::new_v4().to_string();
    let now = Utc::now().naive_utc();
    let booking = Booking {
        id: id.clone(),
        name: nombre,
        vehicle: vehiculo,
        date: fecha,
        status: BookingStatus::Pending,
        created_at: now,
        updated_at: now,
    };

    {
        let db = state.db.lock().unwrap();
        queries::create_booking(&db, &booking)?;
    }

    let text = notification_text(&booking);
    let actions = [
        ActionButton::new("✅ Aceptar", format!("aceptar_{id}")),
        ActionButton::new("❌ Rechazar", format!("rechazar_{id}")),
    ];
    state.messaging.send_with_actions(&text, &actions).await?;

    tracing::info!(booking_id = %id, "booking stored and operator notified");

    Ok("¡Solicitud enviada! Recibirás la confirmación en el calendario.".to_string())
}

fn notification_text(booking: &Booking) -> String {
    format!(
        "Nueva solicitud de cita:\n\n*ID:* `{}`\n*Nombre:* {}\n*Vehículo:* {}\n*Fecha:* {}",
        booking.id,
        booking.name,
        booking.vehicle,
        format_fecha(&booking.date)
    )
}

/// Renders the requested date with es-ES conventions ("1/5/2024, 10:00:00").
/// Values that do not parse as a datetime are shown as received.
fn format_fecha(raw: &str) -> String {
    const ES_FMT: &str = "%-d/%-m/%Y, %H:%M:%S";

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.naive_utc().format(ES_FMT).to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return dt.format(ES_FMT).to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M") {
        return dt.format(ES_FMT).to_string();
    }
    raw.to_string()
}
