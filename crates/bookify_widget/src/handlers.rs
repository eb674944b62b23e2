// --- File: crates/bookify_widget/src/handlers.rs ---
//! Axum handlers for the widget surface.
//!
//! Both endpoints are consumed by the embeddable chat widget, so their JSON
//! field names and message strings are part of the embed contract. The
//! webhook answers HTTP 200 even when the calendar backend is down; only a
//! failure to record an already-booked appointment is a 500.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bookify_common::services::{BoxedError, CalendarService};
use bookify_config::AppConfig;
use bookify_gcal::logic::booking_window;
use bookify_scheduling::SchedulingConfig;
use bookify_store::{now_timestamp, JsonStore};
use serde::Serialize;
use serde_json::json;
use tracing::{error, info};
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::config::{default_bot_id, server_webhook_url, BotConfig, BotOverrides};
use crate::logic::{
    booking_submission, process_booking, AckResponse, BookedResponse, BookingOutcome,
    ConflictResponse, DegradedResponse, WebhookRequest, WidgetError,
};

// --- State ---

/// Shared state for the widget routes.
#[derive(Clone)]
pub struct WidgetState {
    pub config: Arc<AppConfig>,
    pub window: SchedulingConfig,
    /// Absent when the calendar integration is disabled; the webhook then
    /// runs in degraded mode.
    pub calendar: Option<Arc<dyn CalendarService<Error = BoxedError>>>,
    pub store: Arc<JsonStore>,
}

impl WidgetState {
    pub fn new(
        config: Arc<AppConfig>,
        store: Arc<JsonStore>,
        calendar: Option<Arc<dyn CalendarService<Error = BoxedError>>>,
    ) -> Result<Self, WidgetError> {
        let window =
            booking_window(&config).map_err(|error| WidgetError::InvalidConfig(error.to_string()))?;
        Ok(Self {
            config,
            window,
            calendar,
            store,
        })
    }
}

// --- Responses ---

/// Envelope around the resolved per-bot widget configuration.
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BotConfigResponse {
    pub success: bool,
    pub bot_id: String,
    pub data: BotConfig,
    pub timestamp: String,
}

fn response_time(started: Instant) -> String {
    format!("{}ms", started.elapsed().as_millis())
}

fn internal_error_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "success": false,
            "error": "Internal server error",
            "timestamp": now_timestamp(),
        })),
    )
        .into_response()
}

// --- Handlers ---

/// Handles `POST /webhook/appointment-booking`.
///
/// Non-booking payloads and bookings with missing fields are acknowledged
/// without side effects. Complete bookings either create the calendar event
/// and append the appointment record, answer with ranked alternatives on a
/// conflict, or degrade when the calendar cannot be reached.
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/webhook/appointment-booking",
    tag = "widget",
    request_body = WebhookRequest,
    responses(
        (status = 200, description = "Acknowledged, booked, conflict with suggestions, or degraded", body = BookedResponse),
        (status = 500, description = "Appointment could not be recorded")
    )
))]
#[axum::debug_handler]
pub async fn webhook_handler(
    State(state): State<Arc<WidgetState>>,
    Json(request): Json<WebhookRequest>,
) -> Response {
    let started = Instant::now();
    info!(
        "Appointment webhook for bot {} ({})",
        request.bot_id.as_deref().unwrap_or("unknown"),
        request.event_type.as_deref().unwrap_or("unknown"),
    );

    let Some(submission) = booking_submission(&request) else {
        return Json(AckResponse {
            success: true,
            message: "Request received".to_string(),
            bot_id: request.bot_id,
            response_time: response_time(started),
            timestamp: now_timestamp(),
        })
        .into_response();
    };

    let outcome = process_booking(
        state.calendar.as_deref(),
        &state.store,
        &state.config,
        &state.window,
        request.bot_id.as_deref(),
        &submission,
    )
    .await;

    match outcome {
        Ok(BookingOutcome::Conflict {
            suggestions,
            available_slots,
        }) => Json(ConflictResponse {
            success: false,
            message: "Sorry, that time slot is not available.".to_string(),
            conflict: true,
            suggestions,
            available_slots,
            response_time: response_time(started),
            timestamp: now_timestamp(),
        })
        .into_response(),
        Ok(BookingOutcome::Booked {
            appointment_id,
            calendar_event,
        }) => Json(BookedResponse {
            success: true,
            message: "Appointment booked successfully! You will receive a confirmation email shortly."
                .to_string(),
            appointment_id,
            calendar_event,
            response_time: response_time(started),
            timestamp: now_timestamp(),
        })
        .into_response(),
        Ok(BookingOutcome::Degraded { calendar_error }) => Json(DegradedResponse {
            success: false,
            message: "Appointment request received but Google Calendar is not connected. Please contact us directly."
                .to_string(),
            bot_id: request.bot_id,
            calendar_error,
            response_time: response_time(started),
            timestamp: now_timestamp(),
        })
        .into_response(),
        Err(error) => {
            error!("Appointment could not be recorded: {error}");
            internal_error_response()
        }
    }
}

/// Handles `GET /api/bot-config/{bot_id}`.
///
/// Resolves the widget configuration for a bot: built-in defaults, then the
/// server's widget section, then the bot's stored overrides. Unknown bots
/// are a 404; malformed stored overrides are a 500.
#[axum::debug_handler]
pub async fn bot_config_handler(
    State(state): State<Arc<WidgetState>>,
    Path(bot_id): Path<String>,
) -> Response {
    let stored = match state.store.client_overrides(&bot_id) {
        Ok(stored) => stored,
        Err(error) => {
            error!("Bot config lookup failed for {bot_id}: {error}");
            return internal_error_response();
        }
    };

    if stored.is_none() && bot_id != default_bot_id(&state.config) {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({
                "success": false,
                "error": "Bot configuration not found",
            })),
        )
            .into_response();
    }

    let overrides = match stored {
        Some(value) => match serde_json::from_value::<BotOverrides>(value) {
            Ok(overrides) => overrides,
            Err(error) => {
                error!("Stored overrides for bot {bot_id} are malformed: {error}");
                return internal_error_response();
            }
        },
        None => BotOverrides::default(),
    };

    let data = match BotConfig::resolve(&bot_id, server_webhook_url(&state.config), overrides) {
        Ok(data) => data,
        Err(error) => {
            error!("Bot config for {bot_id} failed validation: {error}");
            return internal_error_response();
        }
    };

    Json(BotConfigResponse {
        success: true,
        bot_id,
        data,
        timestamp: now_timestamp(),
    })
    .into_response()
}
