// --- File: crates/bookify_gcal/src/handlers.rs ---
//! Axum handlers for the calendar API and the OAuth connection flow.
//!
//! Error bodies use the flat `{"error": "..."}` envelope with wording the
//! chat widget matches on, so the exact strings here are load-bearing.

use crate::auth::OAuthClient;
use crate::logic::{
    booking_window, calendar_tz, create_appointment_event, day_availability, AppointmentBooking,
    AuthUrlResponse, AvailabilityQuery, AvailabilityResponse, ConnectionStatus,
    CreateEventRequest, CreateEventResponse, DayAvailability, DisconnectResponse,
    ExistingEventSummary, GcalError, RefreshResponse, SuggestionsRequest, SuggestionsResponse,
};
use crate::service::GoogleCalendarService;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use bookify_common::services::{BoxedError, CalendarService, StoredTokens, TokenStore};
use bookify_common::{api_error, log_error, storage_error, HTTP_CLIENT};
use bookify_config::AppConfig;
use bookify_scheduling::{
    is_time_available, local_instant, parse_date, parse_time, suggest_alternatives,
    SchedulingConfig,
};
use bookify_store::JsonStore;
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

/// Shared state of the calendar routes.
#[derive(Clone)]
pub struct GcalState {
    pub config: Arc<AppConfig>,
    pub window: SchedulingConfig,
    pub oauth: OAuthClient,
    pub calendar: Arc<dyn CalendarService<Error = BoxedError>>,
    pub tokens: Arc<JsonStore>,
}

impl GcalState {
    /// Wires the Google-backed calendar service over the shared JSON store.
    pub fn new(config: Arc<AppConfig>, store: Arc<JsonStore>) -> Result<Self, GcalError> {
        let oauth = OAuthClient::from_config(&config)?;
        let window = booking_window(&config)?;
        let calendar: Arc<dyn CalendarService<Error = BoxedError>> =
            Arc::new(GoogleCalendarService::new(oauth.clone(), store.clone()));
        Ok(GcalState {
            config,
            window,
            oauth,
            calendar,
            tokens: store,
        })
    }
}

/// Clients without stored tokens get a 404 before any calendar call.
fn ensure_connected(state: &GcalState, client_id: &str) -> Result<StoredTokens, Response> {
    match state.tokens.load(client_id) {
        Ok(Some(tokens)) => Ok(tokens),
        Ok(None) => Err(api_error(
            StatusCode::NOT_FOUND,
            "Google Calendar not connected",
        )),
        Err(e) => {
            log_error(&e, "Reading stored tokens");
            Err(storage_error(e).into_response())
        }
    }
}

// --- Calendar API Handlers ---

/// Handler for checking a day's availability.
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/api/calendar/availability/{client_id}",
    params(
        ("client_id" = String, Path, description = "Client whose calendar to check"),
        ("date" = String, Query, description = "Day to check, YYYY-MM-DD"),
        ("duration" = Option<i64>, Query, description = "Appointment length in minutes, default 60"),
    ),
    responses(
        (status = 200, description = "Free slots and existing events for the day", body = AvailabilityResponse),
        (status = 400, description = "Malformed date"),
        (status = 404, description = "Google Calendar not connected"),
        (status = 500, description = "Calendar backend failure"),
    ),
    tag = "calendar"
))]
#[axum::debug_handler]
pub async fn get_availability_handler(
    State(state): State<Arc<GcalState>>,
    Path(client_id): Path<String>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, Response> {
    ensure_connected(&state, &client_id)?;

    let date = parse_date(&query.date).map_err(|_| {
        api_error(StatusCode::BAD_REQUEST, "Invalid date format (YYYY-MM-DD)")
    })?;

    let DayAvailability { slots, events } = day_availability(
        state.calendar.as_ref(),
        &client_id,
        &state.config,
        &state.window,
        date,
        query.duration,
    )
    .await
    .map_err(|e| availability_failure(e, "Failed to check availability"))?;

    Ok(Json(AvailabilityResponse {
        success: true,
        date: query.date,
        available_slots: slots,
        existing_events: events.iter().map(ExistingEventSummary::from).collect(),
    }))
}

#[axum::debug_handler]
pub async fn get_suggestions_handler(
    State(state): State<Arc<GcalState>>,
    Path(client_id): Path<String>,
    Json(request): Json<SuggestionsRequest>,
) -> Result<Json<SuggestionsResponse>, Response> {
    ensure_connected(&state, &client_id)?;

    let date = parse_date(&request.preferred_date).map_err(|_| {
        api_error(
            StatusCode::BAD_REQUEST,
            "Invalid preferredDate format (YYYY-MM-DD)",
        )
    })?;
    let time = parse_time(&request.preferred_time).map_err(|_| {
        api_error(
            StatusCode::BAD_REQUEST,
            "Invalid preferredTime format (HH:MM)",
        )
    })?;

    let failure = |e| availability_failure(e, "Failed to generate suggestions");
    let DayAvailability { mut slots, .. } = day_availability(
        state.calendar.as_ref(),
        &client_id,
        &state.config,
        &state.window,
        date,
        request.duration,
    )
    .await
    .map_err(failure)?;

    let tz = calendar_tz(&state.config).map_err(failure)?;
    let preferred = local_instant(date, time, &tz).map_err(|e| failure(e.into()))?;

    let preferred_time_available =
        is_time_available(preferred, &slots, state.window.tolerance_minutes);
    let suggestions = if preferred_time_available {
        Vec::new()
    } else {
        suggest_alternatives(date, preferred, &slots)
    };
    slots.truncate(10);

    Ok(Json(SuggestionsResponse {
        success: true,
        preferred_time_available,
        suggestions,
        available_slots: slots,
    }))
}

#[axum::debug_handler]
pub async fn create_event_handler(
    State(state): State<Arc<GcalState>>,
    Path(client_id): Path<String>,
    Json(request): Json<CreateEventRequest>,
) -> Result<Json<CreateEventResponse>, Response> {
    let (name, email, date_raw, time_raw) = match (
        non_empty(&request.customer_name),
        non_empty(&request.customer_email),
        non_empty(&request.appointment_date),
        non_empty(&request.appointment_time),
    ) {
        (Some(name), Some(email), Some(date), Some(time)) => (name, email, date, time),
        _ => {
            return Err(api_error(
                StatusCode::BAD_REQUEST,
                "Missing required appointment details",
            ))
        }
    };
    let date = parse_date(date_raw).map_err(|_| {
        api_error(
            StatusCode::BAD_REQUEST,
            "Invalid appointmentDate format (YYYY-MM-DD)",
        )
    })?;
    let time = parse_time(time_raw).map_err(|_| {
        api_error(
            StatusCode::BAD_REQUEST,
            "Invalid appointmentTime format (HH:MM)",
        )
    })?;

    ensure_connected(&state, &client_id)?;

    let booking = AppointmentBooking {
        customer_name: name.to_string(),
        customer_email: email.to_string(),
        customer_phone: non_empty(&request.customer_phone).map(str::to_string),
        date,
        time,
        duration_minutes: request.duration,
    };

    let created = create_appointment_event(
        state.calendar.as_ref(),
        &client_id,
        &state.config,
        &booking,
    )
    .await
    .map_err(|e| match e {
        GcalError::NotConnected => {
            api_error(StatusCode::NOT_FOUND, "Google Calendar not connected")
        }
        GcalError::AuthExpired => api_error(
            StatusCode::UNAUTHORIZED,
            "Google Calendar authentication expired. Please reconnect.",
        ),
        other => {
            log_error(&other, "Creating calendar event");
            api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to create calendar event",
            )
        }
    })?;

    info!(
        "Created calendar event {:?} for client {client_id}",
        created.event_id
    );
    Ok(Json(CreateEventResponse {
        success: true,
        message: "Appointment created successfully".to_string(),
        event_id: created.event_id,
        event_link: created.html_link,
    }))
}

/// Maps a day-availability failure onto the endpoint's catch-all wording.
/// `NotConnected` keeps its 404 in case tokens vanish mid-request.
fn availability_failure(error: GcalError, message: &str) -> Response {
    match error {
        GcalError::NotConnected => {
            api_error(StatusCode::NOT_FOUND, "Google Calendar not connected")
        }
        other => {
            log_error(&other, message);
            api_error(StatusCode::INTERNAL_SERVER_ERROR, message)
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

// --- OAuth Handlers ---

#[axum::debug_handler]
pub async fn oauth_authorize_handler(
    State(state): State<Arc<GcalState>>,
    Path(client_id): Path<String>,
) -> Result<Json<AuthUrlResponse>, Response> {
    match state.oauth.authorize_url(&client_id) {
        Ok(auth_url) => {
            info!("Generated Google authorization URL for client {client_id}");
            Ok(Json(AuthUrlResponse { auth_url }))
        }
        Err(e) => {
            log_error(&e, "Generating authorization URL");
            Err(api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to generate authorization URL",
            ))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Completes the consent round trip. Always answers with an HTML page that
/// posts the outcome to the opener window and closes itself; the widget
/// listens for the message, not the status code.
#[axum::debug_handler]
pub async fn oauth_callback_handler(
    State(state): State<Arc<GcalState>>,
    Query(query): Query<CallbackQuery>,
) -> Html<String> {
    match complete_callback(&state, &query).await {
        Ok(client_id) => Html(success_page(&client_id)),
        Err(e) => {
            log_error(&e, "Completing OAuth callback");
            Html(error_page())
        }
    }
}

async fn complete_callback(state: &GcalState, query: &CallbackQuery) -> Result<String, GcalError> {
    if let Some(denied) = &query.error {
        return Err(GcalError::OAuth(format!("Consent denied: {denied}")));
    }
    let code = query
        .code
        .as_deref()
        .ok_or_else(|| GcalError::OAuth("Missing authorization code".to_string()))?;
    let client_id = query
        .state
        .as_deref()
        .ok_or_else(|| GcalError::OAuth("Missing state parameter".to_string()))?;
    let tokens = state.oauth.exchange_code(&HTTP_CLIENT, code).await?;
    state
        .tokens
        .save(client_id, &tokens)
        .map_err(|e| GcalError::TokenStore(e.to_string()))?;
    info!("Google Calendar connected for client {client_id}");
    Ok(client_id.to_string())
}

fn success_page(client_id: &str) -> String {
    // JSON-encoding the payload keeps a hostile state parameter from
    // breaking out of the script block.
    let payload = serde_json::json!({
        "type": "GOOGLE_OAUTH_SUCCESS",
        "clientId": client_id,
    });
    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>Google Calendar Connected</title></head>
<body>
  <h2>Google Calendar connected successfully!</h2>
  <p>You can close this window now.</p>
  <script>
    if (window.opener) {{
      window.opener.postMessage({payload}, '*');
    }}
    window.close();
  </script>
</body>
</html>
"#
    )
}

fn error_page() -> String {
    let payload = serde_json::json!({
        "type": "GOOGLE_OAUTH_ERROR",
        "error": "Failed to connect Google Calendar",
    });
    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>Connection Failed</title></head>
<body>
  <h2>Failed to connect Google Calendar</h2>
  <p>Please close this window and try again.</p>
  <script>
    if (window.opener) {{
      window.opener.postMessage({payload}, '*');
    }}
    window.close();
  </script>
</body>
</html>
"#
    )
}

#[axum::debug_handler]
pub async fn oauth_status_handler(
    State(state): State<Arc<GcalState>>,
    Path(client_id): Path<String>,
) -> Result<Json<ConnectionStatus>, Response> {
    let stored = state.tokens.load(&client_id).map_err(|e| {
        log_error(&e, "Reading stored tokens");
        storage_error(e).into_response()
    })?;
    Ok(Json(match stored {
        None => ConnectionStatus {
            connected: false,
            expired: None,
            scope: None,
            connected_at: None,
        },
        Some(tokens) => ConnectionStatus {
            connected: true,
            expired: Some(tokens.is_expired(Utc::now())),
            scope: tokens.scope,
            connected_at: tokens.created_at,
        },
    }))
}

#[axum::debug_handler]
pub async fn oauth_refresh_handler(
    State(state): State<Arc<GcalState>>,
    Path(client_id): Path<String>,
) -> Result<Json<RefreshResponse>, Response> {
    let stored = ensure_connected(&state, &client_id)?;
    let refreshed = state
        .oauth
        .refresh_access_token(&HTTP_CLIENT, &stored)
        .await
        .map_err(|e| {
            log_error(&e, "Refreshing access token");
            api_error(
                StatusCode::UNAUTHORIZED,
                "Google Calendar authentication expired. Please reconnect.",
            )
        })?;
    state.tokens.save(&client_id, &refreshed).map_err(|e| {
        log_error(&e, "Persisting refreshed tokens");
        storage_error(e).into_response()
    })?;
    info!("Forced token refresh for client {client_id}");
    Ok(Json(RefreshResponse {
        success: true,
        message: "Token refreshed successfully".to_string(),
        expiry_date: refreshed.expiry_date,
    }))
}

#[axum::debug_handler]
pub async fn oauth_disconnect_handler(
    State(state): State<Arc<GcalState>>,
    Path(client_id): Path<String>,
) -> Result<Json<DisconnectResponse>, Response> {
    let removed = state.tokens.clear(&client_id).map_err(|e| {
        log_error(&e, "Clearing stored tokens");
        storage_error(e).into_response()
    })?;
    if !removed {
        return Err(api_error(
            StatusCode::NOT_FOUND,
            "No Google Calendar connection found",
        ));
    }
    info!("Google Calendar disconnected for client {client_id}");
    Ok(Json(DisconnectResponse {
        success: true,
        message: "Google Calendar disconnected successfully".to_string(),
    }))
}
