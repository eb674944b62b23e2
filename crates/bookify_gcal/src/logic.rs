// --- File: crates/bookify_gcal/src/logic.rs ---
//! Request/response types and the calendar orchestration logic shared by the
//! HTTP handlers and the widget booking flow.

use bookify_common::services::{
    BoxedError, CalendarEvent, CalendarService, CreatedEvent, EventDraft, EventMoment,
};
use bookify_config::AppConfig;
use bookify_scheduling::{
    generate_available_slots, local_instant, parse_date, parse_time, parse_timezone, BusyInterval,
    SchedulingConfig, SchedulingError, Slot, Suggestion,
};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, SecondsFormat, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

// --- Error Types ---

#[derive(Error, Debug)]
pub enum GcalError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Google API error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("{0}")]
    Scheduling(#[from] SchedulingError),
    #[error("Google Calendar not connected")]
    NotConnected,
    #[error("Google Calendar authentication expired")]
    AuthExpired,
    #[error("OAuth error: {0}")]
    OAuth(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Token store error: {0}")]
    TokenStore(String),
    #[error("Calendar service error: {0}")]
    Service(String),
}

/// Recovers a [`GcalError`] from the boxed error a [`CalendarService`]
/// implementation returns, so callers can branch on `NotConnected` and
/// `AuthExpired`. Foreign error types collapse into `Service`.
pub fn service_error(error: BoxedError) -> GcalError {
    match error.0.downcast::<GcalError>() {
        Ok(inner) => *inner,
        Err(other) => GcalError::Service(other.to_string()),
    }
}

// --- Request/Response Types ---

/// Appointment duration applied when a request omits one.
pub const DEFAULT_DURATION_MINUTES: i64 = 60;

fn default_duration() -> i64 {
    DEFAULT_DURATION_MINUTES
}

/// Query parameters accepted by the availability endpoint.
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    /// Day to check, `YYYY-MM-DD`.
    pub date: String,
    /// Appointment length in minutes.
    #[serde(default = "default_duration")]
    pub duration: i64,
}

/// One calendar event echoed back alongside the free slots.
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Serialize)]
pub struct ExistingEventSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl From<&CalendarEvent> for ExistingEventSummary {
    fn from(event: &CalendarEvent) -> Self {
        ExistingEventSummary {
            start: event.start.raw().map(str::to_string),
            end: event.end.raw().map(str::to_string),
            summary: event.summary.clone(),
        }
    }
}

#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub success: bool,
    pub date: String,
    pub available_slots: Vec<Slot>,
    pub existing_events: Vec<ExistingEventSummary>,
}

#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionsRequest {
    /// Requested day, `YYYY-MM-DD`.
    pub preferred_date: String,
    /// Requested start time, `HH:MM`.
    pub preferred_time: String,
    #[serde(default = "default_duration")]
    pub duration: i64,
}

#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionsResponse {
    pub success: bool,
    pub preferred_time_available: bool,
    /// Ranked alternatives; empty when the preferred time fits.
    pub suggestions: Vec<Suggestion>,
    /// At most the first 10 free slots of the day.
    pub available_slots: Vec<Slot>,
}

/// Body of the create-event endpoint. Every field is optional at the wire
/// level; the handler rejects missing or empty required fields with one
/// uniform 400 so sloppy chatbot payloads fail the same way.
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub customer_phone: Option<String>,
    #[serde(default)]
    pub appointment_date: Option<String>,
    #[serde(default)]
    pub appointment_time: Option<String>,
    #[serde(default = "default_duration")]
    pub duration: i64,
}

#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_link: Option<String>,
}

/// Response of the authorize endpoint; the widget opens the URL in a popup.
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUrlResponse {
    pub auth_url: String,
}

/// Connection state reported per client id.
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionStatus {
    pub connected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expired: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connected_at: Option<String>,
}

#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub success: bool,
    pub message: String,
    /// New expiry as epoch milliseconds, when Google reported one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<i64>,
}

#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Serialize)]
pub struct DisconnectResponse {
    pub success: bool,
    pub message: String,
}

// --- Configuration Helpers ---

/// Resolves the working window from the optional booking config section,
/// falling back to the stock 09:00-17:00 grid at a 30 minute cadence.
pub fn booking_window(config: &AppConfig) -> Result<SchedulingConfig, GcalError> {
    let booking = config.booking.clone().unwrap_or_default();
    let work_start = parse_time(booking.work_start_time.as_deref().unwrap_or("09:00"))?;
    let work_end = parse_time(booking.work_end_time.as_deref().unwrap_or("17:00"))?;
    Ok(SchedulingConfig::new(
        work_start,
        work_end,
        booking.slot_step_minutes.unwrap_or(30),
        booking.tolerance_minutes.unwrap_or(30),
    )?)
}

/// IANA name of the zone the booking grid lives in.
pub fn calendar_tz_name(config: &AppConfig) -> &str {
    config
        .gcal
        .as_ref()
        .and_then(|gcal| gcal.time_zone.as_deref())
        .unwrap_or("UTC")
}

pub fn calendar_tz(config: &AppConfig) -> Result<Tz, GcalError> {
    Ok(parse_timezone(calendar_tz_name(config))?)
}

/// Target calendar for reads and inserts.
pub fn calendar_id(config: &AppConfig) -> &str {
    config
        .gcal
        .as_ref()
        .and_then(|gcal| gcal.calendar_id.as_deref())
        .unwrap_or("primary")
}

// --- Time Mapping ---

/// UTC instants covering one local day, midnight through 23:59:59.999.
pub fn day_bounds(date: NaiveDate, tz: Tz) -> Result<(DateTime<Utc>, DateTime<Utc>), GcalError> {
    let start = local_midnight(date, tz)
        .ok_or_else(|| SchedulingError::NonexistentLocalTime(format!("{date}T00:00 in {tz}")))?;
    let end_of_day = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap();
    let end = local_instant(date, end_of_day, &tz)?;
    Ok((start, end))
}

/// Local midnight as a UTC instant. In zones where a DST jump removes
/// midnight itself (e.g. America/Sao_Paulo before 2019) the day starts at
/// 01:00 instead.
fn local_midnight(date: NaiveDate, tz: Tz) -> Option<DateTime<Utc>> {
    let midnight = NaiveTime::from_hms_opt(0, 0, 0).unwrap();
    local_instant(date, midnight, &tz)
        .or_else(|_| local_instant(date, NaiveTime::from_hms_opt(1, 0, 0).unwrap(), &tz))
        .ok()
}

/// Maps calendar events onto busy intervals for the slot generator.
///
/// Timed events carry RFC 3339 `dateTime` boundaries. All-day events carry
/// plain `date` boundaries instead; those map to local midnight of their own
/// date, which blocks the whole day because the end date of an all-day event
/// is already exclusive. Events with boundaries that fail to parse are
/// skipped with a warning rather than failing the whole request.
pub fn events_to_busy_intervals(events: &[CalendarEvent], tz: Tz) -> Vec<BusyInterval> {
    events
        .iter()
        .filter_map(|event| {
            let start = moment_to_utc(&event.start, tz)?;
            let end = moment_to_utc(&event.end, tz)?;
            Some(BusyInterval::new(start, end))
        })
        .collect()
}

fn moment_to_utc(moment: &EventMoment, tz: Tz) -> Option<DateTime<Utc>> {
    if let Some(instant) = moment.date_time.as_deref() {
        return match DateTime::parse_from_rfc3339(instant) {
            Ok(parsed) => Some(parsed.with_timezone(&Utc)),
            Err(e) => {
                warn!("Skipping event with unparseable dateTime {instant:?}: {e}");
                None
            }
        };
    }
    let date = moment.date.as_deref()?;
    match parse_date(date) {
        Ok(parsed) => local_midnight(parsed, tz),
        Err(e) => {
            warn!("Skipping event with unparseable all-day date {date:?}: {e}");
            None
        }
    }
}

// --- Availability ---

/// Free slots and raw events for one day of one client's calendar.
#[derive(Debug)]
pub struct DayAvailability {
    pub slots: Vec<Slot>,
    pub events: Vec<CalendarEvent>,
}

/// Fetches a client's events for the day and runs the slot grid over them.
///
/// # Errors
///
/// `NotConnected` when no tokens are stored for the client; otherwise
/// whatever the calendar backend or the slot generator reports.
pub async fn day_availability(
    calendar: &dyn CalendarService<Error = BoxedError>,
    client_id: &str,
    config: &AppConfig,
    window: &SchedulingConfig,
    date: NaiveDate,
    duration_minutes: i64,
) -> Result<DayAvailability, GcalError> {
    let tz = calendar_tz(config)?;
    let (start, end) = day_bounds(date, tz)?;
    let events = calendar
        .day_events(client_id, calendar_id(config), start, end)
        .await
        .map_err(service_error)?;
    let busy = events_to_busy_intervals(&events, tz);
    let slots =
        generate_available_slots(date, &busy, duration_minutes, calendar_tz_name(config), window)?;
    Ok(DayAvailability { slots, events })
}

// --- Event Creation ---

/// Validated appointment fields, shared by the create-event endpoint and the
/// widget booking flow.
#[derive(Debug, Clone)]
pub struct AppointmentBooking {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub duration_minutes: i64,
}

/// Books the appointment on the client's calendar and returns the created
/// event.
pub async fn create_appointment_event(
    calendar: &dyn CalendarService<Error = BoxedError>,
    client_id: &str,
    config: &AppConfig,
    booking: &AppointmentBooking,
) -> Result<CreatedEvent, GcalError> {
    let tz = calendar_tz(config)?;
    let start = local_instant(booking.date, booking.time, &tz)?;
    let end = start + Duration::minutes(booking.duration_minutes);
    let draft = build_event_draft(booking, start, end);
    calendar
        .create_event(client_id, calendar_id(config), draft)
        .await
        .map_err(service_error)
}

/// Renders the appointment into the event the calendar backend inserts.
pub fn build_event_draft(
    booking: &AppointmentBooking,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> EventDraft {
    EventDraft {
        start_time: start.to_rfc3339_opts(SecondsFormat::Millis, true),
        end_time: end.to_rfc3339_opts(SecondsFormat::Millis, true),
        summary: format!("Appointment - {}", booking.customer_name),
        description: Some(format!(
            "Appointment booked via chatbot\n\nCustomer: {}\nEmail: {}\nPhone: {}",
            booking.customer_name,
            booking.customer_email,
            booking.customer_phone.as_deref().unwrap_or("Not provided")
        )),
        attendee_email: Some(booking.customer_email.clone()),
        attendee_name: Some(booking.customer_name.clone()),
    }
}
