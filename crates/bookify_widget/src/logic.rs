// --- File: crates/bookify_widget/src/logic.rs ---
//! The appointment-booking webhook flow.
//!
//! The chat widget fires one webhook per submitted form. The flow is
//! strictly linear: validate the envelope, check the day's availability,
//! either book the event and append the local record or answer with ranked
//! alternatives. Calendar trouble never fails the webhook; it degrades into
//! a "contact us directly" reply so the visitor is not left hanging.

use bookify_common::services::{BoxedError, CalendarService};
use bookify_config::AppConfig;
use bookify_gcal::logic::{
    calendar_tz, create_appointment_event, day_availability, AppointmentBooking,
    CreateEventResponse, GcalError, DEFAULT_DURATION_MINUTES,
};
use bookify_scheduling::{
    is_time_available, local_instant, parse_date, parse_time, suggest_alternatives,
    SchedulingConfig, Slot, Suggestion,
};
use bookify_store::{new_appointment_id, now_timestamp, AppointmentRecord, JsonStore, StoreError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

// --- Error Types ---

#[derive(Error, Debug)]
pub enum WidgetError {
    #[error("Invalid widget configuration: {0}")]
    InvalidConfig(String),
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

// --- Webhook Envelope ---

/// Form fields the widget collects for an appointment request.
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingFormData {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub preferred_date: Option<String>,
    #[serde(default)]
    pub preferred_time: Option<String>,
}

/// Webhook envelope posted by the widget.
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookRequest {
    #[serde(default)]
    pub bot_id: Option<String>,
    #[serde(default, rename = "type")]
    pub event_type: Option<String>,
    #[serde(default)]
    pub form_data: Option<BookingFormData>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// A complete booking request lifted out of the envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingSubmission {
    pub full_name: String,
    pub contact: String,
    pub phone: Option<String>,
    pub preferred_date: String,
    pub preferred_time: String,
}

/// Accepts the envelope only when it is an appointment booking with every
/// required field non-empty; anything else is acknowledged without action.
pub fn booking_submission(request: &WebhookRequest) -> Option<BookingSubmission> {
    if request.event_type.as_deref() != Some("appointment_booking") {
        return None;
    }
    let form = request.form_data.as_ref()?;
    let full_name = non_empty(&form.full_name)?;
    let contact = non_empty(&form.contact)?;
    let preferred_date = non_empty(&form.preferred_date)?;
    let preferred_time = non_empty(&form.preferred_time)?;
    Some(BookingSubmission {
        full_name: full_name.to_string(),
        contact: contact.to_string(),
        phone: non_empty(&form.phone).map(str::to_string),
        preferred_date: preferred_date.to_string(),
        preferred_time: preferred_time.to_string(),
    })
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

// --- Webhook Responses ---

/// Acknowledgement for non-booking or incomplete payloads.
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AckResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bot_id: Option<String>,
    pub response_time: String,
    pub timestamp: String,
}

/// The preferred time is taken; ranked alternatives ride along.
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictResponse {
    pub success: bool,
    pub message: String,
    pub conflict: bool,
    pub suggestions: Vec<Suggestion>,
    pub available_slots: Vec<Slot>,
    pub response_time: String,
    pub timestamp: String,
}

#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookedResponse {
    pub success: bool,
    pub message: String,
    pub appointment_id: String,
    /// Echo of what the create-event endpoint would have answered.
    pub calendar_event: CreateEventResponse,
    pub response_time: String,
    pub timestamp: String,
}

/// Still HTTP 200: the request was heard even though the calendar is
/// unreachable, and the visitor is told to get in touch directly.
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DegradedResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bot_id: Option<String>,
    pub calendar_error: String,
    pub response_time: String,
    pub timestamp: String,
}

// --- Booking Flow ---

/// Where a complete booking request ended up.
#[derive(Debug)]
pub enum BookingOutcome {
    /// Preferred time unavailable; nothing was booked.
    Conflict {
        suggestions: Vec<Suggestion>,
        available_slots: Vec<Slot>,
    },
    /// Event created and the appointment record appended.
    Booked {
        appointment_id: String,
        calendar_event: CreateEventResponse,
    },
    /// Calendar unreachable or failing; the request is only acknowledged.
    Degraded { calendar_error: String },
}

/// Runs a complete booking request end to end.
///
/// Calendar failures map onto the calendar API's public error wording and
/// come back as `Degraded`; only a store failure after a successful booking
/// is a hard error.
pub async fn process_booking(
    calendar: Option<&dyn CalendarService<Error = BoxedError>>,
    store: &JsonStore,
    config: &AppConfig,
    window: &SchedulingConfig,
    bot_id: Option<&str>,
    submission: &BookingSubmission,
) -> Result<BookingOutcome, StoreError> {
    let Some(calendar) = calendar else {
        return Ok(degraded("Calendar not connected"));
    };
    let client_id = bot_id.unwrap_or_default();

    let (Ok(date), Ok(time)) = (
        parse_date(&submission.preferred_date),
        parse_time(&submission.preferred_time),
    ) else {
        warn!(
            "Booking for bot {client_id} carried unparseable date/time {:?} {:?}",
            submission.preferred_date, submission.preferred_time
        );
        return Ok(degraded("Failed to check availability"));
    };

    let availability = match day_availability(
        calendar,
        client_id,
        config,
        window,
        date,
        DEFAULT_DURATION_MINUTES,
    )
    .await
    {
        Ok(availability) => availability,
        Err(GcalError::NotConnected) => return Ok(degraded("Google Calendar not connected")),
        Err(error) => {
            warn!("Availability check degraded booking for bot {client_id}: {error}");
            return Ok(degraded("Failed to check availability"));
        }
    };

    let preferred = match calendar_tz(config)
        .and_then(|tz| local_instant(date, time, &tz).map_err(GcalError::from))
    {
        Ok(preferred) => preferred,
        Err(error) => {
            warn!("Preferred instant could not be resolved for bot {client_id}: {error}");
            return Ok(degraded("Failed to check availability"));
        }
    };

    if !is_time_available(preferred, &availability.slots, window.tolerance_minutes) {
        let suggestions = suggest_alternatives(date, preferred, &availability.slots);
        let mut available_slots = availability.slots;
        available_slots.truncate(10);
        return Ok(BookingOutcome::Conflict {
            suggestions,
            available_slots,
        });
    }

    let booking = AppointmentBooking {
        customer_name: submission.full_name.clone(),
        customer_email: submission.contact.clone(),
        customer_phone: submission.phone.clone(),
        date,
        time,
        duration_minutes: DEFAULT_DURATION_MINUTES,
    };
    let created = match create_appointment_event(calendar, client_id, config, &booking).await {
        Ok(created) => created,
        Err(GcalError::NotConnected) => return Ok(degraded("Google Calendar not connected")),
        Err(GcalError::AuthExpired) => {
            return Ok(degraded(
                "Google Calendar authentication expired. Please reconnect.",
            ))
        }
        Err(error) => {
            warn!("Event creation degraded booking for bot {client_id}: {error}");
            return Ok(degraded("Failed to create calendar event"));
        }
    };

    let record = AppointmentRecord {
        id: new_appointment_id(),
        bot_id: client_id.to_string(),
        customer_name: submission.full_name.clone(),
        customer_email: submission.contact.clone(),
        customer_phone: submission.phone.clone(),
        appointment_date: submission.preferred_date.clone(),
        appointment_time: submission.preferred_time.clone(),
        status: "confirmed".to_string(),
        google_event_id: created.event_id.clone(),
        created_at: now_timestamp(),
    };
    let appointment_id = record.id.clone();
    store.append_appointment(record)?;

    Ok(BookingOutcome::Booked {
        appointment_id,
        calendar_event: CreateEventResponse {
            success: true,
            message: "Appointment created successfully".to_string(),
            event_id: created.event_id,
            event_link: created.html_link,
        },
    })
}

fn degraded(calendar_error: &str) -> BookingOutcome {
    BookingOutcome::Degraded {
        calendar_error: calendar_error.to_string(),
    }
}
