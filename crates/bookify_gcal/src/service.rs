// --- File: crates/bookify_gcal/src/service.rs ---
//! Calendar backend over the Google Calendar v3 REST API.
//!
//! Every request runs with a per-client access token resolved from the token
//! store. Tokens past their expiry are refreshed before the call; a 401 from
//! Google triggers one refresh-and-retry, then gives up.

use crate::auth::OAuthClient;
use crate::logic::GcalError;
use bookify_common::services::{
    BoxFuture, BoxedError, CalendarEvent, CalendarService, CreatedEvent, EventDraft, StoredTokens,
    TokenStore,
};
use bookify_common::HTTP_CLIENT;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Google Calendar v3 REST base URL.
const API_BASE: &str = "https://www.googleapis.com/calendar/v3";

pub struct GoogleCalendarService<S: TokenStore> {
    oauth: OAuthClient,
    tokens: Arc<S>,
}

// --- Wire Types (Google Calendar v3) ---

#[derive(Debug, Deserialize)]
struct EventListing {
    #[serde(default)]
    items: Vec<CalendarEvent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InsertedEvent {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    html_link: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EventPayload {
    summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    start: EventTime,
    end: EventTime,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attendees: Vec<Attendee>,
    reminders: Reminders,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EventTime {
    date_time: String,
    time_zone: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Attendee {
    email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    display_name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Reminders {
    use_default: bool,
    overrides: Vec<ReminderOverride>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ReminderOverride {
    method: &'static str,
    minutes: u32,
}

/// Event drafts carry UTC instants; attendees get an email reminder a day
/// ahead and a popup half an hour ahead.
pub(crate) fn event_payload(draft: &EventDraft) -> EventPayload {
    let attendees = draft
        .attendee_email
        .as_ref()
        .map(|email| {
            vec![Attendee {
                email: email.clone(),
                display_name: draft.attendee_name.clone(),
            }]
        })
        .unwrap_or_default();
    EventPayload {
        summary: draft.summary.clone(),
        description: draft.description.clone(),
        start: EventTime {
            date_time: draft.start_time.clone(),
            time_zone: "UTC",
        },
        end: EventTime {
            date_time: draft.end_time.clone(),
            time_zone: "UTC",
        },
        attendees,
        reminders: Reminders {
            use_default: false,
            overrides: vec![
                ReminderOverride {
                    method: "email",
                    minutes: 24 * 60,
                },
                ReminderOverride {
                    method: "popup",
                    minutes: 30,
                },
            ],
        },
    }
}

// --- Service ---

impl<S: TokenStore> GoogleCalendarService<S> {
    pub fn new(oauth: OAuthClient, tokens: Arc<S>) -> Self {
        GoogleCalendarService { oauth, tokens }
    }

    /// Access token for the client, refreshed up front when the stored one
    /// is already past its expiry.
    pub(crate) async fn valid_access_token(&self, client_id: &str) -> Result<String, GcalError> {
        let stored = self
            .load_tokens(client_id)?
            .ok_or(GcalError::NotConnected)?;
        if stored.is_expired(Utc::now()) {
            debug!("Access token for client {client_id} expired, refreshing");
            let refreshed = self.refresh_and_save(client_id, &stored).await?;
            return Ok(refreshed.access_token);
        }
        Ok(stored.access_token)
    }

    async fn refresh_and_save(
        &self,
        client_id: &str,
        stored: &StoredTokens,
    ) -> Result<StoredTokens, GcalError> {
        let refreshed = self
            .oauth
            .refresh_access_token(&HTTP_CLIENT, stored)
            .await
            .map_err(|e| {
                warn!("Token refresh for client {client_id} failed: {e}");
                GcalError::AuthExpired
            })?;
        self.tokens
            .save(client_id, &refreshed)
            .map_err(|e| GcalError::TokenStore(e.to_string()))?;
        Ok(refreshed)
    }

    fn load_tokens(&self, client_id: &str) -> Result<Option<StoredTokens>, GcalError> {
        self.tokens
            .load(client_id)
            .map_err(|e| GcalError::TokenStore(e.to_string()))
    }

    /// Sends the request built by `build`, retrying exactly once after a
    /// token refresh when Google answers 401.
    async fn send_with_refresh<F>(
        &self,
        client_id: &str,
        build: F,
    ) -> Result<reqwest::Response, GcalError>
    where
        F: Fn(&str) -> reqwest::RequestBuilder,
    {
        let token = self.valid_access_token(client_id).await?;
        let response = build(&token).send().await?;
        if response.status() != reqwest::StatusCode::UNAUTHORIZED {
            return Ok(response);
        }
        debug!("Calendar API answered 401 for client {client_id}, retrying after refresh");
        let stored = self
            .load_tokens(client_id)?
            .ok_or(GcalError::NotConnected)?;
        let refreshed = self.refresh_and_save(client_id, &stored).await?;
        Ok(build(&refreshed.access_token).send().await?)
    }

    async fn fetch_day_events(
        &self,
        client_id: &str,
        calendar_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<CalendarEvent>, GcalError> {
        let url = format!("{API_BASE}/calendars/{calendar_id}/events");
        let time_min = start.to_rfc3339();
        let time_max = end.to_rfc3339();
        let response = self
            .send_with_refresh(client_id, |token| {
                HTTP_CLIENT.get(&url).bearer_auth(token).query(&[
                    ("timeMin", time_min.as_str()),
                    ("timeMax", time_max.as_str()),
                    ("singleEvents", "true"),
                    ("orderBy", "startTime"),
                ])
            })
            .await?;
        let response = check_status(response).await?;
        let listing: EventListing = response.json().await?;
        debug!(
            "Fetched {} events for client {client_id} between {time_min} and {time_max}",
            listing.items.len()
        );
        Ok(listing.items)
    }

    async fn insert_event(
        &self,
        client_id: &str,
        calendar_id: &str,
        draft: &EventDraft,
    ) -> Result<CreatedEvent, GcalError> {
        let url = format!("{API_BASE}/calendars/{calendar_id}/events");
        let payload = event_payload(draft);
        let response = self
            .send_with_refresh(client_id, |token| {
                HTTP_CLIENT.post(&url).bearer_auth(token).json(&payload)
            })
            .await?;
        let response = check_status(response).await?;
        let inserted: InsertedEvent = response.json().await?;
        Ok(CreatedEvent {
            event_id: inserted.id,
            html_link: inserted.html_link,
            status: inserted.status.unwrap_or_else(|| "confirmed".to_string()),
        })
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, GcalError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(GcalError::Api {
        status: status.as_u16(),
        message,
    })
}

fn boxed(error: GcalError) -> BoxedError {
    BoxedError(Box::new(error))
}

impl<S: TokenStore + 'static> CalendarService for GoogleCalendarService<S> {
    type Error = BoxedError;

    fn day_events(
        &self,
        client_id: &str,
        calendar_id: &str,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> BoxFuture<'_, Vec<CalendarEvent>, Self::Error> {
        let client_id = client_id.to_string();
        let calendar_id = calendar_id.to_string();
        Box::pin(async move {
            self.fetch_day_events(&client_id, &calendar_id, start_time, end_time)
                .await
                .map_err(boxed)
        })
    }

    fn create_event(
        &self,
        client_id: &str,
        calendar_id: &str,
        draft: EventDraft,
    ) -> BoxFuture<'_, CreatedEvent, Self::Error> {
        let client_id = client_id.to_string();
        let calendar_id = calendar_id.to_string();
        Box::pin(async move {
            self.insert_event(&client_id, &calendar_id, &draft)
                .await
                .map_err(boxed)
        })
    }
}

// --- Mock Service for Testing ---
