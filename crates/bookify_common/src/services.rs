// --- File: crates/bookify_common/src/services.rs ---
//! Service abstractions for external collaborators.
//!
//! This module defines the traits the application uses to talk to the
//! external calendar provider and to the persisted OAuth token store. The
//! traits decouple handler and orchestration code from concrete
//! implementations, which keeps them testable against in-memory fakes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// A wrapper error type that implements std::error::Error for Box<dyn std::error::Error + Send + Sync>
#[derive(Debug)]
pub struct BoxedError(pub Box<dyn StdError + Send + Sync>);

impl fmt::Display for BoxedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StdError for BoxedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

impl From<Box<dyn StdError + Send + Sync>> for BoxedError {
    fn from(err: Box<dyn StdError + Send + Sync>) -> Self {
        BoxedError(err)
    }
}

/// A trait for calendar operations on behalf of one connected client.
///
/// Every operation is scoped by a `client_id`: each chatbot connects its own
/// Google account, and the implementation resolves that client's stored
/// credentials before touching the calendar API.
pub trait CalendarService: Send + Sync {
    /// Error type returned by calendar service operations.
    type Error: StdError + Send + Sync + 'static;

    /// Events on a calendar within a time range, expanded to single
    /// occurrences and ordered by start time.
    fn day_events(
        &self,
        client_id: &str,
        calendar_id: &str,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> BoxFuture<'_, Vec<CalendarEvent>, Self::Error>;

    /// Create a calendar event from a draft.
    fn create_event(
        &self,
        client_id: &str,
        calendar_id: &str,
        draft: EventDraft,
    ) -> BoxFuture<'_, CreatedEvent, Self::Error>;
}

/// Persisted OAuth tokens, keyed by client id.
///
/// Implementations are synchronous: the backing document is a small local
/// file read and replaced whole.
pub trait TokenStore: Send + Sync {
    /// Error type returned by token store operations.
    type Error: StdError + Send + Sync + 'static;

    /// Tokens for a client, or `None` when the client never connected.
    fn load(&self, client_id: &str) -> Result<Option<StoredTokens>, Self::Error>;

    /// Persist (or replace) a client's tokens.
    fn save(&self, client_id: &str, tokens: &StoredTokens) -> Result<(), Self::Error>;

    /// Remove a client's tokens. Returns `false` when none were stored.
    fn clear(&self, client_id: &str) -> Result<bool, Self::Error>;
}

/// OAuth tokens as they sit in the data document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredTokens {
    /// Bearer token for calendar API calls.
    pub access_token: String,
    /// Long-lived token used to mint fresh access tokens; absent when the
    /// provider did not issue one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Space-separated scopes granted by the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    /// Access-token expiry as epoch milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<i64>,
    /// When the connection was first made, RFC 3339.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// When the tokens were last replaced, RFC 3339.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl StoredTokens {
    /// Whether the access token's expiry lies in the past.
    ///
    /// Tokens without a recorded expiry are treated as still valid; the API
    /// itself is the authority and a 401 will trigger a refresh anyway.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expiry_date
            .map(|expiry_millis| expiry_millis < now.timestamp_millis())
            .unwrap_or(false)
    }
}

/// One boundary of a calendar event: either a precise instant or, for
/// all-day events, a bare date.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EventMoment {
    /// RFC 3339 instant for timed events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    /// `YYYY-MM-DD` for all-day events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl EventMoment {
    /// The instant if present, otherwise the all-day date.
    pub fn raw(&self) -> Option<&str> {
        self.date_time.as_deref().or(self.date.as_deref())
    }
}

/// A calendar event as the provider reports it.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CalendarEvent {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub start: EventMoment,
    #[serde(default)]
    pub end: EventMoment,
}

/// Everything needed to create an appointment event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDraft {
    /// RFC 3339 start instant.
    pub start_time: String,
    /// RFC 3339 end instant.
    pub end_time: String,
    /// Event title.
    pub summary: String,
    /// Free-text body with the customer details.
    pub description: Option<String>,
    /// Customer email, invited as an attendee when present.
    pub attendee_email: Option<String>,
    /// Display name for the attendee.
    pub attendee_name: Option<String>,
}

/// Result of creating a calendar event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedEvent {
    /// The provider-assigned event id.
    pub event_id: Option<String>,
    /// Link to the event in the provider's UI.
    pub html_link: Option<String>,
    /// The event status, e.g. "confirmed".
    pub status: String,
}
