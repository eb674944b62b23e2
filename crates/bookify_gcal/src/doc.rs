// --- File: crates/bookify_gcal/src/doc.rs ---
#![allow(dead_code)]
#![cfg(feature = "openapi")]

//! OpenAPI documentation for the calendar routes. The handlers stay free of
//! annotation noise; path stubs here mirror their signatures instead.

use crate::logic::{
    AuthUrlResponse, AvailabilityResponse, ConnectionStatus, CreateEventRequest,
    CreateEventResponse, DisconnectResponse, ExistingEventSummary, RefreshResponse,
    SuggestionsRequest, SuggestionsResponse,
};
use bookify_scheduling::{Slot, Suggestion};
use utoipa::OpenApi;

#[utoipa::path(
    post,
    path = "/api/calendar/suggestions/{client_id}",
    params(("client_id" = String, Path, description = "Client whose calendar to check")),
    request_body = SuggestionsRequest,
    responses(
        (status = 200, description = "Fuzzy availability verdict plus ranked alternatives", body = SuggestionsResponse),
        (status = 400, description = "Malformed preferred date or time"),
        (status = 404, description = "Google Calendar not connected"),
        (status = 500, description = "Calendar backend failure"),
    ),
    tag = "calendar"
)]
fn doc_get_suggestions_handler() {}

#[utoipa::path(
    post,
    path = "/api/calendar/create-event/{client_id}",
    params(("client_id" = String, Path, description = "Client whose calendar receives the event")),
    request_body = CreateEventRequest,
    responses(
        (status = 200, description = "Appointment created", body = CreateEventResponse),
        (status = 400, description = "Missing required appointment details"),
        (status = 401, description = "Authentication expired, reconnect required"),
        (status = 404, description = "Google Calendar not connected"),
        (status = 500, description = "Calendar backend failure"),
    ),
    tag = "calendar"
)]
fn doc_create_event_handler() {}

#[utoipa::path(
    get,
    path = "/oauth2/authorize/{client_id}",
    params(("client_id" = String, Path, description = "Client to connect")),
    responses(
        (status = 200, description = "Consent URL to open in a popup", body = AuthUrlResponse),
        (status = 500, description = "Authorization URL could not be generated"),
    ),
    tag = "oauth"
)]
fn doc_oauth_authorize_handler() {}

#[utoipa::path(
    get,
    path = "/oauth2/callback",
    params(
        ("code" = Option<String>, Query, description = "Authorization code from Google"),
        ("state" = Option<String>, Query, description = "Client id from the authorize call"),
        ("error" = Option<String>, Query, description = "Set when the user denied consent"),
    ),
    responses(
        (status = 200, description = "HTML page that posts the outcome to the opener window", content_type = "text/html"),
    ),
    tag = "oauth"
)]
fn doc_oauth_callback_handler() {}

#[utoipa::path(
    get,
    path = "/api/calendar/status/{client_id}",
    params(("client_id" = String, Path, description = "Client to inspect")),
    responses(
        (status = 200, description = "Connection state for the client", body = ConnectionStatus),
    ),
    tag = "oauth"
)]
fn doc_oauth_status_handler() {}

#[utoipa::path(
    post,
    path = "/api/calendar/refresh/{client_id}",
    params(("client_id" = String, Path, description = "Client whose tokens to refresh")),
    responses(
        (status = 200, description = "Tokens refreshed and persisted", body = RefreshResponse),
        (status = 401, description = "Refresh failed, reconnect required"),
        (status = 404, description = "Google Calendar not connected"),
    ),
    tag = "oauth"
)]
fn doc_oauth_refresh_handler() {}

#[utoipa::path(
    delete,
    path = "/api/calendar/disconnect/{client_id}",
    params(("client_id" = String, Path, description = "Client to disconnect")),
    responses(
        (status = 200, description = "Stored tokens removed", body = DisconnectResponse),
        (status = 404, description = "No Google Calendar connection found"),
    ),
    tag = "oauth"
)]
fn doc_oauth_disconnect_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::get_availability_handler,
        doc_get_suggestions_handler,
        doc_create_event_handler,
        doc_oauth_authorize_handler,
        doc_oauth_callback_handler,
        doc_oauth_status_handler,
        doc_oauth_refresh_handler,
        doc_oauth_disconnect_handler,
    ),
    components(schemas(
        Slot,
        Suggestion,
        AvailabilityResponse,
        ExistingEventSummary,
        SuggestionsRequest,
        SuggestionsResponse,
        CreateEventRequest,
        CreateEventResponse,
        AuthUrlResponse,
        ConnectionStatus,
        RefreshResponse,
        DisconnectResponse,
    )),
    tags(
        (name = "calendar", description = "Availability, suggestions and event creation"),
        (name = "oauth", description = "Google Calendar connection management"),
    ),
    servers((url = "/", description = "Bookify server"))
)]
pub struct GcalApiDoc;
