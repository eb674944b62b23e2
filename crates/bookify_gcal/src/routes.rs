// --- File: crates/bookify_gcal/src/routes.rs ---
use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use crate::handlers::{
    create_event_handler, get_availability_handler, get_suggestions_handler,
    oauth_authorize_handler, oauth_callback_handler, oauth_disconnect_handler,
    oauth_refresh_handler, oauth_status_handler, GcalState,
};

/// Creates the calendar API router plus the OAuth connection routes.
///
/// Paths are absolute so the backend can merge this router as-is; the OAuth
/// callback lives outside `/api` because Google redirects the browser there.
pub fn routes(state: Arc<GcalState>) -> Router {
    Router::new()
        .route(
            "/api/calendar/availability/{client_id}",
            get(get_availability_handler),
        )
        .route(
            "/api/calendar/suggestions/{client_id}",
            post(get_suggestions_handler),
        )
        .route(
            "/api/calendar/create-event/{client_id}",
            post(create_event_handler),
        )
        .route(
            "/api/calendar/status/{client_id}",
            get(oauth_status_handler),
        )
        .route(
            "/api/calendar/refresh/{client_id}",
            post(oauth_refresh_handler),
        )
        .route(
            "/api/calendar/disconnect/{client_id}",
            delete(oauth_disconnect_handler),
        )
        .route("/oauth2/authorize/{client_id}", get(oauth_authorize_handler))
        .route("/oauth2/callback", get(oauth_callback_handler))
        .with_state(state)
}
