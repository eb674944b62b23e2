// --- File: crates/bookify_widget/src/routes.rs ---
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{bot_config_handler, webhook_handler, WidgetState};

/// Builds the widget router.
///
/// Paths are absolute so the backend can merge this router as-is; the
/// webhook lives outside `/api` because embedded widgets already post to
/// that URL.
pub fn routes(state: Arc<WidgetState>) -> Router {
    Router::new()
        .route("/webhook/appointment-booking", post(webhook_handler))
        .route("/api/bot-config/{bot_id}", get(bot_config_handler))
        .with_state(state)
}
