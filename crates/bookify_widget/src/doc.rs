// --- File: crates/bookify_widget/src/doc.rs ---
#![allow(dead_code)]
#![cfg(feature = "openapi")]

//! OpenAPI description of the widget surface.
//!
//! The webhook handler carries its annotation inline; the bot-config stub
//! below documents the remaining route.

use utoipa::OpenApi;

use crate::config::{AppointmentOption, BotConfig, BotOverrides, OpeningMessage};
use crate::handlers::BotConfigResponse;
use crate::logic::{
    AckResponse, BookedResponse, BookingFormData, ConflictResponse, DegradedResponse,
    WebhookRequest,
};

/// GET /api/bot-config/{bot_id}
#[utoipa::path(
    get,
    path = "/api/bot-config/{bot_id}",
    tag = "widget",
    params(
        ("bot_id" = String, Path, description = "Bot to resolve the widget configuration for")
    ),
    responses(
        (status = 200, description = "Resolved widget configuration", body = BotConfigResponse),
        (status = 404, description = "Bot configuration not found"),
        (status = 500, description = "Stored overrides could not be read")
    )
)]
async fn doc_bot_config() {}

#[derive(OpenApi)]
#[openapi(
    paths(crate::handlers::webhook_handler, doc_bot_config),
    components(schemas(
        WebhookRequest,
        BookingFormData,
        AckResponse,
        ConflictResponse,
        BookedResponse,
        DegradedResponse,
        BotConfigResponse,
        BotConfig,
        BotOverrides,
        OpeningMessage,
        AppointmentOption,
    )),
    tags(
        (name = "widget", description = "Embeddable chat widget endpoints")
    ),
    servers(
        (url = "/", description = "Bookify server")
    )
)]
pub struct WidgetApiDoc;
