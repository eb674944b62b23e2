// --- File: crates/bookify_widget/src/config.rs ---
//! Bot-facing widget configuration.
//!
//! The embed script only carries a bot id; the widget fetches the rest from
//! the bot-config endpoint. Defaults here are what the widget ships with,
//! and per-bot overrides from the store are layered over them through a
//! validating resolver rather than a blind field merge.

use crate::logic::WidgetError;
use bookify_config::AppConfig;
use serde::{Deserialize, Serialize};
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// One scripted line the widget plays when it opens.
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OpeningMessage {
    pub text: String,
    #[serde(default)]
    pub show_avatar: bool,
}

/// One quick-reply option offered in the chat.
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentOption {
    pub text: String,
    #[serde(rename = "type")]
    pub option_type: String,
}

/// Fully resolved widget configuration served to the embed.
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BotConfig {
    pub bot_id: String,
    pub name: String,
    pub company_name: String,
    pub avatar: String,
    pub theme_color: String,
    pub position: String,
    pub side_spacing: i64,
    pub bottom_spacing: i64,
    pub show_desktop: bool,
    pub show_mobile: bool,
    pub opening_messages: Vec<OpeningMessage>,
    pub appointment_options: Vec<AppointmentOption>,
    pub appointment_greeting: String,
    pub webhook_url: String,
}

/// Per-bot overrides as stored in the clients map. Every field is optional;
/// anything absent keeps its default.
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotOverrides {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub theme_color: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub side_spacing: Option<i64>,
    #[serde(default)]
    pub bottom_spacing: Option<i64>,
    #[serde(default)]
    pub show_desktop: Option<bool>,
    #[serde(default)]
    pub show_mobile: Option<bool>,
    #[serde(default)]
    pub opening_messages: Option<Vec<OpeningMessage>>,
    #[serde(default)]
    pub appointment_options: Option<Vec<AppointmentOption>>,
    #[serde(default)]
    pub appointment_greeting: Option<String>,
    #[serde(default)]
    pub webhook_url: Option<String>,
}

impl Default for BotConfig {
    fn default() -> Self {
        BotConfig {
            bot_id: "default-bot".to_string(),
            name: "Assistant".to_string(),
            company_name: "Your Company".to_string(),
            avatar:
                "https://ui-avatars.com/api/?name=Bot&background=8FE3A8&color=fff&size=40&bold=true"
                    .to_string(),
            theme_color: "#8FE3A8".to_string(),
            position: "right".to_string(),
            side_spacing: 25,
            bottom_spacing: 25,
            show_desktop: true,
            show_mobile: true,
            opening_messages: vec![OpeningMessage {
                text: "Hi! How can I help you today?".to_string(),
                show_avatar: true,
            }],
            appointment_options: vec![AppointmentOption {
                text: "Request an appointment".to_string(),
                option_type: "appointment".to_string(),
            }],
            appointment_greeting: "Hello! I can help you book an appointment.".to_string(),
            webhook_url: "https://your-domain.com/webhook/appointment".to_string(),
        }
    }
}

impl BotConfig {
    /// Layers the server-level webhook URL and the per-bot overrides over
    /// the defaults, validating each field as it lands.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` for a position other than `left`/`right`, a negative
    /// spacing, or a theme color that is not `#RRGGBB`.
    pub fn resolve(
        bot_id: &str,
        server_webhook_url: Option<&str>,
        overrides: BotOverrides,
    ) -> Result<Self, WidgetError> {
        let mut config = BotConfig {
            bot_id: bot_id.to_string(),
            ..BotConfig::default()
        };
        if let Some(url) = server_webhook_url {
            config.webhook_url = url.to_string();
        }

        if let Some(name) = overrides.name {
            config.name = name;
        }
        if let Some(company_name) = overrides.company_name {
            config.company_name = company_name;
        }
        if let Some(avatar) = overrides.avatar {
            config.avatar = avatar;
        }
        if let Some(theme_color) = overrides.theme_color {
            if !is_hex_color(&theme_color) {
                return Err(WidgetError::InvalidConfig(format!(
                    "themeColor must be #RRGGBB, got {theme_color:?}"
                )));
            }
            config.theme_color = theme_color;
        }
        if let Some(position) = overrides.position {
            if position != "left" && position != "right" {
                return Err(WidgetError::InvalidConfig(format!(
                    "position must be left or right, got {position:?}"
                )));
            }
            config.position = position;
        }
        if let Some(side_spacing) = overrides.side_spacing {
            if side_spacing < 0 {
                return Err(WidgetError::InvalidConfig(format!(
                    "sideSpacing must be non-negative, got {side_spacing}"
                )));
            }
            config.side_spacing = side_spacing;
        }
        if let Some(bottom_spacing) = overrides.bottom_spacing {
            if bottom_spacing < 0 {
                return Err(WidgetError::InvalidConfig(format!(
                    "bottomSpacing must be non-negative, got {bottom_spacing}"
                )));
            }
            config.bottom_spacing = bottom_spacing;
        }
        if let Some(show_desktop) = overrides.show_desktop {
            config.show_desktop = show_desktop;
        }
        if let Some(show_mobile) = overrides.show_mobile {
            config.show_mobile = show_mobile;
        }
        if let Some(opening_messages) = overrides.opening_messages {
            config.opening_messages = opening_messages;
        }
        if let Some(appointment_options) = overrides.appointment_options {
            config.appointment_options = appointment_options;
        }
        if let Some(appointment_greeting) = overrides.appointment_greeting {
            config.appointment_greeting = appointment_greeting;
        }
        if let Some(webhook_url) = overrides.webhook_url {
            config.webhook_url = webhook_url;
        }

        Ok(config)
    }
}

fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}

/// Bot id the server treats as always configured.
pub fn default_bot_id(config: &AppConfig) -> &str {
    config
        .widget
        .as_ref()
        .and_then(|widget| widget.default_bot_id.as_deref())
        .unwrap_or("default-bot")
}

/// Webhook URL the served widget configs point at, when the server knows
/// its own address.
pub fn server_webhook_url(config: &AppConfig) -> Option<&str> {
    config
        .widget
        .as_ref()
        .and_then(|widget| widget.webhook_url.as_deref())
}
