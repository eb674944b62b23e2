// --- File: crates/bookify_gcal/src/auth.rs ---
//! Google OAuth2 authorization-code flow.
//!
//! Each client id connects its own Google account through the consent popup;
//! the tokens land in the shared store keyed by that id. Client credentials
//! come from the gcal config section with environment fallbacks, except the
//! client secret, which is only ever read from the environment.

use crate::logic::GcalError;
use bookify_common::services::StoredTokens;
use bookify_config::AppConfig;
use chrono::{SecondsFormat, Utc};
use serde::Deserialize;
use std::env;

/// Google's OAuth2 consent endpoint.
const AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
/// Google's token endpoint, shared by code exchange and refresh.
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
/// The only scope the server needs: read events and insert new ones.
pub const CALENDAR_SCOPE: &str = "https://www.googleapis.com/auth/calendar.events";

#[derive(Debug, Clone)]
pub struct OAuthClient {
    client_id: String,
    client_secret: String,
    redirect_uri: String,
}

/// Successful token endpoint response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    scope: Option<String>,
}

impl OAuthClient {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        OAuthClient {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
        }
    }

    /// Builds the client from the gcal config section.
    ///
    /// The client id may come from the section or from `GOOGLE_CLIENT_ID`;
    /// the secret only from `GOOGLE_CLIENT_SECRET`. A missing redirect URI
    /// falls back to `GOOGLE_REDIRECT_URI`, then to the server's own
    /// callback route.
    pub fn from_config(config: &AppConfig) -> Result<Self, GcalError> {
        let gcal = config
            .gcal
            .as_ref()
            .ok_or_else(|| GcalError::Config("Missing gcal config section".to_string()))?;
        let client_id = gcal
            .client_id
            .clone()
            .or_else(|| env::var("GOOGLE_CLIENT_ID").ok())
            .ok_or_else(|| GcalError::Config("Missing GOOGLE_CLIENT_ID".to_string()))?;
        let client_secret = env::var("GOOGLE_CLIENT_SECRET")
            .map_err(|_| GcalError::Config("Missing GOOGLE_CLIENT_SECRET".to_string()))?;
        let redirect_uri = gcal
            .redirect_uri
            .clone()
            .or_else(|| env::var("GOOGLE_REDIRECT_URI").ok())
            .unwrap_or_else(|| {
                format!("http://localhost:{}/oauth2/callback", config.server.port)
            });
        Ok(OAuthClient::new(client_id, client_secret, redirect_uri))
    }

    /// Consent page URL. `state` carries the client id through the redirect
    /// round trip; `access_type=offline` plus `prompt=consent` makes Google
    /// hand out a refresh token on every connect.
    pub fn authorize_url(&self, state: &str) -> Result<String, GcalError> {
        let query = serde_urlencoded::to_string([
            ("client_id", self.client_id.as_str()),
            ("redirect_uri", self.redirect_uri.as_str()),
            ("response_type", "code"),
            ("scope", CALENDAR_SCOPE),
            ("access_type", "offline"),
            ("prompt", "consent"),
            ("state", state),
        ])
        .map_err(|e| GcalError::OAuth(format!("Failed to encode authorize URL: {e}")))?;
        Ok(format!("{AUTH_URL}?{query}"))
    }

    /// Exchanges an authorization code for tokens and stamps them for
    /// storage. Expiry is converted from `expires_in` seconds to an absolute
    /// epoch-millisecond instant.
    pub async fn exchange_code(
        &self,
        http: &reqwest::Client,
        code: &str,
    ) -> Result<StoredTokens, GcalError> {
        let response = http
            .post(TOKEN_URL)
            .form(&[
                ("code", code),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await?;
        let token = parse_token_response(response).await?;
        let now = Utc::now();
        Ok(StoredTokens {
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            scope: token.scope,
            expiry_date: token
                .expires_in
                .map(|secs| now.timestamp_millis() + secs * 1000),
            created_at: Some(now.to_rfc3339_opts(SecondsFormat::Millis, true)),
            updated_at: None,
        })
    }

    /// Mints a fresh access token from the stored refresh token. Fields
    /// Google omits from the refresh response (usually the refresh token
    /// itself and the scope) are carried over from the stored set.
    ///
    /// # Errors
    ///
    /// `AuthExpired` when no refresh token is stored.
    pub async fn refresh_access_token(
        &self,
        http: &reqwest::Client,
        stored: &StoredTokens,
    ) -> Result<StoredTokens, GcalError> {
        let refresh_token = stored
            .refresh_token
            .as_deref()
            .ok_or(GcalError::AuthExpired)?;
        let response = http
            .post(TOKEN_URL)
            .form(&[
                ("refresh_token", refresh_token),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await?;
        let token = parse_token_response(response).await?;
        let now = Utc::now();
        Ok(StoredTokens {
            access_token: token.access_token,
            refresh_token: token
                .refresh_token
                .or_else(|| stored.refresh_token.clone()),
            scope: token.scope.or_else(|| stored.scope.clone()),
            expiry_date: token
                .expires_in
                .map(|secs| now.timestamp_millis() + secs * 1000),
            created_at: stored.created_at.clone(),
            updated_at: Some(now.to_rfc3339_opts(SecondsFormat::Millis, true)),
        })
    }
}

async fn parse_token_response(response: reqwest::Response) -> Result<TokenResponse, GcalError> {
    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(GcalError::Api {
            status: status.as_u16(),
            message,
        });
    }
    Ok(response.json().await?)
}
