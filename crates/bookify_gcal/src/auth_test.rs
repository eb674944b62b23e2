// --- File: crates/bookify_gcal/src/auth_test.rs ---
use crate::auth::OAuthClient;
use crate::logic::GcalError;
use bookify_common::services::StoredTokens;
use bookify_common::HTTP_CLIENT;
use bookify_config::{AppConfig, ServerConfig};

fn bare_config() -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3001,
        },
        use_gcal: true,
        use_widget: false,
        gcal: None,
        booking: None,
        storage: None,
        widget: None,
    }
}

fn stored_without_refresh() -> StoredTokens {
    StoredTokens {
        access_token: "access-token".to_string(),
        refresh_token: None,
        scope: None,
        expiry_date: None,
        created_at: None,
        updated_at: None,
    }
}

// Test case: the consent URL carries every parameter the flow relies on,
// including the offline access that makes Google hand out a refresh token.
#[test]
fn test_authorize_url_carries_oauth_params() {
    let client = OAuthClient::new("id-123", "secret", "http://localhost:3001/oauth2/callback");
    let url = client.authorize_url("client-a").unwrap();

    assert!(url.starts_with("https://accounts.google.com/o/oauth2/v2/auth?"));
    assert!(url.contains("client_id=id-123"));
    assert!(url.contains("response_type=code"));
    assert!(url.contains("access_type=offline"));
    assert!(url.contains("prompt=consent"));
    assert!(url.contains("state=client-a"));
    assert!(url.contains("scope=https%3A%2F%2Fwww.googleapis.com%2Fauth%2Fcalendar.events"));
    assert!(url.contains("redirect_uri=http%3A%2F%2Flocalhost%3A3001%2Foauth2%2Fcallback"));
}

// Test case: the state parameter is percent-encoded, so a client id with
// reserved characters survives the round trip.
#[test]
fn test_authorize_url_encodes_state() {
    let client = OAuthClient::new("id", "secret", "http://localhost/cb");
    let url = client.authorize_url("client a&b").unwrap();

    assert!(url.contains("state=client+a%26b"));
}

// Test case: building from a config without a gcal section fails with a
// config error before any environment lookups.
#[test]
fn test_from_config_requires_gcal_section() {
    let result = OAuthClient::from_config(&bare_config());

    assert!(matches!(result, Err(GcalError::Config(_))));
}

// Test case: refreshing without a stored refresh token short-circuits to
// AuthExpired without any network traffic.
#[tokio::test]
async fn test_refresh_without_refresh_token_is_auth_expired() {
    let client = OAuthClient::new("id", "secret", "http://localhost/cb");

    let result = client
        .refresh_access_token(&HTTP_CLIENT, &stored_without_refresh())
        .await;

    assert!(matches!(result, Err(GcalError::AuthExpired)));
}
