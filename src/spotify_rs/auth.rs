use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use crate::error::{ApiError, check_status};
use crate::spotify_rs::types::SpotifyTokenResponse;

const SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Tokens are renewed this long before Spotify would reject them.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct SpotifyApiCredentials {
    client_id: String,
    client_secret: String,
}

impl SpotifyApiCredentials {
    pub fn new(client_id: String, client_secret: String) -> Self {
        Self {
            client_id,
            client_secret,
        }
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }
}

/// Exchange the app credentials for an access token
/// https://developer.spotify.com/documentation/web-api/tutorials/client-credentials-flow
pub async fn request_client_credentials_token(
    client: &reqwest::Client,
    credentials: &SpotifyApiCredentials,
) -> Result<SpotifyTokenResponse, ApiError> {
    let mut params = HashMap::new();
    params.insert("grant_type", "client_credentials");

    let response = client
        .post(SPOTIFY_TOKEN_URL)
        .form(&params)
        .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
        .send()
        .await?;

    // Spotify answers 400 invalid_client for bad credentials
    let response = match check_status(response, "spotify token").await {
        Err(ApiError::Status { status: 400, body }) => {
            return Err(ApiError::Unauthorized { reason: body });
        }
        other => other?,
    };

    Ok(response.json::<SpotifyTokenResponse>().await?)
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

impl CachedToken {
    fn from_response(response: SpotifyTokenResponse, now: Instant) -> Self {
        let lifetime = Duration::from_secs(response.expires_in).saturating_sub(EXPIRY_MARGIN);
        Self {
            access_token: response.access_token,
            expires_at: now + lifetime,
        }
    }

    fn is_fresh(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Hands out a valid access token, requesting a new one when the cached one is about to expire.
pub struct TokenProvider {
    client: reqwest::Client,
    credentials: SpotifyApiCredentials,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenProvider {
    pub fn new(client: reqwest::Client, credentials: SpotifyApiCredentials) -> Self {
        Self {
            client,
            credentials,
            cached: Mutex::new(None),
        }
    }

    pub async fn access_token(&self) -> Result<String, ApiError> {
        let mut cached = self.cached.lock().await;
        let now = Instant::now();

        if let Some(token) = cached.as_ref()
            && token.is_fresh(now)
        {
            return Ok(token.access_token.clone());
        }

        log::debug!(
            "Requesting spotify access token for client {}",
            self.credentials.client_id()
        );
        let response = request_client_credentials_token(&self.client, &self.credentials).await?;
        let token = CachedToken::from_response(response, now);
        let access_token = token.access_token.clone();
        *cached = Some(token);

        Ok(access_token)
    }
}
