use std::future::Future;

use serde::de::DeserializeOwned;

use crate::error::{ApiError, check_status};
use crate::spotify_rs::auth::TokenProvider;
use crate::spotify_rs::types::{
    SpotifyPage, SpotifyPlaylist, SpotifyPlaylistTrackObject, SpotifyTrack,
};

const SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";

/// Follow `next` cursors starting at `first_url` until a page comes back without one,
/// accumulating every item in page order.
pub async fn collect_pages<T, F, Fut>(first_url: String, mut fetch: F) -> Result<Vec<T>, ApiError>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<SpotifyPage<T>, ApiError>>,
{
    let mut all_items = Vec::new();
    let mut next_url = Some(first_url);

    while let Some(url) = next_url {
        let page = fetch(url).await?;
        all_items.extend(page.items);
        next_url = page.next;
    }

    Ok(all_items)
}

/// Spotify Web API client
pub struct SpotifyClient {
    tokens: TokenProvider,
    client: reqwest::Client,
}

impl SpotifyClient {
    pub fn new(client: reqwest::Client, tokens: TokenProvider) -> Self {
        Self { tokens, client }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, what: &str) -> Result<T, ApiError> {
        let token = self.tokens.access_token().await?;
        let response = self.client.get(url).bearer_auth(token).send().await?;

        Ok(check_status(response, what).await?.json::<T>().await?)
    }

    /// Get every playlist listed on a user's profile, including ones they merely follow
    pub async fn get_user_playlists(
        &self,
        user_id: &str,
    ) -> Result<Vec<SpotifyPlaylist>, ApiError> {
        let first_url = format!(
            "{}/users/{}/playlists?limit=50",
            SPOTIFY_API_URL,
            urlencoding::encode(user_id)
        );
        let what = format!("playlists of user {}", user_id);

        collect_pages(first_url, |url| {
            let what = what.clone();
            async move {
                self.get_json::<SpotifyPage<SpotifyPlaylist>>(&url, &what)
                    .await
            }
        })
        .await
    }

    /// Get a single playlist by id
    pub async fn get_playlist(&self, playlist_id: &str) -> Result<SpotifyPlaylist, ApiError> {
        let url = format!(
            "{}/playlists/{}?fields=id,name,owner(id,display_name)",
            SPOTIFY_API_URL,
            urlencoding::encode(playlist_id)
        );
        let what = format!("playlist {}", playlist_id);
        self.get_json(&url, &what).await
    }

    /// Get all tracks in a playlist, dropping entries whose track is no longer available
    pub async fn get_playlist_tracks(
        &self,
        playlist_id: &str,
    ) -> Result<Vec<SpotifyTrack>, ApiError> {
        let first_url = format!(
            "{}/playlists/{}/tracks?limit=100",
            SPOTIFY_API_URL,
            urlencoding::encode(playlist_id)
        );
        let what = format!("tracks of playlist {}", playlist_id);

        let entries = collect_pages(first_url, |url| {
            let what = what.clone();
            async move {
                self.get_json::<SpotifyPage<SpotifyPlaylistTrackObject>>(&url, &what)
                    .await
            }
        })
        .await?;

        Ok(entries.into_iter().filter_map(|e| e.track).collect())
    }
}
