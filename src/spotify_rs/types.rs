use serde::{Deserialize, Serialize};

/// Spotify OAuth token response (client credentials flow has no refresh token)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyTokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Public profile of a playlist owner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyUser {
    pub id: String,
    pub display_name: Option<String>,
}

/// Spotify playlist from API (simplified and full objects share these fields)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyPlaylist {
    pub id: String,
    pub name: String,
    pub owner: SpotifyUser,
}

/// Spotify track from API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyTrack {
    pub name: String,
    /// Episodes come back without artists.
    #[serde(default)]
    pub artists: Vec<SpotifyArtist>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyArtist {
    pub name: String,
}

/// An entry of a playlist's track listing. `track` is null for
/// removed or unavailable items.
#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyPlaylistTrackObject {
    pub track: Option<SpotifyTrack>,
}

/// One page of a paginated listing. `next` is the full url of the following
/// page and is null on the last one.
#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyPage<T> {
    pub items: Vec<T>,
    pub next: Option<String>,
}
