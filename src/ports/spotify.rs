use crate::error::ApiError;

/// Decoupled representation of a Spotify playlist from the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpotifyApiPlaylist {
    pub id: String,
    pub name: String,
    pub owner_id: String,
    pub owner_display_name: Option<String>,
}

impl SpotifyApiPlaylist {
    /// Name of the Plex playlist this one is mirrored into: `"<owner> - <name>"`,
    /// preferring the owner's display name over their id.
    pub fn local_playlist_name(&self) -> String {
        let owner = self
            .owner_display_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.owner_id);
        format!("{} - {}", owner, self.name)
    }
}

/// Decoupled representation of a Spotify track from the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpotifyApiTrack {
    pub name: String,
    pub artists: Vec<String>,
}

/// Port trait wrapping the Spotify API capabilities used by business logic.
///
/// Implementations live in `services::spotify::client` (production) or test mocks.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait SpotifyClient: Send + Sync {
    /// Every playlist on the user's profile, across all pages. Not filtered by owner.
    async fn user_playlists(&self, user_id: &str) -> Result<Vec<SpotifyApiPlaylist>, ApiError>;
    async fn playlist(&self, playlist_id: &str) -> Result<SpotifyApiPlaylist, ApiError>;
    async fn playlist_tracks(&self, playlist_id: &str) -> Result<Vec<SpotifyApiTrack>, ApiError>;
}
