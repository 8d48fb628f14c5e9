use crate::error::ApiError;
use crate::plex_rs::playlist::PlexPlaylist;
use crate::plex_rs::search::PlexMetadataItem;

/// Port trait wrapping the Plex API capabilities used by business logic.
///
/// Implementations live in `services::plex::client` (production) or test mocks.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PlexClient: Send + Sync {
    /// Server wide search. Results may include albums, artists and other non-track media.
    async fn search(&self, query: &str) -> Result<Vec<PlexMetadataItem>, ApiError>;

    /// Returns `ApiError::NotFound` when no audio playlist carries exactly this title.
    async fn playlist_by_title(&self, title: &str) -> Result<PlexPlaylist, ApiError>;

    async fn create_playlist(
        &self,
        title: &str,
        rating_keys: &[String],
    ) -> Result<PlexPlaylist, ApiError>;

    async fn add_to_playlist(
        &self,
        playlist_id: &str,
        rating_keys: &[String],
    ) -> Result<(), ApiError>;
}
