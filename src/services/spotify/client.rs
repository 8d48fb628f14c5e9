use crate::error::ApiError;
use crate::ports::spotify::{SpotifyApiPlaylist, SpotifyApiTrack, SpotifyClient};
use crate::spotify_rs::auth::{SpotifyApiCredentials, TokenProvider};
use crate::spotify_rs::client::SpotifyClient as SpotifyWebClient;
use crate::spotify_rs::types::{SpotifyPlaylist, SpotifyTrack};

pub struct SpotifyHttpAdapter {
    client: SpotifyWebClient,
}

impl SpotifyHttpAdapter {
    pub fn new(client: reqwest::Client, credentials: SpotifyApiCredentials) -> Self {
        let tokens = TokenProvider::new(client.clone(), credentials);
        Self {
            client: SpotifyWebClient::new(client, tokens),
        }
    }
}

fn to_api_playlist(playlist: SpotifyPlaylist) -> SpotifyApiPlaylist {
    SpotifyApiPlaylist {
        id: playlist.id,
        name: playlist.name,
        owner_id: playlist.owner.id,
        owner_display_name: playlist.owner.display_name,
    }
}

fn to_api_track(track: SpotifyTrack) -> SpotifyApiTrack {
    SpotifyApiTrack {
        name: track.name,
        artists: track.artists.into_iter().map(|a| a.name).collect(),
    }
}

#[async_trait::async_trait]
impl SpotifyClient for SpotifyHttpAdapter {
    async fn user_playlists(&self, user_id: &str) -> Result<Vec<SpotifyApiPlaylist>, ApiError> {
        let playlists = self.client.get_user_playlists(user_id).await?;
        Ok(playlists.into_iter().map(to_api_playlist).collect())
    }

    async fn playlist(&self, playlist_id: &str) -> Result<SpotifyApiPlaylist, ApiError> {
        let playlist = self.client.get_playlist(playlist_id).await?;
        Ok(to_api_playlist(playlist))
    }

    async fn playlist_tracks(&self, playlist_id: &str) -> Result<Vec<SpotifyApiTrack>, ApiError> {
        let tracks = self.client.get_playlist_tracks(playlist_id).await?;
        Ok(tracks.into_iter().map(to_api_track).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spotify_rs::types::{SpotifyArtist, SpotifyUser};

    #[test]
    fn test_to_api_playlist() {
        let playlist = to_api_playlist(SpotifyPlaylist {
            id: "pl1".into(),
            name: "Chill".into(),
            owner: SpotifyUser {
                id: "alice".into(),
                display_name: Some("Alice".into()),
            },
        });
        assert_eq!(playlist.owner_id, "alice");
        assert_eq!(playlist.local_playlist_name(), "Alice - Chill");
    }

    #[test]
    fn test_to_api_track_keeps_artist_order() {
        let track = to_api_track(SpotifyTrack {
            name: "Ghosts 'n' Stuff".into(),
            artists: vec![
                SpotifyArtist {
                    name: "deadmau5".into(),
                },
                SpotifyArtist {
                    name: "Rob Swire".into(),
                },
            ],
        });
        assert_eq!(track.artists, vec!["deadmau5", "Rob Swire"]);
    }
}
