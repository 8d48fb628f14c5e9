use crate::error::ApiError;
use crate::ports::spotify::{SpotifyApiPlaylist, SpotifyApiTrack, SpotifyClient};
use crate::services::retry::retry_once;
use crate::spotify_rs::uri::PlaylistUriDescriptor;

/// Playlists owned by `user_id`. Followed playlists that show up on the profile are left out.
pub async fn owned_playlists<S: SpotifyClient + ?Sized>(
    spotify: &S,
    user_id: &str,
) -> Result<Vec<SpotifyApiPlaylist>, ApiError> {
    let playlists = retry_once("Spotify playlists", || spotify.user_playlists(user_id)).await?;
    let total = playlists.len();

    let owned: Vec<_> = playlists
        .into_iter()
        .filter(|playlist| playlist.owner_id == user_id)
        .collect();

    log::debug!(
        "User {} lists {} playlists, owns {}",
        user_id,
        total,
        owned.len()
    );
    Ok(owned)
}

/// Expand a descriptor into the playlists it names.
pub async fn playlists_for_descriptor<S: SpotifyClient + ?Sized>(
    spotify: &S,
    descriptor: &PlaylistUriDescriptor,
) -> Result<Vec<SpotifyApiPlaylist>, ApiError> {
    match &descriptor.playlist_id {
        None => {
            log::info!("Getting playlists for {}", descriptor.user_id);
            owned_playlists(spotify, &descriptor.user_id).await
        }
        Some(playlist_id) => {
            log::info!(
                "Getting playlist {} from user {}",
                playlist_id,
                descriptor.user_id
            );
            let playlist =
                retry_once("Spotify playlist fetch", || spotify.playlist(playlist_id)).await?;
            Ok(vec![playlist])
        }
    }
}

/// All tracks of a playlist in catalog order.
pub async fn playlist_tracks<S: SpotifyClient + ?Sized>(
    spotify: &S,
    playlist: &SpotifyApiPlaylist,
) -> Result<Vec<SpotifyApiTrack>, ApiError> {
    retry_once("Spotify tracks", || spotify.playlist_tracks(&playlist.id)).await
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::ports::spotify::MockSpotifyClient;
    use crate::test_utils::spotify_playlist;

    #[tokio::test]
    async fn test_owned_playlists_filters_other_owners() {
        let mut spotify = MockSpotifyClient::new();
        spotify
            .expect_user_playlists()
            .with(eq("alice"))
            .times(1)
            .returning(|_| {
                Ok(vec![
                    spotify_playlist("pl1", "Mine", "alice"),
                    spotify_playlist("pl2", "Followed", "bob"),
                    spotify_playlist("pl3", "Also Mine", "alice"),
                ])
            });

        let playlists = owned_playlists(&spotify, "alice").await.unwrap();
        let ids: Vec<_> = playlists.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["pl1", "pl3"]);
    }

    #[tokio::test]
    async fn test_descriptor_with_playlist_fetches_only_that_playlist() {
        let mut spotify = MockSpotifyClient::new();
        spotify.expect_user_playlists().never();
        spotify
            .expect_playlist()
            .with(eq("xyz"))
            .times(1)
            .returning(|_| Ok(spotify_playlist("xyz", "Chosen", "bob")));

        let descriptor = PlaylistUriDescriptor {
            user_id: "alice".into(),
            playlist_id: Some("xyz".into()),
        };
        let playlists = playlists_for_descriptor(&spotify, &descriptor)
            .await
            .unwrap();

        assert_eq!(playlists.len(), 1);
        assert_eq!(playlists[0].id, "xyz");
    }

    #[tokio::test]
    async fn test_playlist_tracks_retries_transient_failure() {
        let mut spotify = MockSpotifyClient::new();
        let mut seq = mockall::Sequence::new();
        spotify
            .expect_playlist_tracks()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| {
                Err(ApiError::Status {
                    status: 503,
                    body: "unavailable".into(),
                })
            });
        spotify
            .expect_playlist_tracks()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| {
                Ok(vec![SpotifyApiTrack {
                    name: "Strobe".into(),
                    artists: vec!["deadmau5".into()],
                }])
            });

        let playlist = spotify_playlist("pl1", "Mine", "alice");
        let tracks = playlist_tracks(&spotify, &playlist).await.unwrap();
        assert_eq!(tracks.len(), 1);
    }
}
