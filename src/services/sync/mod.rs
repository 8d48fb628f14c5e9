pub mod build_playlist;
pub mod catalog;

use crate::ports::plex::PlexClient;
use crate::ports::spotify::{SpotifyApiPlaylist, SpotifyClient};
use crate::services::matching::MatchPolicy;
use crate::spotify_rs::uri::PlaylistUriDescriptor;

use build_playlist::{PlaylistSyncResult, build_playlist};
use catalog::playlists_for_descriptor;

/// Totals for one pass over every configured descriptor
#[derive(Debug, Default)]
pub struct SyncPassSummary {
    pub playlists: Vec<PlaylistSyncResult>,
    /// Descriptors whose playlists could not be listed.
    pub failed_descriptors: usize,
    /// Playlists that were listed but could not be written to Plex.
    pub failed_playlists: usize,
}

impl SyncPassSummary {
    pub fn tracks_resolved(&self) -> usize {
        self.playlists.iter().map(|p| p.tracks_resolved).sum()
    }

    pub fn tracks_skipped(&self) -> usize {
        self.playlists.iter().map(|p| p.tracks_skipped()).sum()
    }
}

pub struct SyncService<S: SpotifyClient, P: PlexClient> {
    spotify: S,
    plex: P,
    policy: MatchPolicy,
}

impl<S: SpotifyClient, P: PlexClient> SyncService<S, P> {
    pub fn new(spotify: S, plex: P, policy: MatchPolicy) -> Self {
        Self {
            spotify,
            plex,
            policy,
        }
    }

    /// Expand every descriptor, then mirror each resulting playlist, strictly in order.
    ///
    /// A playlist reachable through two descriptors is synced twice. Failures are logged and
    /// skipped at descriptor or playlist level; the pass itself never fails.
    pub async fn run_pass(&self, descriptors: &[PlaylistUriDescriptor]) -> SyncPassSummary {
        log::info!("Starting a Sync Operation");
        let mut summary = SyncPassSummary::default();

        let mut playlists: Vec<SpotifyApiPlaylist> = Vec::new();
        for descriptor in descriptors {
            match playlists_for_descriptor(&self.spotify, descriptor).await {
                Ok(found) => playlists.extend(found),
                Err(e) => {
                    log::error!("Failed to get playlists for {}: {}", descriptor, e);
                    summary.failed_descriptors += 1;
                }
            }
        }

        for playlist in &playlists {
            match build_playlist(&self.spotify, &self.plex, &self.policy, playlist).await {
                Ok(result) => summary.playlists.push(result),
                Err(e) => {
                    log::error!(
                        "Failed to sync playlist {}: {}",
                        playlist.local_playlist_name(),
                        e
                    );
                    summary.failed_playlists += 1;
                }
            }
        }

        log::info!(
            "Finished a Sync Operation: {} playlists, {} tracks resolved, {} skipped, {} failures",
            summary.playlists.len(),
            summary.tracks_resolved(),
            summary.tracks_skipped(),
            summary.failed_descriptors + summary.failed_playlists
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::error::ApiError;
    use crate::ports::spotify::MockSpotifyClient;
    use crate::services::sync::build_playlist::PlaylistAction;
    use crate::test_utils::{InMemoryPlex, plex_track, spotify_playlist, spotify_track};

    fn descriptor(user: &str, playlist: Option<&str>) -> PlaylistUriDescriptor {
        PlaylistUriDescriptor {
            user_id: user.into(),
            playlist_id: playlist.map(str::to_string),
        }
    }

    fn library() -> InMemoryPlex {
        InMemoryPlex::with_library(vec![
            plex_track("1", "Strobe", "deadmau5"),
            plex_track("2", "Don t Stop Believin", "Journey"),
        ])
    }

    #[tokio::test]
    async fn test_pass_builds_playlist_with_resolvable_tracks_only() {
        let mut spotify = MockSpotifyClient::new();
        spotify
            .expect_user_playlists()
            .with(eq("alice"))
            .returning(|_| Ok(vec![spotify_playlist("pl1", "Chill", "alice")]));
        spotify.expect_playlist_tracks().returning(|_| {
            Ok(vec![
                spotify_track("Don't Stop Believin'", &["Journey"]),
                spotify_track("Not In Library", &["Nobody"]),
            ])
        });

        let plex = library();
        let service = SyncService::new(spotify, plex.clone(), MatchPolicy::default());
        let summary = service.run_pass(&[descriptor("alice", None)]).await;

        assert_eq!(summary.playlists.len(), 1);
        assert_eq!(summary.playlists[0].action, PlaylistAction::Created);
        assert_eq!(summary.tracks_skipped(), 1);
        assert_eq!(
            summary.playlists[0].skipped_tracks,
            vec!["Not In Library by Nobody"]
        );
        assert_eq!(
            plex.playlist_items("alice - Chill"),
            Some(vec!["2".to_string()])
        );
    }

    #[tokio::test]
    async fn test_pass_processes_descriptors_in_order_without_dedup() {
        let mut spotify = MockSpotifyClient::new();
        spotify
            .expect_user_playlists()
            .returning(|_| Ok(vec![spotify_playlist("pl1", "Chill", "alice")]));
        spotify
            .expect_playlist()
            .with(eq("pl1"))
            .returning(|_| Ok(spotify_playlist("pl1", "Chill", "alice")));
        spotify
            .expect_playlist_tracks()
            .returning(|_| Ok(vec![spotify_track("Strobe", &["deadmau5"])]));

        let plex = library();
        let service = SyncService::new(spotify, plex.clone(), MatchPolicy::default());
        let by_user = descriptor("alice", None);
        let by_id = descriptor("alice", Some("pl1"));
        let summary = service.run_pass(&[by_user, by_id]).await;

        let actions: Vec<_> = summary.playlists.iter().map(|p| p.action).collect();
        assert_eq!(actions, [PlaylistAction::Created, PlaylistAction::Updated]);
        assert_eq!(
            plex.playlist_items("alice - Chill"),
            Some(vec!["1".to_string(), "1".to_string()])
        );
    }

    #[tokio::test]
    async fn test_second_pass_appends_again() {
        let mut spotify = MockSpotifyClient::new();
        spotify
            .expect_user_playlists()
            .returning(|_| Ok(vec![spotify_playlist("pl1", "Chill", "alice")]));
        spotify
            .expect_playlist_tracks()
            .returning(|_| Ok(vec![spotify_track("Strobe", &["deadmau5"])]));

        let plex = library();
        let service = SyncService::new(spotify, plex.clone(), MatchPolicy::default());
        let descriptors = [descriptor("alice", None)];
        service.run_pass(&descriptors).await;
        service.run_pass(&descriptors).await;

        // Updates are additive, so an unchanged source duplicates entries.
        assert_eq!(
            plex.playlist_items("alice - Chill"),
            Some(vec!["1".to_string(), "1".to_string()])
        );
    }

    #[tokio::test]
    async fn test_failed_descriptor_does_not_stop_pass() {
        let mut spotify = MockSpotifyClient::new();
        spotify
            .expect_user_playlists()
            .with(eq("ghost"))
            .returning(|user| Err(ApiError::NotFound(format!("user {}", user))));
        spotify
            .expect_user_playlists()
            .with(eq("alice"))
            .returning(|_| Ok(vec![spotify_playlist("pl1", "Chill", "alice")]));
        spotify
            .expect_playlist_tracks()
            .returning(|_| Ok(vec![spotify_track("Strobe", &["deadmau5"])]));

        let plex = library();
        let service = SyncService::new(spotify, plex.clone(), MatchPolicy::default());
        let summary = service
            .run_pass(&[descriptor("ghost", None), descriptor("alice", None)])
            .await;

        assert_eq!(summary.failed_descriptors, 1);
        assert_eq!(summary.playlists.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_playlist_does_not_stop_pass() {
        let mut spotify = MockSpotifyClient::new();
        spotify.expect_user_playlists().returning(|_| {
            Ok(vec![
                spotify_playlist("broken", "Broken", "alice"),
                spotify_playlist("pl1", "Chill", "alice"),
            ])
        });
        spotify
            .expect_playlist_tracks()
            .with(eq("broken"))
            .returning(|_| {
                Err(ApiError::Status {
                    status: 403,
                    body: "forbidden".into(),
                })
            });
        spotify
            .expect_playlist_tracks()
            .with(eq("pl1"))
            .returning(|_| Ok(vec![spotify_track("Strobe", &["deadmau5"])]));

        let plex = library();
        let service = SyncService::new(spotify, plex.clone(), MatchPolicy::default());
        let summary = service.run_pass(&[descriptor("alice", None)]).await;

        assert_eq!(summary.failed_playlists, 1);
        assert_eq!(summary.playlists.len(), 1);
        assert!(plex.playlist_items("alice - Broken").is_none());
    }
}
