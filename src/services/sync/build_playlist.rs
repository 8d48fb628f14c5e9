use crate::error::ApiError;
use crate::plex_rs::search::PlexMetadataItem;
use crate::ports::plex::PlexClient;
use crate::ports::spotify::{SpotifyApiPlaylist, SpotifyApiTrack, SpotifyClient};
use crate::services::matching::MatchPolicy;
use crate::services::retry::retry_once;
use crate::services::sync::catalog::playlist_tracks;

/// What happened to one Spotify track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackResolution {
    Matched(PlexMetadataItem),
    /// Every title variant and artist was tried without a surviving candidate.
    NoMatch,
    /// Plex search failed twice in a row; the track was abandoned.
    SearchFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaylistAction {
    Created,
    Updated,
    /// No track resolved, Plex was left alone.
    NothingResolved,
}

/// Result of mirroring one Spotify playlist into Plex
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistSyncResult {
    pub playlist_name: String,
    pub total_tracks: usize,
    pub tracks_resolved: usize,
    /// `"<title> by <artist>"` for every track that was not resolved.
    pub skipped_tracks: Vec<String>,
    pub action: PlaylistAction,
}

impl PlaylistSyncResult {
    pub fn tracks_skipped(&self) -> usize {
        self.skipped_tracks.len()
    }
}

/// Find the Plex track for a Spotify track.
///
/// Variants are tried in order; for each variant Plex is searched once and the results are
/// filtered against every listed artist in turn. The first hit wins.
pub async fn resolve_track<P: PlexClient + ?Sized>(
    plex: &P,
    policy: &MatchPolicy,
    track: &SpotifyApiTrack,
) -> TrackResolution {
    for variant in policy.title_variants(&track.name) {
        let candidates = match retry_once("Plex search", || plex.search(&variant)).await {
            Ok(candidates) => candidates,
            Err(e) => {
                log::info!("Issue making plex request for '{}': {}", variant, e);
                return TrackResolution::SearchFailed;
            }
        };

        for artist in &track.artists {
            if let Some(found) = policy
                .filter_candidates(&candidates, &variant, artist)
                .into_iter()
                .next()
            {
                return TrackResolution::Matched(found.clone());
            }
        }
    }

    TrackResolution::NoMatch
}

fn first_artist(track: &SpotifyApiTrack) -> &str {
    track
        .artists
        .first()
        .map(String::as_str)
        .unwrap_or("unknown artist")
}

/// Resolve every track of `playlist` and append the matches to the Plex playlist
/// `"<owner> - <name>"`, creating it when Plex has no playlist by that name.
///
/// Appending is additive: tracks already in the Plex playlist are added again.
///
/// # Errors
/// Returns an error when the Spotify tracks cannot be listed, or when the Plex playlist
/// cannot be looked up, created or appended to. Unmatched tracks are not errors.
pub async fn build_playlist<S, P>(
    spotify: &S,
    plex: &P,
    policy: &MatchPolicy,
    playlist: &SpotifyApiPlaylist,
) -> Result<PlaylistSyncResult, ApiError>
where
    S: SpotifyClient + ?Sized,
    P: PlexClient + ?Sized,
{
    let playlist_name = playlist.local_playlist_name();
    log::info!("Starting playlist {}", playlist_name);

    let tracks = playlist_tracks(spotify, playlist).await?;

    let mut matched = Vec::new();
    let mut skipped_tracks = Vec::new();
    for track in &tracks {
        let description = format!("{} by {}", track.name, first_artist(track));
        log::info!("Searching Plex for: {}", description);
        match resolve_track(plex, policy, track).await {
            TrackResolution::Matched(item) => {
                log::info!("Found Plex Song: {}", description);
                matched.push(item.rating_key);
            }
            TrackResolution::NoMatch => {
                log::info!("Couldn't find Spotify Song: {}", description);
                skipped_tracks.push(description);
            }
            TrackResolution::SearchFailed => skipped_tracks.push(description),
        }
    }

    let action = if matched.is_empty() {
        log::info!("No tracks of {} found on Plex", playlist_name);
        PlaylistAction::NothingResolved
    } else {
        let lookup = retry_once("Plex lookup", || plex.playlist_by_title(&playlist_name)).await;
        match lookup {
            Ok(existing) => {
                log::info!("Updating playlist {}", playlist_name);
                plex.add_to_playlist(&existing.rating_key, &matched).await?;
                PlaylistAction::Updated
            }
            Err(e) if e.is_not_found() => {
                log::info!("Creating playlist {}", playlist_name);
                plex.create_playlist(&playlist_name, &matched).await?;
                PlaylistAction::Created
            }
            Err(e) => return Err(e),
        }
    };

    let result = PlaylistSyncResult {
        playlist_name,
        total_tracks: tracks.len(),
        tracks_resolved: matched.len(),
        skipped_tracks,
        action,
    };

    log::info!(
        "Finished playlist {}: {} of {} tracks resolved, {} skipped",
        result.playlist_name,
        result.tracks_resolved,
        result.total_tracks,
        result.tracks_skipped()
    );
    if !result.skipped_tracks.is_empty() {
        log::info!(
            "Skipped in {}: {}",
            result.playlist_name,
            result.skipped_tracks.join(", ")
        );
    }

    Ok(result)
}
