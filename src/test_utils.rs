use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use crate::error::ApiError;
use crate::plex_rs::playlist::PlexPlaylist;
use crate::plex_rs::search::PlexMetadataItem;
use crate::ports::plex::PlexClient;
use crate::ports::spotify::{SpotifyApiPlaylist, SpotifyApiTrack};

pub fn plex_track(rating_key: &str, title: &str, artist: &str) -> PlexMetadataItem {
    PlexMetadataItem {
        rating_key: rating_key.into(),
        title: title.into(),
        item_type: "track".into(),
        artist: Some(artist.into()),
        original_title: None,
        album: None,
    }
}

pub fn spotify_playlist(id: &str, name: &str, owner_id: &str) -> SpotifyApiPlaylist {
    SpotifyApiPlaylist {
        id: id.into(),
        name: name.into(),
        owner_id: owner_id.into(),
        owner_display_name: None,
    }
}

pub fn spotify_track(name: &str, artists: &[&str]) -> SpotifyApiTrack {
    SpotifyApiTrack {
        name: name.into(),
        artists: artists.iter().map(|a| a.to_string()).collect(),
    }
}

#[derive(Default)]
struct InMemoryPlexState {
    library: Vec<PlexMetadataItem>,
    /// title -> (rating key, item rating keys)
    playlists: BTreeMap<String, (String, Vec<String>)>,
}

/// A Plex server kept in memory. Search returns the whole library and leaves the filtering
/// to the matcher; playlists behave like the real append-only endpoints.
#[derive(Clone, Default)]
pub struct InMemoryPlex {
    state: Arc<Mutex<InMemoryPlexState>>,
}

impl InMemoryPlex {
    pub fn with_library(library: Vec<PlexMetadataItem>) -> Self {
        let plex = Self::default();
        plex.state.lock().unwrap().library = library;
        plex
    }

    pub fn playlist_items(&self, title: &str) -> Option<Vec<String>> {
        self.state
            .lock()
            .unwrap()
            .playlists
            .get(title)
            .map(|(_, items)| items.clone())
    }
}

fn audio_playlist(rating_key: &str, title: &str, items: usize) -> PlexPlaylist {
    PlexPlaylist {
        rating_key: rating_key.into(),
        title: title.into(),
        playlist_type: "audio".into(),
        smart: Some(false),
        leaf_count: Some(items as u32),
    }
}

#[async_trait::async_trait]
impl PlexClient for InMemoryPlex {
    async fn search(&self, _query: &str) -> Result<Vec<PlexMetadataItem>, ApiError> {
        Ok(self.state.lock().unwrap().library.clone())
    }

    async fn playlist_by_title(&self, title: &str) -> Result<PlexPlaylist, ApiError> {
        let state = self.state.lock().unwrap();
        state
            .playlists
            .get(title)
            .map(|(key, items)| audio_playlist(key, title, items.len()))
            .ok_or_else(|| ApiError::NotFound(format!("playlist '{}'", title)))
    }

    async fn create_playlist(
        &self,
        title: &str,
        rating_keys: &[String],
    ) -> Result<PlexPlaylist, ApiError> {
        let mut state = self.state.lock().unwrap();
        let key = format!("pl-{}", state.playlists.len() + 1);
        state
            .playlists
            .insert(title.to_string(), (key.clone(), rating_keys.to_vec()));
        Ok(audio_playlist(&key, title, rating_keys.len()))
    }

    async fn add_to_playlist(
        &self,
        playlist_id: &str,
        rating_keys: &[String],
    ) -> Result<(), ApiError> {
        let mut state = self.state.lock().unwrap();
        let (_, items) = state
            .playlists
            .values_mut()
            .find(|(key, _)| key == playlist_id)
            .ok_or_else(|| ApiError::NotFound(format!("playlist {}", playlist_id)))?;
        items.extend_from_slice(rating_keys);
        Ok(())
    }
}
