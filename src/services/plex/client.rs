use reqwest::Client;
use tokio::sync::OnceCell;
use url::Url;

use crate::error::ApiError;
use crate::plex_rs::playlist::{
    PlexPlaylist, add_tracks_to_playlist, create_music_playlist, get_machine_identifier,
    get_playlist_by_title,
};
use crate::plex_rs::search::{PlexMetadataItem, search};
use crate::ports::plex::PlexClient;

pub struct PlexHttpAdapter {
    client: Client,
    server_url: Url,
    token: String,
    machine_identifier: OnceCell<String>,
}

impl PlexHttpAdapter {
    pub fn new(client: Client, server_url: Url, token: String) -> Self {
        Self {
            client,
            server_url,
            token,
            machine_identifier: OnceCell::new(),
        }
    }

    /// The server's machine identifier is needed to build item uris; it never changes,
    /// so it is fetched on first use only.
    async fn machine_identifier(&self) -> Result<&str, ApiError> {
        let id = self
            .machine_identifier
            .get_or_try_init(|| async {
                let id =
                    get_machine_identifier(&self.client, &self.server_url, &self.token).await?;
                log::debug!("Using machine identifier: {}", id);
                Ok::<_, ApiError>(id)
            })
            .await?;
        Ok(id.as_str())
    }
}

#[async_trait::async_trait]
impl PlexClient for PlexHttpAdapter {
    async fn search(&self, query: &str) -> Result<Vec<PlexMetadataItem>, ApiError> {
        search(&self.client, &self.server_url, &self.token, query).await
    }

    async fn playlist_by_title(&self, title: &str) -> Result<PlexPlaylist, ApiError> {
        get_playlist_by_title(&self.client, &self.server_url, &self.token, title).await
    }

    async fn create_playlist(
        &self,
        title: &str,
        rating_keys: &[String],
    ) -> Result<PlexPlaylist, ApiError> {
        let machine_identifier = self.machine_identifier().await?;
        create_music_playlist(
            &self.client,
            &self.server_url,
            &self.token,
            machine_identifier,
            title,
            rating_keys,
        )
        .await
    }

    async fn add_to_playlist(
        &self,
        playlist_id: &str,
        rating_keys: &[String],
    ) -> Result<(), ApiError> {
        let machine_identifier = self.machine_identifier().await?;
        add_tracks_to_playlist(
            &self.client,
            &self.server_url,
            &self.token,
            playlist_id,
            machine_identifier,
            rating_keys,
        )
        .await
    }
}
