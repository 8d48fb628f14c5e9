use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::error::{ApiError, check_status};
use crate::plex_rs::{PLEX_TOKEN_HEADER, PlexResponse};

/* ---------- Identity (machineIdentifier) ---------- */

/// `/identity` puts the identifier directly on the `MediaContainer`.
#[derive(Debug, Clone, Deserialize)]
pub struct PlexIdentityResponse {
    #[serde(rename = "MediaContainer")]
    pub media_container: PlexIdentity,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlexIdentity {
    #[serde(rename = "machineIdentifier")]
    pub machine_identifier: String,
}

pub async fn get_machine_identifier(
    client: &Client,
    base_url: &Url,
    user_token: &str,
) -> Result<String, ApiError> {
    let url = base_url.join("identity")?;

    let response = client
        .get(url)
        .header("Accept", "application/json")
        .header(PLEX_TOKEN_HEADER, user_token)
        .send()
        .await?;

    let res = check_status(response, "server identity")
        .await?
        .json::<PlexIdentityResponse>()
        .await?;

    Ok(res.media_container.machine_identifier)
}

/* ---------- Playlists ---------- */

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlexPlaylist {
    #[serde(rename = "ratingKey")]
    pub rating_key: String,

    pub title: String,

    #[serde(rename = "playlistType")]
    pub playlist_type: String,

    #[serde(default)]
    pub smart: Option<bool>,

    #[serde(rename = "leafCount", default)]
    pub leaf_count: Option<u32>,
}

pub async fn get_playlists(
    client: &Client,
    base_url: &Url,
    user_token: &str,
) -> Result<Vec<PlexPlaylist>, ApiError> {
    let url = base_url.join("playlists?playlistType=audio")?;

    let response = client
        .get(url)
        .header("Accept", "application/json")
        .header(PLEX_TOKEN_HEADER, user_token)
        .send()
        .await?;

    let res = check_status(response, "playlists")
        .await?
        .json::<PlexResponse<PlexPlaylist>>()
        .await?;

    Ok(res.media_container.metadata)
}

/// Find the audio playlist titled exactly `title`.
///
/// # Errors
/// - `ApiError::NotFound` when no playlist has that title
pub async fn get_playlist_by_title(
    client: &Client,
    base_url: &Url,
    user_token: &str,
    title: &str,
) -> Result<PlexPlaylist, ApiError> {
    let playlists = get_playlists(client, base_url, user_token).await?;
    find_by_title(playlists, title)
}

fn find_by_title(playlists: Vec<PlexPlaylist>, title: &str) -> Result<PlexPlaylist, ApiError> {
    playlists
        .into_iter()
        .filter(is_music_playlist)
        .find(|p| p.title == title)
        .ok_or_else(|| ApiError::NotFound(format!("playlist '{}'", title)))
}

/* ---------- Create playlist ---------- */

/// Builds the library uri Plex expects when adding items, e.g.
/// `server://abc/com.plexapp.plugins.library/library/metadata/1,2,3`.
pub fn library_items_uri(machine_identifier: &str, rating_keys: &[String]) -> String {
    format!(
        "server://{}/com.plexapp.plugins.library/library/metadata/{}",
        machine_identifier,
        rating_keys.join(",")
    )
}

pub async fn create_music_playlist(
    client: &Client,
    base_url: &Url,
    user_token: &str,
    machine_identifier: &str,
    title: &str,
    rating_keys: &[String],
) -> Result<PlexPlaylist, ApiError> {
    let mut url = base_url.join("playlists")?;
    url.query_pairs_mut()
        .append_pair("title", title)
        .append_pair("type", "audio")
        .append_pair("smart", "0")
        .append_pair("uri", &library_items_uri(machine_identifier, rating_keys));

    let response = client
        .post(url)
        .header("Accept", "application/json")
        .header(PLEX_TOKEN_HEADER, user_token)
        .send()
        .await?;

    let res = check_status(response, &format!("playlist '{}'", title))
        .await?
        .json::<PlexResponse<PlexPlaylist>>()
        .await?;

    res.media_container
        .metadata
        .into_iter()
        .next()
        .ok_or_else(|| ApiError::NotFound(format!("created playlist '{}'", title)))
}

/* ---------- Add ---------- */

pub async fn add_tracks_to_playlist(
    client: &Client,
    base_url: &Url,
    user_token: &str,
    playlist_id: &str,
    machine_identifier: &str,
    rating_keys: &[String],
) -> Result<(), ApiError> {
    let mut url = base_url.join(&format!("playlists/{}/items", playlist_id))?;
    url.query_pairs_mut()
        .append_pair("uri", &library_items_uri(machine_identifier, rating_keys));

    let response = client
        .put(url)
        .header("Accept", "application/json")
        .header(PLEX_TOKEN_HEADER, user_token)
        .send()
        .await?;

    check_status(response, &format!("playlist {}", playlist_id)).await?;

    Ok(())
}

/* ---------- Optional helpers ---------- */

pub fn is_music_playlist(p: &PlexPlaylist) -> bool {
    p.playlist_type == "audio"
}
