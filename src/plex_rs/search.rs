use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::error::{ApiError, check_status};
use crate::plex_rs::PLEX_TOKEN_HEADER;

/// How many results per hub the server is asked for.
pub const SEARCH_LIMIT: u32 = 50;

/* ---------- Search results ---------- */

/// One item of a hub search. Hubs mix tracks with albums, artists and other media,
/// so `item_type` must be checked before treating the item as a track.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlexMetadataItem {
    #[serde(rename = "ratingKey")]
    pub rating_key: String,

    pub title: String,

    #[serde(rename = "type")]
    pub item_type: String,

    /// Album artist for tracks.
    #[serde(rename = "grandparentTitle", default)]
    pub artist: Option<String>,

    /// Track artist, set when it differs from the album artist.
    #[serde(rename = "originalTitle", default)]
    pub original_title: Option<String>,

    #[serde(rename = "parentTitle", default)]
    pub album: Option<String>,
}

impl PlexMetadataItem {
    pub fn is_track(&self) -> bool {
        self.item_type == "track"
    }
}

#[derive(Debug, Deserialize)]
pub struct PlexHubSearchResponse {
    #[serde(rename = "MediaContainer")]
    pub media_container: PlexHubContainer,
}

#[derive(Debug, Deserialize)]
pub struct PlexHubContainer {
    #[serde(rename = "Hub", default)]
    pub hubs: Vec<PlexHub>,
}

#[derive(Debug, Deserialize)]
pub struct PlexHub {
    #[serde(rename = "Metadata", default)]
    pub metadata: Vec<PlexMetadataItem>,
}

impl PlexHubSearchResponse {
    /// Flattens every hub into one list, keeping the server's order.
    pub fn into_items(self) -> Vec<PlexMetadataItem> {
        self.media_container
            .hubs
            .into_iter()
            .flat_map(|hub| hub.metadata)
            .collect()
    }
}

/// Search the whole server for `query`.
///
/// Endpoint
/// - `GET /hubs/search?query={query}&limit={limit}`
///
/// Returns
/// - Every item of every hub, tracks and non-tracks alike.
pub async fn search(
    client: &Client,
    base_url: &Url,
    user_token: &str,
    query: &str,
) -> Result<Vec<PlexMetadataItem>, ApiError> {
    let mut url = base_url.join("hubs/search")?;
    url.query_pairs_mut()
        .append_pair("query", query)
        .append_pair("limit", &SEARCH_LIMIT.to_string());

    let response = client
        .get(url)
        .header("Accept", "application/json")
        .header(PLEX_TOKEN_HEADER, user_token)
        .send()
        .await?;

    let res = check_status(response, &format!("search results for '{}'", query))
        .await?
        .json::<PlexHubSearchResponse>()
        .await?;

    Ok(res.into_items())
}
