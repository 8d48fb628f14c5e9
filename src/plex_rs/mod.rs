use serde::Deserialize;

pub mod playlist;
pub mod search;

/// Docs:
/// https://developer.plex.tv/pms/#section/API-Info/Authenticating-with-Plex
pub const PLEX_TOKEN_HEADER: &str = "X-Plex-Token";

/* ---------- Core response envelope ---------- */

/// A minimal Plex JSON envelope for list style endpoints that return `MediaContainer.Metadata`.
///
/// Notes
/// - Plex responses are wrapped in a top level `MediaContainer`.
/// - `metadata` defaults to an empty vec when missing (Plex omits the key for empty results).
#[derive(Debug, Clone, Deserialize)]
pub struct PlexResponse<T> {
    #[serde(rename = "MediaContainer")]
    pub media_container: PlexMediaContainer<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlexMediaContainer<T> {
    #[serde(rename = "Metadata", default = "Vec::new")]
    pub metadata: Vec<T>,
}
