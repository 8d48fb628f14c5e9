use std::collections::BTreeMap;
use std::fmt;

const SCHEME: &str = "spotify:";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogUriError {
    #[error("Catalog uri '{uri}' has a key without a value: '{key}'")]
    DanglingKey { uri: String, key: String },
    #[error("Catalog uri '{0}' does not name a user")]
    MissingUser(String),
}

/// Split a catalog uri such as `spotify:user:abc:playlist:xyz` into its key/value pairs.
///
/// The leading `spotify:` is optional. Later pairs overwrite earlier ones with the same key.
pub fn parse_catalog_uri(uri: &str) -> Result<BTreeMap<String, String>, CatalogUriError> {
    let trimmed = uri.trim();
    let rest = trimmed.strip_prefix(SCHEME).unwrap_or(trimmed);

    let mut parts = BTreeMap::new();
    let mut segments = rest.split(':');
    while let Some(key) = segments.next() {
        let Some(value) = segments.next() else {
            return Err(CatalogUriError::DanglingKey {
                uri: uri.to_string(),
                key: key.to_string(),
            });
        };
        parts.insert(key.to_string(), value.to_string());
    }

    Ok(parts)
}

/// What a catalog uri asks to sync: every playlist a user owns, or one specific playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistUriDescriptor {
    pub user_id: String,
    pub playlist_id: Option<String>,
}

impl PlaylistUriDescriptor {
    pub fn parse(uri: &str) -> Result<Self, CatalogUriError> {
        let mut parts = parse_catalog_uri(uri)?;
        let user_id = parts
            .remove("user")
            .filter(|user| !user.is_empty())
            .ok_or_else(|| CatalogUriError::MissingUser(uri.to_string()))?;
        let playlist_id = parts.remove("playlist").filter(|id| !id.is_empty());

        Ok(Self {
            user_id,
            playlist_id,
        })
    }
}

impl fmt::Display for PlaylistUriDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.playlist_id {
            Some(id) => write!(f, "{}user:{}:playlist:{}", SCHEME, self.user_id, id),
            None => write!(f, "{}user:{}", SCHEME, self.user_id),
        }
    }
}
