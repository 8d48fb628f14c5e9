use std::path::{Path, PathBuf};

use color_eyre::Result;
use color_eyre::eyre::{WrapErr, bail};
use url::Url;

use crate::spotify_rs::uri::PlaylistUriDescriptor;

/// Where the catalog uris come from. Read again at the start of every pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UriSource {
    /// Fixed list, e.g. from the comma separated `SPOTIFY_URIS`.
    List(Vec<String>),
    /// Line oriented file, one uri per line. Edits are picked up on the next pass.
    File(PathBuf),
}

impl UriSource {
    /// Default uri file, e.g. `~/.config/spotify-plex-sync/uris.txt`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|path| path.join("spotify-plex-sync").join("uris.txt"))
    }

    /// Pick the source from the comma separated list or the file path, list first.
    pub fn from_options(uris: Option<&str>, uris_file: Option<PathBuf>) -> Result<Self> {
        if let Some(uris) = uris {
            return Ok(UriSource::List(split_uri_list(uris)));
        }
        let Some(path) = uris_file.or_else(Self::default_path) else {
            bail!("No spotify uris: set SPOTIFY_URIS or SPOTIFY_URIS_FILE");
        };
        Ok(UriSource::File(path))
    }

    pub fn read_uris(&self) -> Result<Vec<String>> {
        match self {
            UriSource::List(uris) => Ok(uris.clone()),
            UriSource::File(path) => read_uri_file(path),
        }
    }

    /// Parse a fresh descriptor list. Uris that do not parse are logged and left out.
    pub fn load_descriptors(&self) -> Result<Vec<PlaylistUriDescriptor>> {
        let descriptors = self
            .read_uris()?
            .iter()
            .filter_map(|uri| match PlaylistUriDescriptor::parse(uri) {
                Ok(descriptor) => Some(descriptor),
                Err(e) => {
                    log::warn!("Skipping invalid spotify uri: {}", e);
                    None
                }
            })
            .collect();
        Ok(descriptors)
    }
}

pub fn split_uri_list(uris: &str) -> Vec<String> {
    uris.split(',')
        .map(str::trim)
        .filter(|uri| !uri.is_empty())
        .map(str::to_string)
        .collect()
}

/// One uri per line; blank lines and `#` comments are ignored.
pub fn parse_uri_lines(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

fn read_uri_file(path: &Path) -> Result<Vec<String>> {
    let contents = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read spotify uri file: {}", path.display()))?;
    Ok(parse_uri_lines(&contents))
}

/// Parse the Plex server url, making sure relative joins keep any path prefix.
pub fn plex_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw).wrap_err(format!("Invalid Plex server URL: {}", raw))?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
