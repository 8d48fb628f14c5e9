//! Reconciles Spotify track metadata with Plex search results.
//!
//! Matching is a filter, not a ranking: candidates keep the order Plex returned
//! them in and the first survivor is the match.

use std::sync::LazyLock;

use regex::Regex;

use crate::plex_rs::search::PlexMetadataItem;

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\W+").expect("non-word pattern is valid"));

/// `<base> - <descriptor>` where the descriptor mentions a mix or remix.
static MIX_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?P<base>.+) - (?P<descriptor>.*mix.*)$").expect("mix pattern is valid")
});

const ORIGINAL_MIX: &str = "original mix";

/// Collapse every run of characters other than letters, digits and `_` into one space,
/// then trim.
///
/// `normalize_name("Don't Stop!")` is `"Don t Stop"`.
pub fn normalize_name(name: &str) -> String {
    NON_WORD.replace_all(name, " ").trim().to_string()
}

/// Which Plex field the Spotify artist is compared against, and how.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ArtistMatch {
    /// Normalized, case-insensitive substring test against the track's artist (`grandparentTitle`).
    #[default]
    Contains,
    /// Case-insensitive equality with the track artist (`originalTitle`),
    /// using `grandparentTitle` when Plex leaves `originalTitle` out.
    OriginalTitle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchPolicy {
    pub artist_match: ArtistMatch,
    /// Also try the `(<descriptor>)` and bare renderings of `<base> - <mix>` titles.
    pub remix_variants: bool,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            artist_match: ArtistMatch::Contains,
            remix_variants: true,
        }
    }
}

impl MatchPolicy {
    fn title_matches(&self, item: &PlexMetadataItem, song: &str) -> bool {
        let title = normalize_name(&item.title).to_lowercase();
        let song = normalize_name(song).to_lowercase();
        if !title.contains(&song) {
            log::debug!("Comparing Title: {} <-> {}", title, song);
            return false;
        }
        true
    }

    /// The Plex artist field `artist_match` compares against.
    fn compared_artist<'a>(&self, item: &'a PlexMetadataItem) -> Option<&'a str> {
        match self.artist_match {
            ArtistMatch::Contains => item.artist.as_deref(),
            ArtistMatch::OriginalTitle => item.original_title.as_deref().or(item.artist.as_deref()),
        }
    }

    fn artist_matches(&self, item: &PlexMetadataItem, artist: &str) -> bool {
        let field = self.compared_artist(item);
        let matched = match self.artist_match {
            ArtistMatch::Contains => {
                let name = normalize_name(field.unwrap_or_default()).to_lowercase();
                name.contains(&normalize_name(artist).to_lowercase())
            }
            ArtistMatch::OriginalTitle => {
                field.is_some_and(|a| a.to_lowercase() == artist.to_lowercase())
            }
        };
        if !matched {
            log::debug!(
                "Comparing Artist: {} <-> {}",
                field.unwrap_or_default(),
                artist
            );
        }
        matched
    }

    /// Keep the tracks among `items` whose title contains `song` and whose artist matches `artist`.
    ///
    /// Non-track items never survive. Order is preserved.
    pub fn filter_candidates<'a>(
        &self,
        items: &'a [PlexMetadataItem],
        song: &str,
        artist: &str,
    ) -> Vec<&'a PlexMetadataItem> {
        items
            .iter()
            .filter(|item| item.is_track())
            .filter(|item| self.title_matches(item, song))
            .filter(|item| self.artist_matches(item, artist))
            .collect()
    }

    /// Titles to search for, in the order they are tried. The raw title always comes first.
    pub fn title_variants(&self, title: &str) -> Vec<String> {
        if self.remix_variants {
            title_variants(title)
        } else {
            vec![title.to_string()]
        }
    }
}

/// Alternate renderings of a title that local libraries tend to use.
///
/// - `"Strobe - Extended Mix"` gives `["Strobe - Extended Mix", "Strobe (Extended Mix)"]`
/// - `"Strobe - Original Mix"` additionally gives the bare `"Strobe"`
pub fn title_variants(title: &str) -> Vec<String> {
    let mut variants = vec![title.to_string()];

    if let Some(captures) = MIX_SUFFIX.captures(title) {
        let base = &captures["base"];
        let descriptor = &captures["descriptor"];
        variants.push(format!("{} ({})", base, descriptor));
        if descriptor.eq_ignore_ascii_case(ORIGINAL_MIX) {
            variants.push(base.to_string());
        }
    }

    variants
}
