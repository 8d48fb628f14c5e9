use std::time::Duration;

use color_eyre::Result;
use color_eyre::eyre::bail;

use crate::config::UriSource;
use crate::ports::plex::PlexClient;
use crate::ports::spotify::SpotifyClient;
use crate::services::sync::SyncService;

/// Sync, sleep for `interval`, repeat.
///
/// Descriptors are rebuilt from `source` at the start of every pass, so nothing parsed in one
/// pass leaks into the next. Stops after `max_passes` passes when given, and with an error when
/// the source cannot be read or yields no descriptors.
pub async fn run_sync_loop<S: SpotifyClient, P: PlexClient>(
    service: &SyncService<S, P>,
    source: &UriSource,
    interval: Duration,
    max_passes: Option<usize>,
) -> Result<()> {
    let mut passes = 0;
    loop {
        let descriptors = source.load_descriptors()?;
        if descriptors.is_empty() {
            log::error!("No spotify uris");
            bail!("No spotify uris configured in {:?}", source);
        }

        service.run_pass(&descriptors).await;
        passes += 1;

        if max_passes.is_some_and(|max| passes >= max) {
            return Ok(());
        }

        log::info!(
            "Sleeping {} until the next sync",
            humantime::format_duration(interval)
        );
        tokio::time::sleep(interval).await;
    }
}
