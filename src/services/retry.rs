use std::future::Future;
use std::time::Duration;

use backon::{ConstantBuilder, Retryable};

use crate::error::ApiError;

/// Runs `call`, and runs it exactly once more straight away if the first
/// attempt failed with a transient error. `NotFound` and other permanent
/// errors are returned as is.
pub async fn retry_once<T, F, Fut>(what: &str, call: F) -> Result<T, ApiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    call.retry(
        ConstantBuilder::default()
            .with_delay(Duration::ZERO)
            .with_max_times(1),
    )
    .when(ApiError::is_transient)
    .notify(|err: &ApiError, _| {
        log::warn!("{} failed, retrying once: {}", what, err);
    })
    .await
}
