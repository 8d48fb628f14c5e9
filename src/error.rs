use reqwest::StatusCode;

/// Outcome of a failed call against Spotify or the Plex Media Server.
///
/// Callers decide between retrying, skipping and aborting from the variant
/// instead of catching everything.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Unauthorized: {reason}")]
    Unauthorized { reason: String },
    #[error("Request failed with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Failed to send http request: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ApiError {
    /// Whether a single immediate re-attempt is worth making.
    pub fn is_transient(&self) -> bool {
        match self {
            ApiError::Request(_) => true,
            ApiError::Status { status, .. } => {
                *status == StatusCode::TOO_MANY_REQUESTS.as_u16() || *status >= 500
            }
            ApiError::NotFound(_) | ApiError::Unauthorized { .. } | ApiError::InvalidUrl(_) => {
                false
            }
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }
}

/// Turns a non-success response into an [`ApiError`], keeping the body for the log line.
///
/// `what` names the resource for the `NotFound` case.
pub async fn check_status(
    response: reqwest::Response,
    what: &str,
) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::NOT_FOUND {
        return Err(ApiError::NotFound(what.to_string()));
    }
    let body = response
        .text()
        .await
        .unwrap_or("Failed to get error text".to_string());
    if status == StatusCode::UNAUTHORIZED {
        return Err(ApiError::Unauthorized { reason: body });
    }
    Err(ApiError::Status {
        status: status.as_u16(),
        body,
    })
}
