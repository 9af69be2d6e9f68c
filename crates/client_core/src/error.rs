use reqwest::StatusCode;
use thiserror::Error;

/// What actually went wrong underneath a [`GatewayError`].
///
/// Kept for logging only; the user-facing message never depends on it.
#[derive(Debug, Error)]
pub enum FailureCause {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("server answered {0}")]
    Rejected(StatusCode),
}

/// Gateway failure, one variant per operation, each with a fixed message.
///
/// Network failures and server-side rejections collapse into the same variant,
/// so the controller cannot (and does not) tell them apart.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Load failed")]
    Load(#[source] FailureCause),
    #[error("Create failed")]
    Create(#[source] FailureCause),
    #[error("Update failed")]
    Update(#[source] FailureCause),
    #[error("Delete failed")]
    Delete(#[source] FailureCause),
    #[error("Fetch failed")]
    Fetch(#[source] FailureCause),
    #[error("Status lookup failed")]
    ByStatus(#[source] FailureCause),
    #[error("Search failed")]
    Search(#[source] FailureCause),
    #[error("Health check failed")]
    Health(#[source] FailureCause),
    #[error("Count failed")]
    Count(#[source] FailureCause),
}

impl GatewayError {
    pub fn operation(&self) -> &'static str {
        match self {
            Self::Load(_) => "list",
            Self::Create(_) => "create",
            Self::Update(_) => "update",
            Self::Delete(_) => "delete",
            Self::Fetch(_) => "get",
            Self::ByStatus(_) => "list_by_status",
            Self::Search(_) => "search",
            Self::Health(_) => "health",
            Self::Count(_) => "count",
        }
    }

    pub fn cause(&self) -> &FailureCause {
        match self {
            Self::Load(cause)
            | Self::Create(cause)
            | Self::Update(cause)
            | Self::Delete(cause)
            | Self::Fetch(cause)
            | Self::ByStatus(cause)
            | Self::Search(cause)
            | Self::Health(cause)
            | Self::Count(cause) => cause,
        }
    }
}
