use thiserror::Error;

/// Why profile or leaderboard data is unavailable.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("User id must not be empty")]
    EmptyUserId,

    #[error("Network error: Unable to connect to server at {base_url}. Make sure the API server is running.")]
    Network {
        base_url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to fetch {resource}: {status} - {message}")]
    Status {
        resource: &'static str,
        status: u16,
        message: String,
    },

    #[error("Malformed {resource} response: {source}")]
    Decode {
        resource: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::Status { status: 404, .. })
    }
}
