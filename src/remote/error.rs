use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    // Stream errors while reading the body, including gzip decoding
    #[error("Data download or decompression failed for {0}")]
    DownloadIo(String, #[source] std::io::Error),

    #[error("Malformed response from {url}: expected a JSON array of {{t, v}} records")]
    MalformedResponse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl FetchError {
    /// Whether the endpoint answered but the body could not be parsed.
    pub fn is_malformed_response(&self) -> bool {
        matches!(self, FetchError::MalformedResponse { .. })
    }
}
