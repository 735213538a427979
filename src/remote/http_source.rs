use crate::remote::error::FetchError;
use crate::remote::RemoteSource;
use crate::types::data_type::DataType;
use crate::types::matrix::RawRecord;
use async_compression::tokio::bufread::GzipDecoder;
use async_trait::async_trait;
use bon::bon;
use futures_util::TryStreamExt;
use log::{info, warn};
use reqwest::Client;
use std::pin::Pin;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::task;
use tokio_util::io::StreamReader;

/// Downloads daily records from `{base_url}/{data_type}.json`.
///
/// With `gzip` enabled the records are fetched from `{base_url}/{data_type}.json.gz`
/// and decompressed while streaming.
#[derive(Debug, Clone)]
pub struct HttpSource {
    base_url: String,
    gzip: bool,
    client: Client,
}

#[bon]
impl HttpSource {
    /// Builds a source for the endpoint rooted at `base_url`.
    ///
    /// No timeout is applied unless one is given; a hung request then keeps
    /// every caller waiting on that load.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::ClientBuild`] if the HTTP client cannot be created.
    ///
    /// # Examples
    ///
    /// ```
    /// use meteohistory::HttpSource;
    /// use std::time::Duration;
    ///
    /// let source = HttpSource::builder()
    ///     .base_url("https://example.org/d")
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    /// ```
    #[builder]
    pub fn new(
        #[builder(into)] base_url: String,
        timeout: Option<Duration>,
        #[builder(default)] gzip: bool,
    ) -> Result<Self, FetchError> {
        let mut client_builder = Client::builder();
        if let Some(timeout) = timeout {
            client_builder = client_builder.timeout(timeout);
        }
        let client = client_builder.build().map_err(FetchError::ClientBuild)?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            gzip,
            client,
        })
    }

    pub(crate) fn url_for(&self, data_type: DataType) -> String {
        let extension = if self.gzip { "json.gz" } else { "json" };
        format!("{}/{}.{}", self.base_url, data_type.path_segment(), extension)
    }

    /// Downloads the response body, decompressing it in gzip mode.
    async fn download(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        info!("Downloading data from {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::NetworkRequest(url.to_string(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(match e.status() {
                    Some(status) => FetchError::HttpStatus {
                        url: url.to_string(),
                        status,
                        source: e,
                    },
                    None => FetchError::NetworkRequest(url.to_string(), e),
                });
            }
        };

        let stream = response.bytes_stream().map_err(std::io::Error::other);
        let stream_reader = StreamReader::new(stream);
        let mut reader: Pin<Box<dyn AsyncRead + Send>> = if self.gzip {
            Box::pin(GzipDecoder::new(stream_reader))
        } else {
            Box::pin(stream_reader)
        };

        let mut body = Vec::new();
        reader
            .read_to_end(&mut body)
            .await
            .map_err(|e| FetchError::DownloadIo(url.to_string(), e))?;
        info!("Downloaded {} bytes from {}", body.len(), url);
        Ok(body)
    }
}

#[async_trait]
impl RemoteSource for HttpSource {
    async fn fetch_raw(&self, data_type: DataType) -> Result<Vec<RawRecord>, FetchError> {
        let url = self.url_for(data_type);
        let body = self.download(&url).await?;
        let records = parse_records(url, body).await?;
        info!("Parsed {} {} records", records.len(), data_type);
        Ok(records)
    }
}

/// Parses a JSON array of `{t, v}` records on the blocking pool.
async fn parse_records(url: String, body: Vec<u8>) -> Result<Vec<RawRecord>, FetchError> {
    task::spawn_blocking(move || {
        serde_json::from_slice::<Vec<RawRecord>>(&body)
            .map_err(|source| FetchError::MalformedResponse { url, source })
    })
    .await?
}
