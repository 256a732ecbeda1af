use std::io::{self, Write};
use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::header::USER_AGENT;
use reqwest::{Client, StatusCode};

use super::{BaseUrl, DownloadError, TransportError};

/// User agent sent with every request unless overridden.
pub const DEFAULT_USER_AGENT: &str = concat!("aptdata/", env!("CARGO_PKG_VERSION"));

/// Fetches source files into a writer.
#[async_trait(?Send)]
pub trait SourceFetcher {
    /// Base URL the source files live under.
    fn base_url(&self) -> &BaseUrl;
    /// Stream the resource at `url` into `sink`, returning the bytes written.
    async fn fetch(&self, url: &str, sink: &mut dyn Write) -> Result<u64, TransportError>;
}

/// HTTP implementation of [`SourceFetcher`].
#[derive(Debug)]
pub struct HttpSourceFetcher {
    client: Client,
    base_url: BaseUrl,
    user_agent: String,
}

impl HttpSourceFetcher {
    /// Construct an HTTP fetcher rooted at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, DownloadError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|source| DownloadError::Client { source })?;
        Ok(Self {
            client,
            base_url: BaseUrl::new(base_url),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        })
    }

    /// Override the default user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

#[async_trait(?Send)]
impl SourceFetcher for HttpSourceFetcher {
    fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    async fn fetch(&self, url: &str, sink: &mut dyn Write) -> Result<u64, TransportError> {
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, self.user_agent.as_str())
            .send()
            .await
            .map_err(|err| convert_reqwest_error(err, url))?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(TransportError::Http {
                url: url.to_owned(),
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("unexpected status")
                    .to_owned(),
            });
        }

        let mut written = 0_u64;
        let mut body = response.bytes_stream();
        while let Some(chunk) = body.next().await {
            let chunk = chunk.map_err(|err| convert_reqwest_error(err, url))?;
            sink.write_all(&chunk)
                .map_err(|source| TransportError::Network {
                    url: url.to_owned(),
                    source,
                })?;
            written += chunk.len() as u64;
        }
        Ok(written)
    }
}

fn convert_reqwest_error(error: reqwest::Error, url: &str) -> TransportError {
    if let Some(status) = error.status() {
        return TransportError::Http {
            url: url.to_owned(),
            status: status.as_u16(),
            message: error.to_string(),
        };
    }

    let kind = if error.is_timeout() {
        io::ErrorKind::TimedOut
    } else {
        io::ErrorKind::Other
    };
    TransportError::Network {
        url: url.to_owned(),
        source: io::Error::new(kind, error),
    }
}
