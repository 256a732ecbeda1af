//! In-memory fetcher for download tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::io::{self, Write};

use async_trait::async_trait;
use tokio::runtime::Builder;

use super::{BaseUrl, SourceFetcher, TransportError};

/// Canned outcome for one file.
#[derive(Debug, Clone)]
pub(crate) enum StubResponse {
    /// Serve the bytes with status 200.
    Body(Vec<u8>),
    /// Answer with this HTTP status.
    Status(u16),
    /// Write the bytes, then fail as if the connection dropped.
    PartialThenFail(Vec<u8>),
}

/// [`SourceFetcher`] answering from a table keyed by file name.
///
/// Unknown files answer 404.
#[derive(Debug)]
pub(crate) struct StubFetcher {
    base_url: BaseUrl,
    responses: HashMap<String, StubResponse>,
    requests: RefCell<Vec<String>>,
}

impl StubFetcher {
    pub(crate) fn new() -> Self {
        Self {
            base_url: BaseUrl::from("https://example.org/data"),
            responses: HashMap::new(),
            requests: RefCell::new(Vec::new()),
        }
    }

    /// Serve `body` for every default source file.
    pub(crate) fn serving_all(body: &[u8]) -> Self {
        ["airports.csv", "runways.csv", "countries.csv", "regions.csv"]
            .into_iter()
            .fold(Self::new(), |stub, name| {
                stub.with(name, StubResponse::Body(body.to_vec()))
            })
    }

    pub(crate) fn with(mut self, file_name: &str, response: StubResponse) -> Self {
        self.responses.insert(file_name.to_owned(), response);
        self
    }

    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

#[async_trait(?Send)]
impl SourceFetcher for StubFetcher {
    fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    async fn fetch(&self, url: &str, sink: &mut dyn Write) -> Result<u64, TransportError> {
        self.requests.borrow_mut().push(url.to_owned());
        let name = url.rsplit('/').next().unwrap_or(url);
        let network = |source| TransportError::Network {
            url: url.to_owned(),
            source,
        };
        match self.responses.get(name) {
            Some(StubResponse::Body(body)) => {
                sink.write_all(body).map_err(network)?;
                Ok(body.len() as u64)
            }
            Some(StubResponse::Status(status)) => Err(TransportError::Http {
                url: url.to_owned(),
                status: *status,
                message: "stubbed status".to_owned(),
            }),
            Some(StubResponse::PartialThenFail(body)) => {
                sink.write_all(body).map_err(network)?;
                Err(network(io::Error::new(
                    io::ErrorKind::ConnectionReset,
                    "stubbed connection reset",
                )))
            }
            None => Err(TransportError::Http {
                url: url.to_owned(),
                status: 404,
                message: "Not Found".to_owned(),
            }),
        }
    }
}

/// Drive `future` to completion on a current-thread runtime.
pub(crate) fn block_on<F: Future>(future: F) -> F::Output {
    Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to build Tokio runtime")
        .block_on(future)
}
