use std::time::Duration;

/// A simple wrapper around `reqwest::Client` used to manage HTTP requests
/// with a preconfigured base URL and default settings.
///
/// One instance is shared by every upstream call the pipeline makes. The
/// per-request timeout bounds how long a hung body can stall a refresh
/// cycle; the transport default would leave that open-ended.
#[derive(Debug)]
pub struct HTTPClient {
    /// The underlying `reqwest::Client` used to perform HTTP requests.
    client: reqwest::Client,
    /// Base URL of the ephemeris API, used by every vector request.
    base_url: String,
}

impl HTTPClient {
    /// Constructs a new `HTTPClient` with the given base URL and
    /// per-request timeout.
    ///
    /// # Arguments
    /// * `base_url` – The ephemeris API endpoint (e.g. the Horizons API root).
    /// * `timeout` – Deadline applied to every request issued through this client.
    ///
    /// # Returns
    /// A configured `HTTPClient` instance.
    pub fn new(base_url: &str, timeout: Duration) -> HTTPClient {
        HTTPClient {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap(),
            base_url: String::from(base_url),
        }
    }

    /// Returns a reference to the internal `reqwest::Client`.
    pub(crate) fn client(&self) -> &reqwest::Client { &self.client }
    /// Returns the base URL that the client was initialized with.
    pub(crate) fn url(&self) -> &str { self.base_url.as_str() }
}
