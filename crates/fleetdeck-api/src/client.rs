// Tracking service HTTP client
//
// Wraps `reqwest::Client` with service-specific URL construction and
// envelope unwrapping. All endpoint modules (devices, warehouses,
// aggregators) are implemented as inherent methods via separate files to
// keep this module focused on transport mechanics.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::models::{ErrorBody, ListEnvelope, ListPage, RecordEnvelope};
use crate::transport::TransportConfig;

/// Raw HTTP client for the tracking service REST API.
///
/// Handles the `{ data, message, maxPage }` list envelope and the
/// `{ data, message }` record envelope. All methods return unwrapped `data`
/// payloads — the envelope is stripped before the caller sees it. This layer
/// performs no validation: it is a pass-through with response-shape
/// normalization.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` is the service root (e.g. `https://track.example.com/api`).
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The service base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Build a full URL for an API path, e.g. `device/list`.
    pub(crate) fn endpoint_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request to a list endpoint and unwrap the list envelope.
    pub(crate) async fn get_list<T, P>(&self, url: Url, params: &P) -> Result<ListPage<T>, Error>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        debug!("GET {}", url);

        let resp = self
            .http
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(Error::Transport)?;

        let envelope: ListEnvelope<T> = Self::parse_body(resp).await?;
        Ok(ListPage {
            rows: envelope.data,
            max_page: envelope.max_page.unwrap_or(0),
        })
    }

    /// Send a GET request to a single-record endpoint.
    pub(crate) async fn get_one<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;
        Self::parse_record(resp).await
    }

    /// Send a POST request with JSON body and unwrap the record envelope.
    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &impl Serialize,
    ) -> Result<T, Error> {
        debug!("POST {}", url);

        let resp = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;

        Self::parse_record(resp).await
    }

    /// Send a PUT request with JSON body and unwrap the record envelope.
    pub(crate) async fn put<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &impl Serialize,
    ) -> Result<T, Error> {
        debug!("PUT {}", url);

        let resp = self
            .http
            .put(url)
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;

        Self::parse_record(resp).await
    }

    /// Send a DELETE request. The `data` field is ignored; only the
    /// success/failure outcome matters to callers.
    pub(crate) async fn delete(&self, url: Url) -> Result<(), Error> {
        debug!("DELETE {}", url);

        let resp = self
            .http
            .delete(url)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }
        Err(Self::error_from_body(status, resp).await)
    }

    // ── Envelope parsing ─────────────────────────────────────────────

    /// Parse a `{ data, message }` record envelope, treating an absent
    /// `data` field as a server-reported error.
    async fn parse_record<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let envelope: RecordEnvelope<T> = Self::parse_body(resp).await?;
        envelope.data.ok_or_else(|| Error::Api {
            message: envelope.message.unwrap_or_default(),
            status: 200,
        })
    }

    /// Deserialize a 2xx body, or extract `{ message }` from a non-2xx one.
    async fn parse_body<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();

        if !status.is_success() {
            return Err(Self::error_from_body(status, resp).await);
        }

        let body = resp.text().await.map_err(Error::Transport)?;
        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }

    /// Build an `Error::Api` from a failed response, pulling the server
    /// message out of the body when one is present.
    async fn error_from_body(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let message = match resp.text().await {
            Ok(body) => serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_default(),
            Err(_) => String::new(),
        };

        Error::Api {
            message,
            status: status.as_u16(),
        }
    }
}
