//! Thin wrapper over `reqwest` for the papersign JSON API.

use std::sync::Arc;

use reqwest::cookie::{CookieStore, Jar};
use reqwest::{Response, Url};
use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::ClientError;

/// Error body returned by the backend: `{code, message, ...}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// HTTP client bound to one backend base URL.
///
/// The underlying `reqwest::Client` keeps a cookie jar, so a session cookie
/// set by login is replayed on later calls made through clones of this value.
/// [`Self::cookie_header`] and [`Self::restore_cookies`] carry the jar across
/// processes.
#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: Url,
    http: reqwest::Client,
    jar: Arc<Jar>,
}

impl ApiClient {
    /// Build a client for `base_url`, e.g. `http://localhost:8080`.
    ///
    /// # Errors
    /// [`ClientError::Validation`] when the URL does not parse and
    /// [`ClientError::Transport`] when the HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let parsed = Url::parse(base_url).map_err(|err| ClientError::Validation {
            field: "base_url",
            message: err.to_string(),
        })?;
        let jar = Arc::new(Jar::default());
        let http = reqwest::Client::builder()
            .cookie_provider(Arc::clone(&jar))
            .build()?;
        Ok(Self {
            base_url: parsed,
            http,
            jar,
        })
    }

    /// Base URL requests are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Cookies held for the backend as a `Cookie` header value, e.g.
    /// `session=abc`; `None` when the jar is empty.
    #[must_use]
    pub fn cookie_header(&self) -> Option<String> {
        self.jar
            .cookies(&self.base_url)
            .and_then(|value| value.to_str().ok().map(str::to_owned))
    }

    /// Load cookies saved from [`Self::cookie_header`] into the jar.
    pub fn restore_cookies(&self, header: &str) {
        for pair in header.split(';').map(str::trim).filter(|pair| !pair.is_empty()) {
            self.jar.add_cookie_str(&format!("{pair}; Path=/"), &self.base_url);
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|err| ClientError::Validation {
                field: "path",
                message: err.to_string(),
            })
    }

    /// URL for `segments` under the base URL, each segment percent-encoded,
    /// so an id like `../auth/logout` stays a single segment.
    fn resource(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::Validation {
                field: "base_url",
                message: "base URL cannot hold a path".to_owned(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// `GET path`.
    ///
    /// # Errors
    /// [`ClientError::Transport`] when no response arrives.
    pub async fn get(&self, path: &str) -> Result<Response, ClientError> {
        let url = self.endpoint(path)?;
        debug!(%url, "GET");
        Ok(self.http.get(url).send().await?)
    }

    /// `POST path` with a JSON body.
    ///
    /// # Errors
    /// [`ClientError::Transport`] when no response arrives.
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<Response, ClientError> {
        let url = self.endpoint(path)?;
        debug!(%url, "POST");
        Ok(self.http.post(url).json(body).send().await?)
    }

    /// `DELETE` the resource named by `segments`, e.g. `["api", "documents", id]`.
    ///
    /// # Errors
    /// [`ClientError::Transport`] when no response arrives.
    pub async fn delete(&self, segments: &[&str]) -> Result<Response, ClientError> {
        let url = self.resource(segments)?;
        debug!(%url, "DELETE");
        Ok(self.http.delete(url).send().await?)
    }
}

/// Decode a successful JSON response.
///
/// # Errors
/// [`ClientError::Decode`] when the body is not the expected JSON.
pub async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|err| ClientError::Decode {
        message: err.to_string(),
    })
}

/// Turn a non-success response into [`ClientError::Remote`].
///
/// The message is the body's `message` field, or `fallback` when the body is
/// missing, unparseable or carries an empty message.
pub async fn remote_error(response: Response, fallback: &str) -> ClientError {
    let status = response.status().as_u16();
    let message = response
        .bytes()
        .await
        .ok()
        .and_then(|bytes| serde_json::from_slice::<ErrorBody>(&bytes).ok())
        .and_then(|body| body.message)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| fallback.to_owned());
    ClientError::Remote { status, message }
}
