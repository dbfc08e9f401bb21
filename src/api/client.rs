use crate::error::{HelpdeskError, Result};
use reqwest::header::{CONTENT_DISPOSITION, HeaderMap};
use reqwest::{Method, RequestBuilder, Response, multipart};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

/// Thin HTTP client for the helpdesk REST API
///
/// Every call is a single request/response. There is no retry, caching or
/// cancellation: a non-2xx response is turned into a [`HelpdeskError`] and
/// the caller decides what to show.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    token: Option<String>,
}

/// Raw file body plus the name the server suggested for it
#[derive(Debug, Clone)]
pub struct Download {
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

impl ApiClient {
    /// Create a client rooted at `base_url` (e.g. `http://localhost:8080/api`)
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        // Url::join drops the last segment unless the base ends in '/'
        let mut base = base_url.trim_end_matches('/').to_string();
        base.push('/');
        let base_url = Url::parse(&base)?;

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("helpdesk/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url,
            token: None,
        })
    }

    /// Attach a bearer token to every subsequent request
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub const fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn url(&self, path: &str, query: &[(&str, &str)]) -> Result<Url> {
        let mut url = self.base_url.join(path.trim_start_matches('/'))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    fn request(&self, method: Method, path: &str, query: &[(&str, &str)]) -> Result<RequestBuilder> {
        let url = self.url(path, query)?;
        let mut builder = self.http.request(method, url);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        Ok(builder)
    }

    async fn send(&self, method: Method, path: &str, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await?;
        let status = response.status();
        tracing::debug!(%method, path, status = status.as_u16(), "api request");

        if status.is_success() {
            return Ok(response);
        }

        let reason = status.canonical_reason().unwrap_or("Request failed").to_string();
        let body = response.text().await.unwrap_or_default();
        let message = server_message(&body).unwrap_or(reason);
        Err(HelpdeskError::from_status(status.as_u16(), message))
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let builder = self.request(Method::GET, path, query)?;
        Ok(self.send(Method::GET, path, builder).await?.json().await?)
    }

    pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let builder = self.request(Method::POST, path, &[])?.json(body);
        Ok(self.send(Method::POST, path, builder).await?.json().await?)
    }

    pub(crate) async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let builder = self.request(Method::PUT, path, &[])?.json(body);
        Ok(self.send(Method::PUT, path, builder).await?.json().await?)
    }

    /// PUT carrying its arguments in the query string only
    pub(crate) async fn put_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let builder = self.request(Method::PUT, path, query)?;
        Ok(self.send(Method::PUT, path, builder).await?.json().await?)
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        let builder = self.request(Method::DELETE, path, &[])?;
        self.send(Method::DELETE, path, builder).await?;
        Ok(())
    }

    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: multipart::Form,
    ) -> Result<T> {
        let builder = self.request(Method::POST, path, &[])?.multipart(form);
        Ok(self.send(Method::POST, path, builder).await?.json().await?)
    }

    pub(crate) async fn get_bytes(&self, path: &str) -> Result<Download> {
        let builder = self.request(Method::GET, path, &[])?;
        let response = self.send(Method::GET, path, builder).await?;
        let file_name = disposition_file_name(response.headers());
        let bytes = response.bytes().await?.to_vec();
        Ok(Download { file_name, bytes })
    }
}

/// Pull a human message out of an error body: `error`, then `message`
fn server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["error", "message"]
        .iter()
        .filter_map(|key| value.get(key).and_then(serde_json::Value::as_str))
        .map(str::trim)
        .find(|msg| !msg.is_empty())
        .map(str::to_string)
}

/// `attachment; filename="report.pdf"` -> `report.pdf`
fn disposition_file_name(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(CONTENT_DISPOSITION)?.to_str().ok()?;
    value.split(';').map(str::trim).find_map(|part| {
        part.strip_prefix("filename=")
            .map(|name| name.trim_matches('"').to_string())
            .filter(|name| !name.is_empty())
    })
}
