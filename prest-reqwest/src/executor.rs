//! `HttpExecutor` implementation over reqwest.

use std::sync::Arc;
use std::time::Instant;

use prest_query::{BoxFuture, Endpoint, HttpExecutor, HttpMethod, HttpRequest, HttpResponse};
use prest_query::{RestError, RestResult};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::{debug, trace};

use crate::config::ReqwestConfig;
use crate::error::{HttpError, HttpResult};

/// Sends requests with a shared `reqwest::Client`.
///
/// Cloning is cheap: clones share the client's connection pool.
#[derive(Debug, Clone)]
pub struct ReqwestExecutor {
    client: reqwest::Client,
    config: Arc<ReqwestConfig>,
}

fn to_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Patch => reqwest::Method::PATCH,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

fn header_map(headers: &[(String, String)]) -> HttpResult<HeaderMap> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| HttpError::header(format!("{}: {}", name, e)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| HttpError::header(format!("{}: {}", name, e)))?;
        map.insert(name, value);
    }
    Ok(map)
}

impl ReqwestExecutor {
    /// Build a client from a configuration.
    pub fn new(config: ReqwestConfig) -> HttpResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(config.user_agent.clone())
            .default_headers(header_map(&config.default_headers)?)
            .build()?;

        Ok(Self::with_client(client, config))
    }

    /// Build a client for `url` with default settings.
    pub fn from_url(url: impl AsRef<str>) -> HttpResult<Self> {
        Self::new(ReqwestConfig::from_url(url)?)
    }

    /// Build a client from `PREST_*` environment variables.
    pub fn from_env() -> HttpResult<Self> {
        Self::new(ReqwestConfig::from_env()?)
    }

    /// Use an existing client. Timeouts and default headers in `config` are
    /// ignored; the client's own settings apply.
    pub fn with_client(client: reqwest::Client, config: ReqwestConfig) -> Self {
        Self {
            client,
            config: Arc::new(config),
        }
    }

    /// The configuration.
    pub fn config(&self) -> &ReqwestConfig {
        &self.config
    }

    /// An endpoint for `resource` under the base URL.
    pub fn endpoint(
        &self,
        resource: &str,
        token: impl Into<String>,
    ) -> HttpResult<Endpoint<Self>> {
        let url = self.config.resource_url(resource)?;
        Ok(Endpoint::new(self.clone(), url.as_str(), token))
    }

    async fn send(&self, request: HttpRequest) -> HttpResult<HttpResponse> {
        // The query string is already escaped; it must reach the wire as-is.
        let url = request.full_url();
        let started = Instant::now();
        trace!(method = %request.method, url = %url, "sending request");

        let mut builder = self
            .client
            .request(to_method(request.method), url.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        debug!(
            method = %request.method,
            url = %url,
            status,
            elapsed = ?started.elapsed(),
            "request completed"
        );

        Ok(HttpResponse::new(status, body))
    }
}

impl HttpExecutor for ReqwestExecutor {
    fn execute(&self, request: HttpRequest) -> BoxFuture<'_, RestResult<HttpResponse>> {
        Box::pin(async move { self.send(request).await.map_err(RestError::from) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_mapping() {
        assert_eq!(to_method(HttpMethod::Get), reqwest::Method::GET);
        assert_eq!(to_method(HttpMethod::Patch), reqwest::Method::PATCH);
    }

    #[test]
    fn test_header_map_rejects_invalid_names() {
        let ok = header_map(&[("apikey".into(), "anon".into())]).unwrap();
        assert_eq!(ok.get("apikey").unwrap(), "anon");

        let err = header_map(&[("bad header".into(), "x".into())]).unwrap_err();
        assert!(matches!(err, HttpError::Header(_)));
    }

    #[test]
    fn test_endpoint_joins_base_url() {
        let executor = ReqwestExecutor::from_url("http://localhost:3000/rest/v1").unwrap();
        let users = executor.endpoint("users", "token").unwrap();
        assert_eq!(users.path(), "http://localhost:3000/rest/v1/users");
    }
}
