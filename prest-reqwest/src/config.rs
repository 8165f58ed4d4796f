//! Transport configuration.

use std::time::Duration;

use url::Url;

use crate::env::{EnvSource, StdEnvSource};
use crate::error::{HttpError, HttpResult};

/// Variable holding the API base URL.
pub const URL_VAR: &str = "PREST_URL";
/// Variable holding the request timeout in milliseconds.
pub const TIMEOUT_VAR: &str = "PREST_TIMEOUT_MS";
/// Variable holding the connect timeout in milliseconds.
pub const CONNECT_TIMEOUT_VAR: &str = "PREST_CONNECT_TIMEOUT_MS";
/// Variable holding the user agent.
pub const USER_AGENT_VAR: &str = "PREST_USER_AGENT";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for [`ReqwestExecutor`](crate::ReqwestExecutor).
#[derive(Debug, Clone)]
pub struct ReqwestConfig {
    /// API base URL; resources are resolved relative to it.
    pub base_url: Url,
    /// Whole-request timeout.
    pub timeout: Duration,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// User agent.
    pub user_agent: String,
    /// Headers added to every request.
    pub default_headers: Vec<(String, String)>,
}

fn parse_base_url(raw: &str) -> HttpResult<Url> {
    let mut url = Url::parse(raw)?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(HttpError::config(format!(
            "invalid scheme: expected 'http' or 'https', got '{}'",
            url.scheme()
        )));
    }
    if url.cannot_be_a_base() || url.host_str().is_none() {
        return Err(HttpError::config("missing host in URL"));
    }

    // Without the trailing slash `join` would replace the last segment.
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn parse_millis(name: &str, value: &str) -> HttpResult<Duration> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| HttpError::config(format!("invalid {}: {}", name, value)))
}

impl ReqwestConfig {
    /// Create a configuration with default timeouts.
    pub fn from_url(url: impl AsRef<str>) -> HttpResult<Self> {
        Ok(Self {
            base_url: parse_base_url(url.as_ref())?,
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            user_agent: default_user_agent(),
            default_headers: Vec::new(),
        })
    }

    /// Read the configuration from the process environment.
    pub fn from_env() -> HttpResult<Self> {
        Self::from_env_source(&StdEnvSource)
    }

    /// Read the configuration from any [`EnvSource`].
    ///
    /// `PREST_URL` is required; the timeouts and user agent are optional.
    pub fn from_env_source(env: &dyn EnvSource) -> HttpResult<Self> {
        let url = env
            .get(URL_VAR)
            .ok_or_else(|| HttpError::MissingEnv(URL_VAR.to_string()))?;

        let mut builder = Self::builder().url(url);
        if let Some(ms) = env.get(TIMEOUT_VAR) {
            builder = builder.timeout(parse_millis(TIMEOUT_VAR, &ms)?);
        }
        if let Some(ms) = env.get(CONNECT_TIMEOUT_VAR) {
            builder = builder.connect_timeout(parse_millis(CONNECT_TIMEOUT_VAR, &ms)?);
        }
        if let Some(agent) = env.get(USER_AGENT_VAR) {
            builder = builder.user_agent(agent);
        }
        builder.build()
    }

    /// Create a builder for configuration.
    pub fn builder() -> ReqwestConfigBuilder {
        ReqwestConfigBuilder::new()
    }

    /// URL of a resource under the base URL.
    pub fn resource_url(&self, resource: &str) -> HttpResult<Url> {
        Ok(self.base_url.join(resource.trim_start_matches('/'))?)
    }
}

fn default_user_agent() -> String {
    format!("prest/{}", env!("CARGO_PKG_VERSION"))
}

/// Builder for [`ReqwestConfig`].
#[derive(Debug, Default)]
pub struct ReqwestConfigBuilder {
    url: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    user_agent: Option<String>,
    default_headers: Vec<(String, String)>,
}

impl ReqwestConfigBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set the user agent.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Add a header sent with every request, e.g. `apikey`.
    pub fn default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    /// Build the configuration.
    pub fn build(self) -> HttpResult<ReqwestConfig> {
        let url = self
            .url
            .ok_or_else(|| HttpError::config("base URL is required"))?;
        let mut config = ReqwestConfig::from_url(url)?;

        if let Some(timeout) = self.timeout {
            config.timeout = timeout;
        }
        if let Some(timeout) = self.connect_timeout {
            config.connect_timeout = timeout;
        }
        if let Some(agent) = self.user_agent {
            config.user_agent = agent;
        }
        config.default_headers = self.default_headers;

        if config.timeout.is_zero() {
            return Err(HttpError::config("timeout must be greater than zero"));
        }
        Ok(config)
    }
}
