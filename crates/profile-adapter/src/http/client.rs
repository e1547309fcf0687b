/*
[INPUT]:  HTTP configuration (base URL, timeouts) and bearer tokens
[OUTPUT]: Configured reqwest client ready for API calls
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use crate::http::{ProfileError, Result};

/// Default base URL for the user service
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Error body returned by the user service on non-2xx responses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Main HTTP client for the user service
#[derive(Debug, Clone)]
pub struct ProfileClient {
    http_client: Client,
    base_url: Url,
}

impl ProfileClient {
    /// Create a new client against the default base URL
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default(), DEFAULT_BASE_URL)
    }

    /// Create a new client with custom configuration and base URL
    pub fn with_config(config: ClientConfig, base_url: &str) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(ProfileError::Config(format!(
                "base URL {base_url} cannot carry endpoint paths"
            )));
        }

        Ok(Self {
            http_client,
            base_url,
        })
    }

    /// Base URL every endpoint is appended to
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append path segments to the base URL, percent-encoding each one
    pub(crate) fn endpoint_url(&self, segments: &[&str]) -> Result<Url> {
        if let Some(segment) = segments
            .iter()
            .find(|segment| matches!(**segment, "" | "." | ".."))
        {
            return Err(ProfileError::Config(format!(
                "invalid endpoint path segment {segment:?}"
            )));
        }
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ProfileError::Config(format!(
                    "base URL {} cannot carry endpoint paths",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Build request builder carrying the bearer token
    pub(crate) fn request_with_token(
        &self,
        method: Method,
        segments: &[&str],
        token: &str,
    ) -> Result<RequestBuilder> {
        let url = self.endpoint_url(segments)?;
        Ok(self.http_client.request(method, url).bearer_auth(token))
    }

    /// Send a request and decode a JSON body
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = Self::checked(builder.send().await?).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Send a request whose body may be empty (`204`) or `null`
    pub(crate) async fn send_optional_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<Option<T>> {
        let response = Self::checked(builder.send().await?).await?;
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(None);
        }
        Ok(serde_json::from_str::<Option<T>>(&body)?)
    }

    async fn checked(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        debug!(status = status.as_u16(), body = %body, "user service returned error status");

        if status == StatusCode::UNAUTHORIZED {
            return Err(ProfileError::Authentication {
                message: error_message(status, &body),
            });
        }
        Err(ProfileError::api_error(status, error_message(status, &body)))
    }
}

fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        })
}
