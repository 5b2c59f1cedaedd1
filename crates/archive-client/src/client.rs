//! HTTP client for the archive API
//!
//! Every call is a single JSON request/response exchange. There is no
//! retry: a failed submission is resubmitted by the user.

use reqwest::{Client as ReqwestClient, Response as ReqwestResponse};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use crate::types::{
    LoginRequest, LoginResponse, MessageResponse, ProfileUpdateRequest, ProfileUpdateResponse,
    RegisterRequest,
};
use crate::{ApiError, Result};

// =============================================================================
// Request Types
// =============================================================================

/// HTTP method for API requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// POST request
    Post,
    /// PUT request
    Put,
}

impl HttpMethod {
    /// Method name as sent on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
        }
    }
}

// =============================================================================
// Response Types
// =============================================================================

/// Successful API response
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    /// HTTP status code
    pub status: u16,
    /// Response data
    pub data: T,
}

/// Error body the backend sends with non-2xx statuses
#[derive(Debug, Clone, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

// =============================================================================
// Client Configuration
// =============================================================================

/// Configuration for [`ArchiveClient`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base API URL (e.g., "http://localhost:5000/api")
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
    /// Custom headers to include in all requests
    pub default_headers: HashMap<String, String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".to_string(),
            timeout: Duration::from_secs(30),
            user_agent: format!("TUPT-Thesis-Archive/{}", env!("CARGO_PKG_VERSION")),
            default_headers: HashMap::new(),
        }
    }
}

impl ClientConfig {
    /// Create a new config with a base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), ..Default::default() }
    }

    /// Set the timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Add a default header
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }
}

// =============================================================================
// Client
// =============================================================================

/// Client for the archive's auth and profile endpoints
///
/// # Examples
/// ```no_run
/// use archive_client::{ArchiveClient, ClientConfig, LoginRequest};
///
/// async fn example() -> Result<(), Box<dyn std::error::Error>> {
///     let client = ArchiveClient::new(ClientConfig::new("http://localhost:5000/api"))?;
///
///     let response = client
///         .login(&LoginRequest {
///             id_number: "TUPT-21-1234".to_string(),
///             password: "Secret1!".to_string(),
///         })
///         .await?;
///
///     println!("Welcome, {}", response.user.name);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ArchiveClient {
    client: ReqwestClient,
    config: ClientConfig,
}

impl ArchiveClient {
    /// Create a new client
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = ReqwestClient::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// `POST /auth/register`
    pub async fn register(&self, request: &RegisterRequest) -> Result<MessageResponse> {
        let response = self.send_json(HttpMethod::Post, "/auth/register", request).await?;
        Ok(response.data)
    }

    /// `POST /auth/login`
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse> {
        let response = self.send_json(HttpMethod::Post, "/auth/login", request).await?;
        Ok(response.data)
    }

    /// `PUT /user/profile`
    pub async fn update_profile(
        &self,
        request: &ProfileUpdateRequest,
    ) -> Result<ProfileUpdateResponse> {
        let response = self.send_json(HttpMethod::Put, "/user/profile", request).await?;
        Ok(response.data)
    }

    /// Send a JSON body and decode a JSON response
    pub async fn send_json<B, T>(
        &self,
        method: HttpMethod,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let payload = serde_json::to_vec(body)?;

        let mut req = match method {
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Put => self.client.put(&url),
        };

        for (key, value) in &self.config.default_headers {
            req = req.header(key, value);
        }

        tracing::debug!(method = method.as_str(), %url, "sending request");

        let response = req
            .header("Content-Type", "application/json")
            .body(payload)
            .send()
            .await
            .map_err(|e| ApiError::Network(format!("Request failed: {}", e)))?;

        self.parse_response(response).await
    }

    async fn parse_response<T>(&self, response: ReqwestResponse) -> Result<ApiResponse<T>>
    where
        T: DeserializeOwned,
    {
        let status = response.status();

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            // A rejection must still be a JSON document; anything else means
            // we are not talking to the archive API.
            let error_body: ErrorBody = serde_json::from_str(&body).map_err(|_| {
                ApiError::Network(format!("HTTP {} with unreadable body", status.as_u16()))
            })?;
            tracing::debug!(status = status.as_u16(), "request rejected");
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                message: error_body.message,
            });
        }

        let data: T = serde_json::from_str(&body)
            .map_err(|e| ApiError::Network(format!("Failed to parse JSON: {}", e)))?;

        Ok(ApiResponse { status: status.as_u16(), data })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Get the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:5000/api");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("TUPT-Thesis-Archive/"));
    }

    #[test]
    fn test_client_config_builder() {
        let config = ClientConfig::new("https://archive.example.edu/api")
            .with_timeout(Duration::from_secs(5))
            .with_user_agent("Test/1.0")
            .with_header("X-Campus", "taguig");

        assert_eq!(config.base_url, "https://archive.example.edu/api");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, "Test/1.0");
        assert_eq!(config.default_headers.get("X-Campus"), Some(&"taguig".to_string()));
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = ArchiveClient::new(ClientConfig::new("http://host/api/")).unwrap();
        assert_eq!(client.url("/auth/login"), "http://host/api/auth/login");
        assert_eq!(client.base_url(), "http://host/api/");
    }

    #[test]
    fn test_http_method_as_str() {
        assert_eq!(HttpMethod::Post.as_str(), "POST");
        assert_eq!(HttpMethod::Put.as_str(), "PUT");
    }
}
