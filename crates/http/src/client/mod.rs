//! Console configuration API client

pub mod error;
pub mod graphql;
mod session;

use crate::cache::QueryCache;
use console_core::{ApiConfig, FetchPolicy};
use error::ClientError;
use graphql::{GraphQlRequest, GraphQlResponse};
use reqwest::{header, Client, ClientBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// Header carrying the admin secret of the configuration API
pub const ADMIN_SECRET_HEADER: &str = "x-hasura-admin-secret";

/// Configuration API client
///
/// Clones share the underlying connection pool and query cache.
#[derive(Clone, Debug)]
pub struct ConsoleClient {
    client: Client,
    endpoint: String,
    admin_secret: Option<String>,
    bearer_token: Option<String>,
    fetch_policy: FetchPolicy,
    cache: QueryCache,
}

impl ConsoleClient {
    /// Create a new client with default configuration
    pub fn new(endpoint: impl Into<String>) -> Result<Self, ClientError> {
        Self::builder().endpoint(endpoint).build()
    }

    /// Create a new client builder
    pub fn builder() -> ConsoleClientBuilder {
        ConsoleClientBuilder::default()
    }

    /// Create a client from the console configuration
    pub fn from_config(config: &ApiConfig) -> Result<Self, ClientError> {
        let mut builder = Self::builder()
            .endpoint(config.endpoint.clone())
            .fetch_policy(config.fetch_policy)
            .timeout(Duration::from_secs(config.timeout_secs));

        if let Some(secret) = &config.admin_secret {
            builder = builder.admin_secret(secret.clone());
        }

        builder.build()
    }

    /// Get the GraphQL endpoint
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Policy used by the settings panel's read path
    pub fn fetch_policy(&self) -> FetchPolicy {
        self.fetch_policy
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    fn request(&self) -> reqwest::RequestBuilder {
        let mut request = self.client.post(&self.endpoint);

        if let Some(secret) = &self.admin_secret {
            request = request.header(ADMIN_SECRET_HEADER, secret);
        }
        if let Some(token) = &self.bearer_token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        request
    }

    /// Execute a GraphQL operation and unwrap its data
    pub async fn execute<V, T>(&self, operation: &GraphQlRequest<V>) -> Result<T, ClientError>
    where
        V: Serialize,
        T: DeserializeOwned,
    {
        debug!(operation = operation.operation_name, endpoint = %self.endpoint, "Sending GraphQL request");

        let response = self.request().json(operation).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_else(|_| status.to_string());
            return Err(ClientError::from_status(status, message));
        }

        let body: GraphQlResponse<T> = response.json().await?;
        if !body.errors.is_empty() {
            return Err(ClientError::GraphQl(
                body.errors.into_iter().map(|e| e.message).collect(),
            ));
        }

        body.data
            .ok_or(ClientError::MissingData(operation.operation_name))
    }
}

/// Builder for ConsoleClient
#[derive(Default)]
pub struct ConsoleClientBuilder {
    endpoint: Option<String>,
    admin_secret: Option<String>,
    bearer_token: Option<String>,
    fetch_policy: FetchPolicy,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    cache: Option<QueryCache>,
}

impl ConsoleClientBuilder {
    /// Set the GraphQL endpoint
    #[must_use]
    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint = Some(url.into());
        self
    }

    /// Authenticate with the admin secret
    #[must_use]
    pub fn admin_secret(mut self, secret: impl Into<String>) -> Self {
        self.admin_secret = Some(secret.into());
        self
    }

    /// Authenticate with a bearer token
    #[must_use]
    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    #[must_use]
    pub fn fetch_policy(mut self, policy: FetchPolicy) -> Self {
        self.fetch_policy = policy;
        self
    }

    /// Set the request timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Share an existing cache instead of starting empty
    #[must_use]
    pub fn cache(mut self, cache: QueryCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Build the client
    pub fn build(self) -> Result<ConsoleClient, ClientError> {
        let endpoint = self
            .endpoint
            .filter(|e| !e.trim().is_empty())
            .ok_or_else(|| ClientError::Configuration("endpoint is required".into()))?;

        let mut client_builder = ClientBuilder::new();

        #[cfg(not(target_arch = "wasm32"))]
        if let Some(timeout) = self.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        #[cfg(target_arch = "wasm32")]
        let _ = self.timeout; // Timeouts not supported on WASM

        if let Some(user_agent) = self.user_agent {
            client_builder = client_builder.user_agent(user_agent);
        } else {
            client_builder = client_builder.user_agent("console-client/0.1.0");
        }

        let client = client_builder.build()?;

        Ok(ConsoleClient {
            client,
            endpoint,
            admin_secret: self.admin_secret,
            bearer_token: self.bearer_token,
            fetch_policy: self.fetch_policy,
            cache: self.cache.unwrap_or_default(),
        })
    }
}
