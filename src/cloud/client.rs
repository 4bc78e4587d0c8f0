//! Cloud Client
//!
//! Main client for the provider APIs, combining authentication, the Query
//! Wrapper and configuration. Accessors borrow a client and never hold
//! state of their own.

use super::auth::{Authenticator, BearerToken};
use super::http::HttpQueryWrapper;
use super::query::{Endpoint, Method, QueryWrapper, Reply, Service};
use crate::config::Config;
use crate::Result;
use serde_json::Value;
use std::sync::Arc;

/// Main cloud client
#[derive(Clone)]
pub struct CloudClient {
    query: Arc<dyn QueryWrapper>,
    auth: Arc<dyn Authenticator>,
    config: Arc<Config>,
}

impl CloudClient {
    /// Create a client from explicit collaborators
    pub fn new(
        query: Arc<dyn QueryWrapper>,
        auth: Arc<dyn Authenticator>,
        config: Config,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            query,
            auth,
            config: Arc::new(config),
        })
    }

    /// Create a client talking HTTP with a fixed bearer token
    pub fn with_token(token: &str, config: Config) -> Result<Self> {
        let query = HttpQueryWrapper::new(&config)?;
        Self::new(Arc::new(query), Arc::new(BearerToken::new(token)), config)
    }

    /// Create a client from the config file, environment and `IBMCLOUD_IAM_TOKEN`
    pub fn from_env() -> Result<Self> {
        let config = Config::load()?;
        let query = HttpQueryWrapper::new(&config)?;
        Self::new(Arc::new(query), Arc::new(BearerToken::from_env()?), config)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Send a call through the Query Wrapper with fresh auth headers
    pub async fn send(&self, endpoint: &Endpoint, payload: Option<&Value>) -> Result<Reply> {
        let headers = self.auth.headers().await?;
        let reply = self.query.query(endpoint, &headers, payload).await?;
        tracing::debug!(
            "{} {} {} -> {}",
            endpoint.service,
            endpoint.method,
            endpoint.path,
            reply.status
        );
        Ok(reply)
    }

    /// Make a GET request
    pub async fn get(&self, endpoint: Endpoint) -> Result<Reply> {
        self.send(&endpoint, None).await
    }

    /// Make a POST request
    pub async fn post(&self, endpoint: Endpoint, body: &Value) -> Result<Reply> {
        self.send(&endpoint, Some(body)).await
    }

    /// Make a DELETE request
    pub async fn delete(&self, endpoint: Endpoint) -> Result<Reply> {
        self.send(&endpoint, None).await
    }

    // =========================================================================
    // Endpoint helpers
    // =========================================================================

    /// Versioned iaas endpoint for `/v1/<segments...>`
    pub fn iaas(&self, method: Method, segments: &[&str]) -> Endpoint {
        Endpoint::new(Service::Iaas, method, build_path("v1", segments))
            .with_version(Some(self.config.api_version()))
    }

    /// Resource controller endpoint for `/v2/<segments...>`
    pub fn resource_controller(&self, method: Method, segments: &[&str]) -> Endpoint {
        Endpoint::new(Service::ResourceController, method, build_path("v2", segments))
    }

    /// Endpoint for `segments` on the given service
    pub fn endpoint(&self, service: Service, method: Method, segments: &[&str]) -> Endpoint {
        match service {
            Service::Iaas => self.iaas(method, segments),
            Service::ResourceController => self.resource_controller(method, segments),
        }
    }
}

/// Join path segments, percent-encoding each one
fn build_path(prefix: &str, segments: &[&str]) -> String {
    let mut path = format!("/{}", prefix);
    for segment in segments {
        path.push('/');
        path.push_str(&urlencoding::encode(segment));
    }
    path
}
