//! Query Wrapper contract
//!
//! [`QueryWrapper`] is the single seam between accessors and the network.
//! Accessors describe a call with an [`Endpoint`] and get back a [`Reply`];
//! everything above this trait is transport-agnostic.

use crate::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Request headers handed to the Query Wrapper
pub type Headers = BTreeMap<String, String>;

/// Backend API a call is addressed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    /// Regional VPC infrastructure API (`/v1/...`)
    Iaas,
    /// Account-level resource controller API (`/v2/...`)
    ResourceController,
}

impl Service {
    pub fn as_str(&self) -> &'static str {
        match self {
            Service::Iaas => "iaas",
            Service::ResourceController => "resource_controller",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// HTTP verbs used by the provider APIs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `version`/`generation` pair appended to every iaas call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiVersion {
    pub version: String,
    pub generation: u8,
}

/// Endpoint Descriptor: everything needed to address one call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub service: Service,
    pub method: Method,
    /// Path without query string, e.g. `/v1/keys/r006-abc`
    pub path: String,
    pub api_version: Option<ApiVersion>,
    /// Extra query parameters, appended after `version` and `generation`
    pub params: Vec<(String, String)>,
}

impl Endpoint {
    pub fn new(service: Service, method: Method, path: impl Into<String>) -> Self {
        Self {
            service,
            method,
            path: path.into(),
            api_version: None,
            params: Vec::new(),
        }
    }

    pub fn with_version(mut self, api_version: Option<ApiVersion>) -> Self {
        self.api_version = api_version;
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Path plus query string as sent on the wire.
    ///
    /// `version` always precedes `generation`; the provider relies on it.
    pub fn path_and_query(&self) -> String {
        let mut query_parts: Vec<String> = Vec::new();

        if let Some(api_version) = &self.api_version {
            query_parts.push(format!("version={}", api_version.version));
            query_parts.push(format!("generation={}", api_version.generation));
        }
        for (key, value) in &self.params {
            query_parts.push(format!("{}={}", key, urlencoding::encode(value)));
        }

        if query_parts.is_empty() {
            self.path.clone()
        } else if self.path.contains('?') {
            format!("{}&{}", self.path, query_parts.join("&"))
        } else {
            format!("{}?{}", self.path, query_parts.join("&"))
        }
    }
}

/// Raw outcome of a call that reached the provider
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: u16,
    /// Parsed body, `Value::Null` when the body was empty
    pub data: Value,
}

impl Reply {
    pub fn new(status: u16, data: Value) -> Self {
        Self { status, data }
    }
}

/// Performs one HTTP call.
///
/// Implementations return `Ok` for every reply the provider sent, whatever
/// its status, and `Err` only when no reply could be obtained.
#[async_trait]
pub trait QueryWrapper: Send + Sync {
    async fn query(
        &self,
        endpoint: &Endpoint,
        headers: &Headers,
        payload: Option<&Value>,
    ) -> Result<Reply>;
}
