//! reqwest-backed Query Wrapper

use super::query::{Endpoint, Headers, Method, QueryWrapper, Reply, Service};
use crate::config::Config;
use crate::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use uuid::Uuid;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Sanitize response body for logging
/// Truncates long responses and strips control characters
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let mut end = MAX_LOG_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... [truncated, {} bytes total]", &body[..end], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// HTTP implementation of [`QueryWrapper`]
#[derive(Clone)]
pub struct HttpQueryWrapper {
    client: Client,
    iaas_endpoint: String,
    resource_controller_endpoint: String,
}

impl HttpQueryWrapper {
    /// Create a new HTTP query wrapper targeting the configured endpoints
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("ibmcloud-vpc/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            iaas_endpoint: trim_base(config.effective_iaas_endpoint()),
            resource_controller_endpoint: trim_base(config.effective_resource_controller_endpoint()),
        })
    }

    fn base_url(&self, service: Service) -> &str {
        match service {
            Service::Iaas => &self.iaas_endpoint,
            Service::ResourceController => &self.resource_controller_endpoint,
        }
    }

    /// Full URL for an endpoint
    pub fn url_for(&self, endpoint: &Endpoint) -> String {
        format!("{}{}", self.base_url(endpoint.service), endpoint.path_and_query())
    }
}

fn trim_base(base: String) -> String {
    base.trim_end_matches('/').to_string()
}

#[async_trait]
impl QueryWrapper for HttpQueryWrapper {
    async fn query(
        &self,
        endpoint: &Endpoint,
        headers: &Headers,
        payload: Option<&Value>,
    ) -> Result<Reply> {
        let url = self.url_for(endpoint);
        let correlation_id = Uuid::new_v4().to_string();
        tracing::debug!("{} {} [{}]", endpoint.method, url, correlation_id);

        let mut request = match endpoint.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Delete => self.client.delete(&url),
        };
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }
        request = request.header("X-Correlation-ID", correlation_id.as_str());
        if let Some(body) = payload {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // Security: Only log sanitized/truncated error body to avoid leaking sensitive data
            tracing::error!("API error: {} - {}", status, sanitize_for_log(&body));
        }

        // Handle empty response; non-JSON error pages are kept as text
        let data = if body.trim().is_empty() {
            Value::Null
        } else {
            match serde_json::from_str::<Value>(&body) {
                Ok(data) => data,
                Err(_) if !status.is_success() => Value::String(body),
                Err(e) => return Err(e.into()),
            }
        };

        Ok(Reply::new(status.as_u16(), data))
    }
}
