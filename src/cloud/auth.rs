//! Request authentication
//!
//! Token acquisition lives outside this crate. An [`Authenticator`] only
//! turns whatever credential it holds into request headers.

use super::query::Headers;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Environment variable read by [`BearerToken::from_env`]
pub const TOKEN_ENV_VAR: &str = "IBMCLOUD_IAM_TOKEN";

/// Supplies the headers attached to every call
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Headers for the next call; must include `Authorization`
    async fn headers(&self) -> Result<Headers>;
}

/// IAM bearer token supplied by the caller
///
/// Clones share the same token, so an external refresher can call
/// [`BearerToken::set_token`] and every client picks it up.
#[derive(Clone)]
pub struct BearerToken {
    token: Arc<RwLock<String>>,
}

impl BearerToken {
    /// Wrap a token; a leading `Bearer ` prefix is stripped
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Arc::new(RwLock::new(normalize(token.into()))),
        }
    }

    /// Read the token from `IBMCLOUD_IAM_TOKEN`
    pub fn from_env() -> Result<Self> {
        let token = std::env::var(TOKEN_ENV_VAR)
            .map_err(|_| Error::auth(format!("{} is not set", TOKEN_ENV_VAR)))?;
        Ok(Self::new(token))
    }

    /// Replace the token after an external refresh
    pub async fn set_token(&self, token: impl Into<String>) {
        let mut current = self.token.write().await;
        *current = normalize(token.into());
        tracing::debug!("Bearer token replaced");
    }
}

fn normalize(token: String) -> String {
    match token.strip_prefix("Bearer ") {
        Some(stripped) => stripped.trim().to_string(),
        None => token.trim().to_string(),
    }
}

#[async_trait]
impl Authenticator for BearerToken {
    async fn headers(&self) -> Result<Headers> {
        let token = self.token.read().await;
        if token.is_empty() {
            return Err(Error::auth("bearer token is empty"));
        }

        let mut headers = Headers::new();
        headers.insert("Authorization".to_string(), format!("Bearer {}", token));
        headers.insert("Accept".to_string(), "application/json".to_string());
        Ok(headers)
    }
}
