//! Scripted Query Wrapper used by unit tests

use super::auth::BearerToken;
use super::client::CloudClient;
use super::query::{Endpoint, Headers, Method, QueryWrapper, Reply};
use crate::config::Config;
use crate::{Error, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// A call seen by [`ScriptedQuery`]
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: Method,
    pub path: String,
    pub path_and_query: String,
    pub headers: Headers,
    pub payload: Option<Value>,
}

/// Answers calls from a `(method, path)` table.
///
/// Unscripted calls answer 404 with a provider `not_found` body. A route
/// scripted several times answers in order, repeating the last reply.
#[derive(Default)]
pub struct ScriptedQuery {
    routes: Mutex<HashMap<(Method, String), Vec<Option<Reply>>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedQuery {
    /// A client wired to a fresh fake
    pub fn client() -> (CloudClient, Arc<ScriptedQuery>) {
        let fake = Arc::new(ScriptedQuery::default());
        let client = CloudClient::new(
            fake.clone(),
            Arc::new(BearerToken::new("test-token")),
            Config::default(),
        )
        .expect("default config is valid");
        (client, fake)
    }

    /// Script a reply for `method` on `path` (path without query)
    pub fn on(&self, method: Method, path: &str, status: u16, data: Value) {
        self.push(method, path, Some(Reply::new(status, data)));
    }

    /// Script a transport failure for `method` on `path`
    pub fn fail(&self, method: Method, path: &str) {
        self.push(method, path, None);
    }

    fn push(&self, method: Method, path: &str, reply: Option<Reply>) {
        self.routes
            .lock()
            .unwrap()
            .entry((method, path.to_string()))
            .or_default()
            .push(reply);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, method: Method, path: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.method == method && c.path == path)
            .count()
    }
}

#[async_trait]
impl QueryWrapper for ScriptedQuery {
    async fn query(
        &self,
        endpoint: &Endpoint,
        headers: &Headers,
        payload: Option<&Value>,
    ) -> Result<Reply> {
        self.calls.lock().unwrap().push(RecordedCall {
            method: endpoint.method,
            path: endpoint.path.clone(),
            path_and_query: endpoint.path_and_query(),
            headers: headers.clone(),
            payload: payload.cloned(),
        });

        let mut routes = self.routes.lock().unwrap();
        let Some(replies) = routes.get_mut(&(endpoint.method, endpoint.path.clone())) else {
            return Ok(Reply::new(
                404,
                serde_json::json!({
                    "errors": [{"code": "not_found", "message": "unscripted route"}]
                }),
            ));
        };

        let reply = if replies.len() > 1 {
            replies.remove(0)
        } else {
            replies[0].clone()
        };
        reply.ok_or_else(|| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "scripted transport failure",
            ))
        })
    }
}
