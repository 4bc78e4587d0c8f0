//! Generic resource collection
//!
//! Implements list, lookup and delete once for every [`ResourceKind`].
//! Per-kind accessors wrap a [`Collection`] and add their create options.

use super::kind::ResourceKind;
use super::resolver;
use crate::cloud::client::CloudClient;
use crate::cloud::query::{Endpoint, Method};
use crate::envelope::Envelope;
use crate::Result;
use serde_json::Value;
use std::collections::HashSet;
use url::Url;

/// Base used to resolve relative continuation links
const LINK_BASE: &str = "https://link.invalid/";

/// Fetch every page of a listing and concatenate the records in order.
///
/// Follows `next.href` (iaas) or `next_url` (resource controller) until the
/// provider stops sending one, or sends a link to a page already fetched.
/// A failure on any page is returned as is.
pub async fn fetch_all(
    client: &CloudClient,
    endpoint: Endpoint,
    collection_key: &str,
) -> Result<Envelope> {
    let mut all_items: Vec<Value> = Vec::new();
    let mut page_params: Vec<(String, String)> = Vec::new();
    let mut visited: HashSet<Vec<(String, String)>> = HashSet::new();

    loop {
        visited.insert(page_params.clone());
        let mut page = endpoint.clone();
        page.params.extend(page_params.iter().cloned());

        let data = match Envelope::from_reply(client.get(page).await?) {
            Envelope::Success { data } => data,
            failure => return Ok(failure),
        };

        if let Some(items) = data.get(collection_key).and_then(|v| v.as_array()) {
            all_items.extend(items.iter().cloned());
        }

        match next_page_params(&data)? {
            Some(next) if next.is_empty() => break,
            Some(next) if visited.contains(&next) => {
                tracing::warn!("{} continuation link revisits a fetched page, stopping", collection_key);
                break;
            },
            Some(next) => page_params = next,
            None => break,
        }
    }

    tracing::debug!("Fetched {} {} records", all_items.len(), collection_key);
    Ok(Envelope::success(Value::Array(all_items)))
}

/// Query parameters of the continuation link, minus version/generation
fn next_page_params(body: &Value) -> Result<Option<Vec<(String, String)>>> {
    let link = body
        .get("next")
        .and_then(|next| next.get("href"))
        .and_then(|v| v.as_str())
        .or_else(|| body.get("next_url").and_then(|v| v.as_str()));

    let Some(link) = link else {
        return Ok(None);
    };

    let url = Url::parse(LINK_BASE)?.join(link)?;
    let params = url
        .query_pairs()
        .filter(|(key, _)| key != "version" && key != "generation")
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    Ok(Some(params))
}

/// First record whose `name` equals `name` exactly
pub fn find_by_name<'v>(items: &'v [Value], name: &str) -> Option<&'v Value> {
    items
        .iter()
        .find(|item| item.get("name").and_then(|v| v.as_str()) == Some(name))
}

/// List, lookup and delete for one resource kind
#[derive(Clone)]
pub struct Collection {
    client: CloudClient,
    kind: &'static ResourceKind,
}

impl Collection {
    pub fn new(client: CloudClient, kind: &'static ResourceKind) -> Self {
        Self { client, kind }
    }

    pub fn client(&self) -> &CloudClient {
        &self.client
    }

    pub fn kind(&self) -> &'static ResourceKind {
        self.kind
    }

    /// Endpoint for `<plural>/<segments...>`
    pub fn endpoint(&self, method: Method, segments: &[&str]) -> Endpoint {
        let mut path: Vec<&str> = Vec::with_capacity(segments.len() + 1);
        path.push(self.kind.plural);
        path.extend_from_slice(segments);
        self.client.endpoint(self.kind.service, method, &path)
    }

    /// Every record of this kind, as an ordered array
    pub async fn list(&self) -> Result<Envelope> {
        fetch_all(
            &self.client,
            self.endpoint(Method::Get, &[]),
            self.kind.collection_key,
        )
        .await
    }

    /// Record with the given id
    pub async fn get_by_id(&self, id: &str) -> Result<Envelope> {
        let reply = self.client.get(self.endpoint(Method::Get, &[id])).await?;
        Ok(Envelope::from_reply(reply))
    }

    /// Record whose name matches exactly; lists then scans
    pub async fn get_by_name(&self, name: &str) -> Result<Envelope> {
        let data = match self.list().await? {
            Envelope::Success { data } => data,
            failure => return Ok(failure),
        };

        let items = data.as_array().map(Vec::as_slice).unwrap_or_default();
        match find_by_name(items, name) {
            Some(record) => Ok(Envelope::success(record.clone())),
            None => Ok(Envelope::not_found(format!(
                "no {} named {}",
                self.kind.label, name
            ))),
        }
    }

    /// Record matching `name_or_id`, name first
    pub async fn get(&self, name_or_id: &str) -> Result<Envelope> {
        resolver::resolve(
            name_or_id,
            || self.get_by_name(name_or_id),
            || self.get_by_id(name_or_id),
        )
        .await
    }

    /// POST a create payload to the collection
    pub async fn create(&self, payload: &Value) -> Result<Envelope> {
        tracing::info!("Creating {}", self.kind.label);
        let reply = self
            .client
            .post(self.endpoint(Method::Post, &[]), payload)
            .await?;
        Ok(Envelope::from_reply(reply))
    }

    /// Resolve `name_or_id`, then DELETE the record.
    ///
    /// 204 answers `{"status": "deleted"}`; any other reply is passed through.
    pub async fn delete(&self, name_or_id: &str) -> Result<Envelope> {
        let id = match self.get(name_or_id).await?.into_id() {
            Ok(id) => id,
            Err(failure) => return Ok(failure),
        };

        tracing::info!("Deleting {} {}", self.kind.label, id);
        let reply = self.client.delete(self.endpoint(Method::Delete, &[&id])).await?;
        if reply.status == 204 {
            return Ok(Envelope::deleted());
        }
        Ok(Envelope::from_reply(reply))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloud::fake::ScriptedQuery;
    use crate::resource::kind::{KEY, RESOURCE_GROUP};
    use serde_json::json;

    fn keys() -> (Collection, std::sync::Arc<ScriptedQuery>) {
        let (client, fake) = ScriptedQuery::client();
        (Collection::new(client, &KEY), fake)
    }

    #[tokio::test]
    async fn empty_listing_is_success_with_empty_array() {
        let (keys, fake) = keys();
        fake.on(Method::Get, "/v1/keys", 200, json!({"keys": [], "limit": 50}));

        let envelope = keys.list().await.unwrap();
        assert_eq!(envelope, Envelope::success(json!([])));
    }

    #[tokio::test]
    async fn list_follows_next_links_in_order() {
        let (keys, fake) = keys();
        fake.on(
            Method::Get,
            "/v1/keys",
            200,
            json!({
                "keys": [{"id": "k-1"}, {"id": "k-2"}],
                "next": {"href": "https://us-south.iaas.cloud.ibm.com/v1/keys?start=page2&limit=2&version=2021-06-08&generation=2"}
            }),
        );
        fake.on(Method::Get, "/v1/keys", 200, json!({"keys": [{"id": "k-3"}]}));

        let envelope = keys.list().await.unwrap();
        assert_eq!(
            envelope.data(),
            Some(&json!([{"id": "k-1"}, {"id": "k-2"}, {"id": "k-3"}]))
        );

        let calls = fake.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(
            calls[1].path_and_query,
            "/v1/keys?version=2021-06-08&generation=2&start=page2&limit=2"
        );
    }

    #[tokio::test]
    async fn relative_next_url_is_followed() {
        let (client, fake) = ScriptedQuery::client();
        let groups = Collection::new(client, &RESOURCE_GROUP);
        fake.on(
            Method::Get,
            "/v2/resource_groups",
            200,
            json!({"resources": [{"id": "g1"}], "next_url": "/v2/resource_groups?next_docid=abc"}),
        );
        fake.on(
            Method::Get,
            "/v2/resource_groups",
            200,
            json!({"resources": [{"id": "g2"}], "next_url": null}),
        );

        let envelope = groups.list().await.unwrap();
        assert_eq!(envelope.data(), Some(&json!([{"id": "g1"}, {"id": "g2"}])));
        assert_eq!(fake.calls()[1].path_and_query, "/v2/resource_groups?next_docid=abc");
    }

    #[tokio::test]
    async fn cycling_next_links_stop_at_first_revisit() {
        let (keys, fake) = keys();
        let page = |id: &str, start: &str| {
            json!({
                "keys": [{"id": id}],
                "next": {"href": format!("https://us-south.iaas.cloud.ibm.com/v1/keys?start={}", start)}
            })
        };
        fake.on(Method::Get, "/v1/keys", 200, page("k-1", "a"));
        fake.on(Method::Get, "/v1/keys", 200, page("k-2", "b"));
        fake.on(Method::Get, "/v1/keys", 200, page("k-3", "a"));

        let envelope = keys.list().await.unwrap();
        assert_eq!(
            envelope.data(),
            Some(&json!([{"id": "k-1"}, {"id": "k-2"}, {"id": "k-3"}]))
        );
        assert_eq!(fake.count(Method::Get, "/v1/keys"), 3);
    }

    #[tokio::test]
    async fn failing_page_is_returned() {
        let (keys, fake) = keys();
        fake.on(
            Method::Get,
            "/v1/keys",
            500,
            json!({"errors": [{"code": "internal_error", "message": "boom"}]}),
        );

        let envelope = keys.list().await.unwrap();
        assert_eq!(envelope.errors().unwrap()[0].code, "internal_error");
    }

    #[tokio::test]
    async fn list_propagates_transport_failure() {
        let (keys, fake) = keys();
        fake.fail(Method::Get, "/v1/keys");
        assert!(keys.list().await.is_err());
    }

    #[tokio::test]
    async fn get_by_id_returns_record() {
        let (keys, fake) = keys();
        fake.on(Method::Get, "/v1/keys/k-1", 200, json!({"id": "k-1", "name": "alpha"}));

        let envelope = keys.get_by_id("k-1").await.unwrap();
        assert_eq!(envelope.record_id(), Some("k-1"));
    }

    #[tokio::test]
    async fn get_by_name_scans_listing() {
        let (keys, fake) = keys();
        fake.on(
            Method::Get,
            "/v1/keys",
            200,
            json!({"keys": [{"id": "k-1", "name": "alpha"}, {"id": "k-2", "name": "beta"}]}),
        );

        let envelope = keys.get_by_name("beta").await.unwrap();
        assert_eq!(envelope.record_id(), Some("k-2"));
    }

    #[tokio::test]
    async fn get_by_name_requires_exact_match() {
        let (keys, fake) = keys();
        fake.on(Method::Get, "/v1/keys", 200, json!({"keys": [{"id": "k-1", "name": "alpha"}]}));

        let envelope = keys.get_by_name("alph").await.unwrap();
        assert!(envelope.is_not_found());
    }

    #[tokio::test]
    async fn delete_maps_204_to_deleted() {
        let (keys, fake) = keys();
        fake.on(Method::Get, "/v1/keys", 200, json!({"keys": [{"id": "k-1", "name": "alpha"}]}));
        fake.on(Method::Delete, "/v1/keys/k-1", 204, Value::Null);

        let envelope = keys.delete("alpha").await.unwrap();
        assert_eq!(envelope, Envelope::deleted());
    }

    #[tokio::test]
    async fn delete_passes_404_body_through() {
        let (keys, fake) = keys();
        let denial = json!({
            "errors": [{
                "code": "forbidden",
                "message": "Forbidden",
                "target": {"name": "id", "type": "parameter", "value": "k-1"}
            }],
            "trace": "7a1b"
        });
        fake.on(Method::Get, "/v1/keys", 200, json!({"keys": [{"id": "k-1", "name": "alpha"}]}));
        fake.on(Method::Delete, "/v1/keys/k-1", 404, denial.clone());

        let envelope = keys.delete("alpha").await.unwrap();
        assert_eq!(serde_json::to_value(&envelope).unwrap(), denial);
    }

    #[tokio::test]
    async fn delete_of_unknown_record_issues_no_delete() {
        let (keys, fake) = keys();
        fake.on(Method::Get, "/v1/keys", 200, json!({"keys": []}));

        let envelope = keys.delete("ghost").await.unwrap();
        assert!(envelope.is_not_found());
        assert_eq!(fake.count(Method::Delete, "/v1/keys/ghost"), 0);
    }

    #[test]
    fn find_by_name_ignores_records_without_name() {
        let items = vec![json!({"id": "a"}), json!({"id": "b", "name": "x"})];
        assert_eq!(find_by_name(&items, "x"), Some(&items[1]));
        assert_eq!(find_by_name(&items, "a"), None);
    }
}
