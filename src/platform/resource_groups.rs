//! Resource groups (resource controller)

use crate::cloud::client::CloudClient;
use crate::envelope::Envelope;
use crate::resource::kind::RESOURCE_GROUP;
use crate::resource::Collection;
use crate::Result;

/// Read-only accessor for account resource groups
#[derive(Clone)]
pub struct ResourceGroups {
    groups: Collection,
}

impl ResourceGroups {
    pub fn new(client: CloudClient) -> Self {
        Self {
            groups: Collection::new(client, &RESOURCE_GROUP),
        }
    }

    pub async fn list(&self) -> Result<Envelope> {
        self.groups.list().await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Envelope> {
        self.groups.get_by_id(id).await
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Envelope> {
        self.groups.get_by_name(name).await
    }

    pub async fn get(&self, name_or_id: &str) -> Result<Envelope> {
        self.groups.get(name_or_id).await
    }

    /// The account's default group (`"default": true`)
    pub async fn get_default(&self) -> Result<Envelope> {
        let data = match self.groups.list().await? {
            Envelope::Success { data } => data,
            failure => return Ok(failure),
        };

        let default = data.as_array().and_then(|groups| {
            groups
                .iter()
                .find(|g| g.get("default").and_then(|v| v.as_bool()) == Some(true))
        });

        match default {
            Some(group) => Ok(Envelope::success(group.clone())),
            None => Ok(Envelope::not_found("account has no default resource group")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloud::fake::ScriptedQuery;
    use crate::cloud::query::Method;
    use serde_json::json;

    #[tokio::test]
    async fn default_group_is_found() {
        let (client, fake) = ScriptedQuery::client();
        fake.on(
            Method::Get,
            "/v2/resource_groups",
            200,
            json!({"resources": [
                {"id": "g1", "name": "dev", "default": false},
                {"id": "g2", "name": "Default", "default": true}
            ]}),
        );

        let envelope = ResourceGroups::new(client).get_default().await.unwrap();
        assert_eq!(envelope.record_id(), Some("g2"));
    }

    #[tokio::test]
    async fn missing_default_is_not_found() {
        let (client, fake) = ScriptedQuery::client();
        fake.on(Method::Get, "/v2/resource_groups", 200, json!({"resources": []}));

        let envelope = ResourceGroups::new(client).get_default().await.unwrap();
        assert!(envelope.is_not_found());
    }

    #[tokio::test]
    async fn group_lookup_falls_back_to_id() {
        let (client, fake) = ScriptedQuery::client();
        fake.on(Method::Get, "/v2/resource_groups", 200, json!({"resources": [{"id": "g1", "name": "dev"}]}));
        fake.on(Method::Get, "/v2/resource_groups/g1", 200, json!({"id": "g1", "name": "dev"}));

        let envelope = ResourceGroups::new(client).get("g1").await.unwrap();
        assert_eq!(envelope.record_id(), Some("g1"));
        assert_eq!(fake.count(Method::Get, "/v2/resource_groups/g1"), 1);
    }
}
