//! Images and operating systems

use crate::cloud::client::CloudClient;
use crate::cloud::query::Method;
use crate::envelope::Envelope;
use crate::platform::ResourceGroups;
use crate::resource::kind::IMAGE;
use crate::resource::{fetch_all, Collection, Identity};
use crate::Result;
use serde::Serialize;

/// Options for importing an image from object storage
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageOptions {
    pub name: String,
    /// Object storage location, e.g. `cos://us-south/bucket/image.qcow2`
    pub file: String,
    /// Operating system name, e.g. `ubuntu-22-04-amd64`
    pub operating_system: String,
    pub resource_group: Option<String>,
}

#[derive(Serialize)]
struct ImagePrototype<'a> {
    name: &'a str,
    file: Identity,
    operating_system: Identity,
    #[serde(skip_serializing_if = "Option::is_none")]
    resource_group: Option<Identity>,
}

/// Accessor for images
#[derive(Clone)]
pub struct Images {
    images: Collection,
    groups: ResourceGroups,
}

impl Images {
    pub fn new(client: CloudClient) -> Self {
        Self {
            groups: ResourceGroups::new(client.clone()),
            images: Collection::new(client, &IMAGE),
        }
    }

    pub async fn list(&self) -> Result<Envelope> {
        self.images.list().await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Envelope> {
        self.images.get_by_id(id).await
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Envelope> {
        self.images.get_by_name(name).await
    }

    pub async fn get(&self, name_or_id: &str) -> Result<Envelope> {
        self.images.get(name_or_id).await
    }

    pub async fn create(&self, options: &ImageOptions) -> Result<Envelope> {
        let resource_group = match &options.resource_group {
            Some(group) => match self.groups.get(group).await?.into_id() {
                Ok(id) => Some(Identity::id(id)),
                Err(failure) => return Ok(failure),
            },
            None => None,
        };

        let prototype = ImagePrototype {
            name: &options.name,
            file: Identity::href(options.file.as_str()),
            operating_system: Identity::name(options.operating_system.as_str()),
            resource_group,
        };
        self.images.create(&serde_json::to_value(&prototype)?).await
    }

    pub async fn delete(&self, name_or_id: &str) -> Result<Envelope> {
        self.images.delete(name_or_id).await
    }

    pub async fn list_operating_systems(&self) -> Result<Envelope> {
        let endpoint = self.images.client().iaas(Method::Get, &["operating_systems"]);
        fetch_all(self.images.client(), endpoint, "operating_systems").await
    }

    /// Operating systems are addressed by name
    pub async fn get_operating_system(&self, name: &str) -> Result<Envelope> {
        let endpoint = self.images.client().iaas(Method::Get, &["operating_systems", name]);
        let reply = self.images.client().get(endpoint).await?;
        Ok(Envelope::from_reply(reply))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloud::fake::ScriptedQuery;
    use serde_json::json;

    #[tokio::test]
    async fn create_builds_file_and_os_references() {
        let (client, fake) = ScriptedQuery::client();
        fake.on(Method::Post, "/v1/images", 201, json!({"id": "r006-img", "status": "pending"}));

        let options = ImageOptions {
            name: "golden".to_string(),
            file: "cos://us-south/images/golden.qcow2".to_string(),
            operating_system: "ubuntu-22-04-amd64".to_string(),
            resource_group: None,
        };
        let envelope = Images::new(client).create(&options).await.unwrap();
        assert_eq!(envelope.record_id(), Some("r006-img"));

        assert_eq!(
            fake.calls()[0].payload,
            Some(json!({
                "name": "golden",
                "file": {"href": "cos://us-south/images/golden.qcow2"},
                "operating_system": {"name": "ubuntu-22-04-amd64"}
            }))
        );
    }

    #[tokio::test]
    async fn unknown_resource_group_aborts_without_post() {
        let (client, fake) = ScriptedQuery::client();
        fake.on(Method::Get, "/v2/resource_groups", 200, json!({"resources": []}));

        let options = ImageOptions {
            name: "golden".to_string(),
            file: "cos://us-south/images/golden.qcow2".to_string(),
            operating_system: "ubuntu-22-04-amd64".to_string(),
            resource_group: Some("rg1".to_string()),
        };
        let envelope = Images::new(client).create(&options).await.unwrap();

        assert!(envelope.is_not_found());
        assert_eq!(fake.count(Method::Post, "/v1/images"), 0);
    }

    #[tokio::test]
    async fn operating_system_is_fetched_by_name() {
        let (client, fake) = ScriptedQuery::client();
        fake.on(
            Method::Get,
            "/v1/operating_systems/ubuntu-22-04-amd64",
            200,
            json!({"name": "ubuntu-22-04-amd64", "family": "Ubuntu Linux"}),
        );

        let envelope = Images::new(client)
            .get_operating_system("ubuntu-22-04-amd64")
            .await
            .unwrap();
        assert_eq!(envelope.data().unwrap()["family"], "Ubuntu Linux");
    }

    #[tokio::test]
    async fn unpredictable_listing_error_stops_lookup() {
        let (client, fake) = ScriptedQuery::client();
        fake.on(
            Method::Get,
            "/v1/images",
            503,
            json!({"errors": [{"code": "service_unavailable", "message": "try later"}]}),
        );

        let envelope = Images::new(client).get("golden").await.unwrap();
        assert_eq!(envelope.errors().unwrap()[0].code, "service_unavailable");
        assert_eq!(fake.count(Method::Get, "/v1/images/golden"), 0);
    }
}
