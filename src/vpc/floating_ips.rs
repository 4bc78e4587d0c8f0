//! Floating IPs

use crate::cloud::client::CloudClient;
use crate::envelope::Envelope;
use crate::platform::ResourceGroups;
use crate::resource::kind::FLOATING_IP;
use crate::resource::{Collection, Identity};
use crate::Result;
use serde::Serialize;

/// Where a reserved floating IP lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// Unbound, reserved in a zone (zone name)
    Zone(String),
    /// Bound to a network interface (interface id)
    Target(String),
}

/// Options for reserving a floating IP
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloatingIpOptions {
    pub name: Option<String>,
    pub placement: Placement,
    pub resource_group: Option<String>,
}

#[derive(Serialize)]
struct FloatingIpPrototype<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    zone: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    target: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    resource_group: Option<Identity>,
}

/// Accessor for floating IPs
#[derive(Clone)]
pub struct FloatingIps {
    ips: Collection,
    groups: ResourceGroups,
}

impl FloatingIps {
    pub fn new(client: CloudClient) -> Self {
        Self {
            groups: ResourceGroups::new(client.clone()),
            ips: Collection::new(client, &FLOATING_IP),
        }
    }

    pub async fn list(&self) -> Result<Envelope> {
        self.ips.list().await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Envelope> {
        self.ips.get_by_id(id).await
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Envelope> {
        self.ips.get_by_name(name).await
    }

    pub async fn get(&self, name_or_id: &str) -> Result<Envelope> {
        self.ips.get(name_or_id).await
    }

    /// Reserve a floating IP in a zone or bound to an interface
    pub async fn reserve(&self, options: &FloatingIpOptions) -> Result<Envelope> {
        let resource_group = match &options.resource_group {
            Some(group) => match self.groups.get(group).await?.into_id() {
                Ok(id) => Some(Identity::id(id)),
                Err(failure) => return Ok(failure),
            },
            None => None,
        };

        let (zone, target) = match &options.placement {
            Placement::Zone(zone) => (Some(Identity::name(zone.as_str())), None),
            Placement::Target(nic) => (None, Some(Identity::id(nic.as_str()))),
        };

        let prototype = FloatingIpPrototype {
            name: options.name.as_deref(),
            zone,
            target,
            resource_group,
        };
        self.ips.create(&serde_json::to_value(&prototype)?).await
    }

    /// Release (delete) a floating IP
    pub async fn release(&self, name_or_id: &str) -> Result<Envelope> {
        self.ips.delete(name_or_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloud::fake::ScriptedQuery;
    use crate::cloud::query::Method;
    use serde_json::{json, Value};

    #[tokio::test]
    async fn zone_placement_sends_zone_name() {
        let (client, fake) = ScriptedQuery::client();
        fake.on(Method::Post, "/v1/floating_ips", 201, json!({"id": "r006-fip", "address": "169.61.1.1"}));

        let options = FloatingIpOptions {
            name: Some("edge".to_string()),
            placement: Placement::Zone("us-south-1".to_string()),
            resource_group: None,
        };
        FloatingIps::new(client).reserve(&options).await.unwrap();

        assert_eq!(
            fake.calls()[0].payload,
            Some(json!({"name": "edge", "zone": {"name": "us-south-1"}}))
        );
    }

    #[tokio::test]
    async fn target_placement_sends_interface_id() {
        let (client, fake) = ScriptedQuery::client();
        fake.on(Method::Post, "/v1/floating_ips", 201, json!({"id": "r006-fip"}));

        let options = FloatingIpOptions {
            name: None,
            placement: Placement::Target("0717-nic".to_string()),
            resource_group: None,
        };
        FloatingIps::new(client).reserve(&options).await.unwrap();

        assert_eq!(fake.calls()[0].payload, Some(json!({"target": {"id": "0717-nic"}})));
    }

    #[tokio::test]
    async fn unknown_resource_group_aborts_without_post() {
        let (client, fake) = ScriptedQuery::client();
        fake.on(Method::Get, "/v2/resource_groups", 200, json!({"resources": []}));

        let options = FloatingIpOptions {
            name: Some("edge".to_string()),
            placement: Placement::Zone("us-south-1".to_string()),
            resource_group: Some("rg1".to_string()),
        };
        let envelope = FloatingIps::new(client).reserve(&options).await.unwrap();

        assert!(envelope.is_not_found());
        assert_eq!(fake.count(Method::Post, "/v1/floating_ips"), 0);
    }

    #[tokio::test]
    async fn release_maps_204_to_deleted() {
        let (client, fake) = ScriptedQuery::client();
        fake.on(
            Method::Get,
            "/v1/floating_ips",
            200,
            json!({"floating_ips": [{"id": "r006-fip", "name": "edge"}]}),
        );
        fake.on(Method::Delete, "/v1/floating_ips/r006-fip", 204, Value::Null);

        let envelope = FloatingIps::new(client).release("edge").await.unwrap();
        assert_eq!(envelope, Envelope::deleted());
    }
}
