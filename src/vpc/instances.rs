//! Virtual server instances
//!
//! Besides the collection operations this accessor covers instance
//! profiles, network interfaces, volume attachments, initialization data
//! and start/stop/reboot actions. Every per-instance call accepts a name
//! or an id and resolves it first.

use super::images::Images;
use super::keys::Keys;
use crate::cloud::client::CloudClient;
use crate::cloud::query::Method;
use crate::envelope::Envelope;
use crate::platform::ResourceGroups;
use crate::resource::kind::INSTANCE;
use crate::resource::{fetch_all, Collection, Identity};
use crate::Result;
use serde::Serialize;
use std::fmt;

/// Options for creating an instance
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstanceOptions {
    pub name: Option<String>,
    /// Profile name, e.g. `bx2-2x8`
    pub profile: String,
    /// Zone name
    pub zone: String,
    /// VPC id
    pub vpc: String,
    /// Subnet id of the primary network interface
    pub subnet: String,
    /// Image name or id
    pub image: String,
    /// Key names or ids
    pub keys: Vec<String>,
    /// Resource group name or id
    pub resource_group: Option<String>,
    pub user_data: Option<String>,
}

#[derive(Serialize)]
struct NetworkInterfacePrototype {
    subnet: Identity,
}

#[derive(Serialize)]
struct InstancePrototype<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    profile: Identity,
    zone: Identity,
    vpc: Identity,
    image: Identity,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    keys: Vec<Identity>,
    primary_network_interface: NetworkInterfacePrototype,
    #[serde(skip_serializing_if = "Option::is_none")]
    resource_group: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_data: Option<&'a str>,
}

/// Power actions accepted by `POST /instances/{id}/actions`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InstanceAction {
    Start,
    Stop,
    Reboot,
}

impl fmt::Display for InstanceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstanceAction::Start => f.write_str("start"),
            InstanceAction::Stop => f.write_str("stop"),
            InstanceAction::Reboot => f.write_str("reboot"),
        }
    }
}

#[derive(Serialize)]
struct ActionPrototype {
    #[serde(rename = "type")]
    action: InstanceAction,
    force: bool,
}

/// Accessor for instances
#[derive(Clone)]
pub struct Instances {
    instances: Collection,
    images: Images,
    keys: Keys,
    groups: ResourceGroups,
}

impl Instances {
    pub fn new(client: CloudClient) -> Self {
        Self {
            images: Images::new(client.clone()),
            keys: Keys::new(client.clone()),
            groups: ResourceGroups::new(client.clone()),
            instances: Collection::new(client, &INSTANCE),
        }
    }

    fn client(&self) -> &CloudClient {
        self.instances.client()
    }

    pub async fn list(&self) -> Result<Envelope> {
        self.instances.list().await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Envelope> {
        self.instances.get_by_id(id).await
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Envelope> {
        self.instances.get_by_name(name).await
    }

    pub async fn get(&self, name_or_id: &str) -> Result<Envelope> {
        self.instances.get(name_or_id).await
    }

    /// Create an instance.
    ///
    /// The resource group, image and each key are resolved in that order;
    /// the first failed resolution is returned and nothing is created.
    pub async fn create(&self, options: &InstanceOptions) -> Result<Envelope> {
        let resource_group = match &options.resource_group {
            Some(group) => match self.groups.get(group).await?.into_id() {
                Ok(id) => Some(Identity::id(id)),
                Err(failure) => return Ok(failure),
            },
            None => None,
        };

        let image = match self.images.get(&options.image).await?.into_id() {
            Ok(id) => Identity::id(id),
            Err(failure) => return Ok(failure),
        };

        let mut keys = Vec::with_capacity(options.keys.len());
        for key in &options.keys {
            match self.keys.get(key).await?.into_id() {
                Ok(id) => keys.push(Identity::id(id)),
                Err(failure) => return Ok(failure),
            }
        }

        let prototype = InstancePrototype {
            name: options.name.as_deref(),
            profile: Identity::name(options.profile.as_str()),
            zone: Identity::name(options.zone.as_str()),
            vpc: Identity::id(options.vpc.as_str()),
            image,
            keys,
            primary_network_interface: NetworkInterfacePrototype {
                subnet: Identity::id(options.subnet.as_str()),
            },
            resource_group,
            user_data: options.user_data.as_deref(),
        };
        self.instances.create(&serde_json::to_value(&prototype)?).await
    }

    pub async fn delete(&self, name_or_id: &str) -> Result<Envelope> {
        self.instances.delete(name_or_id).await
    }

    /// Start, stop or reboot an instance
    pub async fn act(&self, instance: &str, action: InstanceAction, force: bool) -> Result<Envelope> {
        let id = match self.instances.get(instance).await?.into_id() {
            Ok(id) => id,
            Err(failure) => return Ok(failure),
        };

        tracing::info!("Instance {} action {}", id, action);
        let payload = serde_json::to_value(ActionPrototype { action, force })?;
        let endpoint = self.instances.endpoint(Method::Post, &[&id, "actions"]);
        let reply = self.client().post(endpoint, &payload).await?;
        Ok(Envelope::from_reply(reply))
    }

    pub async fn list_profiles(&self) -> Result<Envelope> {
        let endpoint = self.client().iaas(Method::Get, &["instance", "profiles"]);
        fetch_all(self.client(), endpoint, "profiles").await
    }

    /// Profiles are addressed by name
    pub async fn get_profile(&self, name: &str) -> Result<Envelope> {
        let endpoint = self.client().iaas(Method::Get, &["instance", "profiles", name]);
        Ok(Envelope::from_reply(self.client().get(endpoint).await?))
    }

    pub async fn get_interfaces(&self, instance: &str) -> Result<Envelope> {
        self.list_child(instance, "network_interfaces").await
    }

    pub async fn get_interface(&self, instance: &str, interface: &str) -> Result<Envelope> {
        self.get_child(instance, &["network_interfaces", interface]).await
    }

    pub async fn get_volume_attachments(&self, instance: &str) -> Result<Envelope> {
        self.list_child(instance, "volume_attachments").await
    }

    /// Keys and image used when the instance was provisioned
    pub async fn get_initialization(&self, instance: &str) -> Result<Envelope> {
        self.get_child(instance, &["initialization"]).await
    }

    async fn list_child(&self, instance: &str, plural: &str) -> Result<Envelope> {
        let id = match self.instances.get(instance).await?.into_id() {
            Ok(id) => id,
            Err(failure) => return Ok(failure),
        };

        let endpoint = self.instances.endpoint(Method::Get, &[&id, plural]);
        fetch_all(self.client(), endpoint, plural).await
    }

    async fn get_child(&self, instance: &str, segments: &[&str]) -> Result<Envelope> {
        let id = match self.instances.get(instance).await?.into_id() {
            Ok(id) => id,
            Err(failure) => return Ok(failure),
        };

        let mut path = vec![id.as_str()];
        path.extend_from_slice(segments);
        let reply = self.client().get(self.instances.endpoint(Method::Get, &path)).await?;
        Ok(Envelope::from_reply(reply))
    }
}
