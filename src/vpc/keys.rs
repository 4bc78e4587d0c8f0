//! SSH keys

use crate::cloud::client::CloudClient;
use crate::envelope::Envelope;
use crate::platform::ResourceGroups;
use crate::resource::kind::KEY;
use crate::resource::{Collection, Identity};
use crate::Result;
use serde::Serialize;

/// Options for creating a key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyOptions {
    pub name: String,
    pub public_key: String,
    /// Resource group name or id; the account default when absent
    pub resource_group: Option<String>,
    /// Key crypto type, e.g. `rsa` or `ed25519`
    pub key_type: Option<String>,
}

#[derive(Serialize)]
struct KeyPrototype<'a> {
    name: &'a str,
    public_key: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    resource_group: Option<Identity>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    key_type: Option<&'a str>,
}

/// Accessor for SSH keys
#[derive(Clone)]
pub struct Keys {
    keys: Collection,
    groups: ResourceGroups,
}

impl Keys {
    pub fn new(client: CloudClient) -> Self {
        Self {
            groups: ResourceGroups::new(client.clone()),
            keys: Collection::new(client, &KEY),
        }
    }

    pub async fn list(&self) -> Result<Envelope> {
        self.keys.list().await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Envelope> {
        self.keys.get_by_id(id).await
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Envelope> {
        self.keys.get_by_name(name).await
    }

    pub async fn get(&self, name_or_id: &str) -> Result<Envelope> {
        self.keys.get(name_or_id).await
    }

    /// Create a key. An unresolvable resource group aborts before the POST.
    pub async fn create(&self, options: &KeyOptions) -> Result<Envelope> {
        let resource_group = match &options.resource_group {
            Some(group) => match self.groups.get(group).await?.into_id() {
                Ok(id) => Some(Identity::id(id)),
                Err(failure) => return Ok(failure),
            },
            None => None,
        };

        let prototype = KeyPrototype {
            name: &options.name,
            public_key: &options.public_key,
            resource_group,
            key_type: options.key_type.as_deref(),
        };
        self.keys.create(&serde_json::to_value(&prototype)?).await
    }

    pub async fn delete(&self, name_or_id: &str) -> Result<Envelope> {
        self.keys.delete(name_or_id).await
    }
}
