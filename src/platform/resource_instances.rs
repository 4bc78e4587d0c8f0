//! Resource instances (resource controller)
//!
//! Service instances provisioned from the catalog. Ids are CRNs, so path
//! segments are always percent-encoded.

use super::resource_groups::ResourceGroups;
use crate::cloud::client::CloudClient;
use crate::envelope::Envelope;
use crate::resource::kind::RESOURCE_INSTANCE;
use crate::resource::Collection;
use crate::Result;
use serde::Serialize;
use serde_json::Value;

/// Options for provisioning a resource instance
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceInstanceOptions {
    pub name: String,
    /// Deployment target, e.g. `us-south` or `global`
    pub target: String,
    /// Resource group name or id
    pub resource_group: String,
    pub resource_plan_id: String,
    pub tags: Vec<String>,
    pub parameters: Option<Value>,
}

#[derive(Serialize)]
struct ResourceInstancePrototype<'a> {
    name: &'a str,
    target: &'a str,
    resource_group: String,
    resource_plan_id: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    parameters: Option<&'a Value>,
}

/// Accessor for resource instances
#[derive(Clone)]
pub struct ResourceInstances {
    instances: Collection,
    groups: ResourceGroups,
}

impl ResourceInstances {
    pub fn new(client: CloudClient) -> Self {
        Self {
            groups: ResourceGroups::new(client.clone()),
            instances: Collection::new(client, &RESOURCE_INSTANCE),
        }
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

    /// Provision an instance; the resource group must resolve first
    pub async fn create(&self, options: &ResourceInstanceOptions) -> Result<Envelope> {
        let group_id = match self.groups.get(&options.resource_group).await?.into_id() {
            Ok(id) => id,
            Err(failure) => return Ok(failure),
        };

        let prototype = ResourceInstancePrototype {
            name: &options.name,
            target: &options.target,
            resource_group: group_id,
            resource_plan_id: &options.resource_plan_id,
            tags: options.tags.clone(),
            parameters: options.parameters.as_ref(),
        };
        self.instances.create(&serde_json::to_value(&prototype)?).await
    }

    pub async fn delete(&self, name_or_id: &str) -> Result<Envelope> {
        self.instances.delete(name_or_id).await
    }
}
