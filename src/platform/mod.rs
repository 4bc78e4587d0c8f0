//! Resource controller accessors
//!
//! Account-level resources served from `/v2/...`. These calls carry no
//! version/generation pair.

pub mod resource_groups;
pub mod resource_instances;

use crate::cloud::client::CloudClient;
pub use resource_groups::ResourceGroups;
pub use resource_instances::{ResourceInstanceOptions, ResourceInstances};

impl CloudClient {
    pub fn resource_groups(&self) -> ResourceGroups {
        ResourceGroups::new(self.clone())
    }

    pub fn resource_instances(&self) -> ResourceInstances {
        ResourceInstances::new(self.clone())
    }
}
