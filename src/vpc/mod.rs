//! VPC infrastructure accessors
//!
//! Regional resources served from `/v1/...`. Every call carries the
//! configured `version` and `generation` query parameters.
//!
//! # Module Structure
//!
//! - [`geo`] - Regions and the zones under them
//! - [`instances`] - Virtual server instances, profiles and actions
//! - [`images`] - Images and operating systems
//! - [`keys`] - SSH keys
//! - [`floating_ips`] - Floating IP reservation and release

pub mod floating_ips;
pub mod geo;
pub mod images;
pub mod instances;
pub mod keys;

use crate::cloud::client::CloudClient;
pub use floating_ips::{FloatingIpOptions, FloatingIps, Placement};
pub use geo::Geography;
pub use images::{ImageOptions, Images};
pub use instances::{InstanceAction, InstanceOptions, Instances};
pub use keys::{KeyOptions, Keys};

impl CloudClient {
    pub fn geography(&self) -> Geography {
        Geography::new(self.clone())
    }

    pub fn instances(&self) -> Instances {
        Instances::new(self.clone())
    }

    pub fn images(&self) -> Images {
        Images::new(self.clone())
    }

    pub fn keys(&self) -> Keys {
        Keys::new(self.clone())
    }

    pub fn floating_ips(&self) -> FloatingIps {
        FloatingIps::new(self.clone())
    }
}
