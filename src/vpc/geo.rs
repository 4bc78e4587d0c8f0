//! Regions and zones
//!
//! Regions are addressed by name. Zones only exist under a region, so every
//! zone call is scoped by its region path.

use crate::cloud::client::CloudClient;
use crate::cloud::query::Method;
use crate::envelope::Envelope;
use crate::resource::kind::REGION;
use crate::resource::{fetch_all, Collection};
use crate::Result;

/// Region/zone hierarchy accessor
#[derive(Clone)]
pub struct Geography {
    regions: Collection,
}

impl Geography {
    pub fn new(client: CloudClient) -> Self {
        Self {
            regions: Collection::new(client, &REGION),
        }
    }

    pub async fn list_regions(&self) -> Result<Envelope> {
        self.regions.list().await
    }

    pub async fn get_region(&self, region: &str) -> Result<Envelope> {
        self.regions.get_by_id(region).await
    }

    /// Zones of one region
    pub async fn get_region_zones(&self, region: &str) -> Result<Envelope> {
        let endpoint = self.regions.endpoint(Method::Get, &[region, "zones"]);
        fetch_all(self.regions.client(), endpoint, "zones").await
    }

    /// One zone of one region
    pub async fn get_region_zone(&self, region: &str, zone: &str) -> Result<Envelope> {
        let endpoint = self.regions.endpoint(Method::Get, &[region, "zones", zone]);
        let reply = self.regions.client().get(endpoint).await?;
        Ok(Envelope::from_reply(reply))
    }
}
