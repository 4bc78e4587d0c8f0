//! Resource kind descriptors
//!
//! Each kind names the service that hosts it, its collection path and the
//! key under which list replies carry their records.

use crate::cloud::query::Service;

/// Static description of a resource kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceKind {
    /// Human-readable label used in error messages
    pub label: &'static str,
    pub service: Service,
    /// Collection path segment, e.g. `floating_ips`
    pub plural: &'static str,
    /// Key of the record array in list replies
    pub collection_key: &'static str,
}

pub const REGION: ResourceKind = ResourceKind {
    label: "region",
    service: Service::Iaas,
    plural: "regions",
    collection_key: "regions",
};

pub const INSTANCE: ResourceKind = ResourceKind {
    label: "instance",
    service: Service::Iaas,
    plural: "instances",
    collection_key: "instances",
};

pub const IMAGE: ResourceKind = ResourceKind {
    label: "image",
    service: Service::Iaas,
    plural: "images",
    collection_key: "images",
};

pub const KEY: ResourceKind = ResourceKind {
    label: "key",
    service: Service::Iaas,
    plural: "keys",
    collection_key: "keys",
};

pub const FLOATING_IP: ResourceKind = ResourceKind {
    label: "floating ip",
    service: Service::Iaas,
    plural: "floating_ips",
    collection_key: "floating_ips",
};

pub const RESOURCE_GROUP: ResourceKind = ResourceKind {
    label: "resource group",
    service: Service::ResourceController,
    plural: "resource_groups",
    collection_key: "resources",
};

pub const RESOURCE_INSTANCE: ResourceKind = ResourceKind {
    label: "resource instance",
    service: Service::ResourceController,
    plural: "resource_instances",
    collection_key: "resources",
};
