//! Resource abstraction layer
//!
//! The list/lookup/delete pattern is written once here and reused by every
//! per-kind accessor.
//!
//! # Architecture
//!
//! - [`kind`] - Static descriptors for each resource kind
//! - [`collection`] - Paginated listing, lookups and delete for any kind
//! - [`resolver`] - Name-then-id resolution shared by all lookups
//! - [`identity`] - `{id}`/`{name}`/`{href}` references used in create payloads

pub mod collection;
pub mod identity;
pub mod kind;
pub mod resolver;

pub use collection::{fetch_all, find_by_name, Collection};
pub use identity::Identity;
pub use kind::ResourceKind;
pub use resolver::resolve;
