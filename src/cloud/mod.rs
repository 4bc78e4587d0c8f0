//! Provider API interaction module
//!
//! Core plumbing shared by every accessor: the Query Wrapper contract, its
//! HTTP implementation, authentication and the client that ties them
//! together.
//!
//! # Module Structure
//!
//! - [`query`] - Endpoint descriptors, replies and the `QueryWrapper` trait
//! - [`http`] - reqwest implementation of `QueryWrapper`
//! - [`auth`] - Bearer token authentication
//! - [`client`] - Main client for making API requests
//!
//! # Example
//!
//! ```ignore
//! use ibmcloud_vpc::{CloudClient, Config};
//!
//! async fn example() -> ibmcloud_vpc::Result<()> {
//!     let client = CloudClient::with_token("<iam token>", Config::default())?;
//!     let zones = client.geography().get_region_zones("us-south").await?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod http;
pub mod query;

#[cfg(test)]
pub(crate) mod fake;
