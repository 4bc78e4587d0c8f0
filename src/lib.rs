//! Client SDK for the IBM Cloud VPC and Resource Controller REST APIs.
//!
//! Every operation answers with an [`Envelope`]: the provider's data, or an
//! ordered list of `{code, message}` errors. Transport and setup faults are
//! reported separately as [`Error`].
//!
//! # Architecture
//!
//! - [`cloud`] - Query Wrapper contract, HTTP transport, auth and client
//! - [`resource`] - Generic collection operations and name-or-id resolution
//! - [`vpc`] - Regions, zones, instances, images, keys, floating IPs
//! - [`platform`] - Resource groups and resource instances
//!
//! # Example
//!
//! ```no_run
//! use ibmcloud_vpc::{CloudClient, Config, Envelope};
//! use ibmcloud_vpc::vpc::KeyOptions;
//!
//! # async fn example() -> ibmcloud_vpc::Result<()> {
//! let client = CloudClient::with_token("<iam token>", Config::default())?;
//!
//! let created = client
//!     .keys()
//!     .create(&KeyOptions {
//!         name: "deploy".to_string(),
//!         public_key: "ssh-ed25519 AAAA...".to_string(),
//!         resource_group: Some("default".to_string()),
//!         key_type: Some("ed25519".to_string()),
//!     })
//!     .await?;
//!
//! match created {
//!     Envelope::Success { data } => println!("created {}", data["id"]),
//!     Envelope::Failure { errors, .. } => eprintln!("{}: {}", errors[0].code, errors[0].message),
//! }
//! # Ok(())
//! # }
//! ```

pub mod cloud;
pub mod config;
pub mod envelope;
pub mod error;
pub mod platform;
pub mod resource;
pub mod vpc;

pub use cloud::auth::{Authenticator, BearerToken};
pub use cloud::client::CloudClient;
pub use cloud::http::HttpQueryWrapper;
pub use cloud::query::{ApiVersion, Endpoint, Headers, Method, QueryWrapper, Reply, Service};
pub use config::Config;
pub use envelope::{ApiError, Envelope, NOT_FOUND, UNPREDICTABLE_ERROR};
pub use error::{Error, Result};
