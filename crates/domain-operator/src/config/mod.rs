//! The server pod configuration cascade.
//!
//! A domain runs many server instances, and most of them want almost the same pod. Users
//! declare pod configuration at three scopes:
//!
//! ```yaml
//! domain:          # applies to every server
//!   cluster1:      # applies to every server in cluster1
//!     server1:     # applies to server1 only
//!     server2:
//!   server3:       # a standalone server, only the domain scope applies above it
//! ```
//!
//! Only servers are realized into pods, but every server inherits the configuration of the
//! scopes above it unless it overrides a value.
//!
//! # How are scopes combined?
//!
//! Through [`Merge`]. The most specific scope is cloned into an accumulator, and every less
//! specific scope is [merged](Merge::merge) into it in turn. A merge only ever fills gaps: a value
//! that is already set in the accumulator is never replaced.
//!
//! *What* counts as a gap depends on the field. A restart policy is a single value, so it is
//! either set or not. A list of environment variables is a collection keyed by name, so a
//! variable is a gap if no variable of the same name exists yet. Tolerations are additive, so
//! every one of them is inherited. The [`policy`] module holds one combinator per kind of field,
//! and [`derive@Merge`] lets a struct pick the combinator per field:
//!
//! ```
//! # use std::collections::BTreeMap;
//! # use domain_operator::config::{merge::Merge, policy};
//! # use domain_operator::k8s_openapi::api::core::v1::EnvVar;
//! #[derive(Merge)]
//! struct PodBits {
//!     restart_policy: Option<String>,
//!     #[merge(with = "policy::keyed_union")]
//!     env: Vec<EnvVar>,
//!     #[merge(with = "policy::map_union")]
//!     node_selector: BTreeMap<String, String>,
//! }
//! ```
//!
//! Fields without `with` use their type's own [`Merge`] impl: [`Option`]al [`Atomic`] values are
//! defaulted, nested structs recurse.
//!
//! [`derive@Merge`]: merge::Merge

pub mod merge;
pub mod policy;

#[cfg(doc)]
use merge::{Atomic, Merge};
