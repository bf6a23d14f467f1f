//! Resolves the effective pod configuration of a server instance in a clustered application
//! server domain.
//!
//! Pod configuration can be declared for a single server, for a whole cluster and for the whole
//! domain. [`resolver::resolve`] cascades those three scopes into one [`EffectiveSpec`], and the
//! [`EffectiveSpec`] equality and hash tell a reconciler whether a running pod is out of date.

pub mod commons;
pub mod config;
pub mod effective;
pub mod logging;
pub mod resolver;
pub mod server_pod;

// External re-exports
pub use k8s_openapi;
pub use schemars;

pub use crate::{effective::EffectiveSpec, resolver::resolve, server_pod::ScopedPodSpec};
