//! Descriptors that make up a server pod configuration, and how each of them cascades.
//!
//! Most descriptors are plain Kubernetes objects from [`k8s_openapi`], this module adds the
//! [`Merge`](crate::config::merge::Merge) impls for them. [`probe`] and [`shutdown`] hold the
//! settings that only exist in the domain resource.

pub mod affinity;
pub mod probe;
pub mod resources;
pub mod security;
pub mod shutdown;
