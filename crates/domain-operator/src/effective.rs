//! The resolved pod configuration of one server, and how two of them are compared.
//!
//! A reconciler needs to know whether the configuration it resolved in this pass still matches
//! what the running pod was created from. Comparing too strictly recreates pods for nothing,
//! comparing too loosely hides real changes. [`EffectiveSpec`] therefore compares a *canonical
//! form*: environment variables, volumes and volume mounts are sorted by name, because their
//! declaration order has no effect on the pod. Containers, tolerations and readiness gates keep
//! their order, as do all other fields.

use std::{
    hash::{Hash, Hasher},
    ops::Deref,
};

use serde::Serialize;
use sha2::{Digest, Sha256};
use snafu::{ResultExt, Snafu};

use crate::{config::policy::sort_by_key, server_pod::ScopedPodSpec};

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("failed to serialize canonical server pod spec"))]
    SerializeCanonicalSpec { source: serde_json::Error },
}

/// The fully merged pod configuration of one server instance.
///
/// Dereferences to the merged [`ScopedPodSpec`] for reading. Equality and [`Hash`] ignore the
/// order of environment variables, volumes and volume mounts (see the [module docs](self)).
#[derive(Clone, Debug, Serialize)]
#[serde(transparent)]
pub struct EffectiveSpec(ScopedPodSpec);

impl EffectiveSpec {
    pub fn into_inner(self) -> ScopedPodSpec {
        self.0
    }

    /// Copy of the spec with every order-insensitive list sorted by its identity key.
    pub fn canonical(&self) -> ScopedPodSpec {
        let mut canonical = self.0.clone();
        sort_by_key(&mut canonical.env);
        sort_by_key(&mut canonical.volumes);
        sort_by_key(&mut canonical.volume_mounts);
        canonical
    }

    fn canonical_json(&self) -> Result<Vec<u8>, Error> {
        serde_json::to_vec(&self.canonical()).context(SerializeCanonicalSpecSnafu)
    }

    /// Hex encoded SHA-256 digest of the canonical form.
    ///
    /// Two specs that compare equal always have the same digest, so the digest can be recorded
    /// on a pod (for example as an annotation) and compared against in later passes instead of
    /// keeping the whole spec around.
    pub fn sha256(&self) -> Result<String, Error> {
        let digest = Sha256::digest(self.canonical_json()?);
        Ok(format!("{digest:x}"))
    }

    /// Returns `true` if `digest` was produced by [`Self::sha256`] for an equal spec.
    pub fn matches_digest(&self, digest: &str) -> Result<bool, Error> {
        Ok(self.sha256()? == digest)
    }
}

impl From<ScopedPodSpec> for EffectiveSpec {
    fn from(spec: ScopedPodSpec) -> Self {
        Self(spec)
    }
}

impl Deref for EffectiveSpec {
    type Target = ScopedPodSpec;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl PartialEq for EffectiveSpec {
    fn eq(&self, other: &Self) -> bool {
        self.canonical() == other.canonical()
    }
}

impl Eq for EffectiveSpec {}

impl Hash for EffectiveSpec {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Equal canonical forms serialize to equal bytes
        match self.canonical_json() {
            Ok(bytes) => bytes.hash(state),
            Err(error) => {
                tracing::warn!(
                    error = &error as &dyn std::error::Error,
                    "falling back to debug representation for hashing"
                );
                format!("{:?}", self.canonical()).hash(state);
            }
        }
    }
}
