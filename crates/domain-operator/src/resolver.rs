//! Turns the three configuration scopes of a server into its [`EffectiveSpec`].

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use snafu::{ResultExt, Snafu};

use crate::{config::merge::Merge, effective::EffectiveSpec, server_pod::ScopedPodSpec};

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("failed to parse domain pod configuration"))]
    ParseDomainConfig { source: serde_yaml::Error },
}

/// Resolves the effective pod configuration of one server.
///
/// `server` is copied into a private accumulator, then `cluster` and `domain` are merged into it
/// in that order, so the most specific scope wins wherever a value is set more than once. None of
/// the inputs are modified, and resolving the same inputs again yields an equal spec.
///
/// A server that is not part of a cluster passes an empty [`ScopedPodSpec`] as `cluster`.
#[tracing::instrument(level = "debug", skip_all)]
pub fn resolve(
    server: &ScopedPodSpec,
    cluster: &ScopedPodSpec,
    domain: &ScopedPodSpec,
) -> EffectiveSpec {
    let mut accumulator = server.clone();
    accumulator.merge(cluster);
    accumulator.merge(domain);

    tracing::debug!(
        env = accumulator.env.len(),
        volumes = accumulator.volumes.len(),
        containers = accumulator.containers.len(),
        tolerations = accumulator.tolerations.len(),
        "resolved effective server pod spec"
    );
    EffectiveSpec::from(accumulator)
}

/// Pod configuration of a whole domain, as declared in its custom resource.
///
/// `serverPod` at the top level is the domain scope. Each entry of `clusters` and
/// `managedServers` (keyed by cluster and server name) holds the scope of that cluster or server.
#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainPodConfig {
    #[serde(default)]
    pub server_pod: ScopedPodSpec,

    #[serde(default)]
    pub admin_server: ServerPodScope,

    #[serde(default)]
    pub clusters: BTreeMap<String, ServerPodScope>,

    #[serde(default)]
    pub managed_servers: BTreeMap<String, ServerPodScope>,
}

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerPodScope {
    #[serde(default)]
    pub server_pod: ScopedPodSpec,
}

impl DomainPodConfig {
    pub fn from_yaml_str(input: &str) -> Result<Self, Error> {
        serde_yaml::from_str(input).context(ParseDomainConfigSnafu)
    }

    /// Resolves a managed server, optionally belonging to `cluster_name`.
    ///
    /// Servers and clusters without a declared scope resolve against an empty one.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn resolve_managed_server(
        &self,
        server_name: &str,
        cluster_name: Option<&str>,
    ) -> EffectiveSpec {
        let empty = ScopedPodSpec::default();

        let server = if let Some(scope) = self.managed_servers.get(server_name) {
            &scope.server_pod
        } else {
            tracing::debug!(
                "no server pod configuration declared for server, using empty scope"
            );
            &empty
        };
        let cluster = match cluster_name.map(|name| self.clusters.get(name)) {
            Some(Some(scope)) => &scope.server_pod,
            Some(None) => {
                tracing::debug!(
                    "no server pod configuration declared for cluster, using empty scope"
                );
                &empty
            }
            None => &empty,
        };

        resolve(server, cluster, &self.server_pod)
    }

    /// Resolves the administration server, which never belongs to a cluster.
    pub fn resolve_admin_server(&self) -> EffectiveSpec {
        resolve(
            &self.admin_server.server_pod,
            &ScopedPodSpec::default(),
            &self.server_pod,
        )
    }
}
