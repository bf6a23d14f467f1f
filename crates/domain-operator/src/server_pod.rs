use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::{
    Affinity, Container, EnvVar, PodReadinessGate, PodSecurityContext, ResourceRequirements,
    SecurityContext, Toleration, Volume, VolumeMount,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    commons::{probe::ProbeTuning, shutdown::Shutdown},
    config::{merge::Merge, policy},
};

/// The pod configuration declared at one scope (server, cluster or domain).
///
/// The `#[merge]` attribute of each field picks how that field cascades from a less specific
/// scope, see [`policy`] for the individual combinators. Fields without one are either
/// [`Option`]al scalars that are only filled in when absent, or nested settings that recurse.
//
// Top level collections are never `Option`al: a missing list merges and compares exactly like an
// empty one. Nested Kubernetes objects keep their `Option`s, an absent object is inherited as a
// whole.
#[derive(Clone, Debug, Default, Deserialize, JsonSchema, Merge, PartialEq, Serialize)]
#[merge(path_overrides(merge = "crate::config::merge"))]
#[serde(rename_all = "camelCase")]
pub struct ScopedPodSpec {
    /// Labels to add to the server pod.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    #[merge(with = "policy::map_union")]
    pub labels: BTreeMap<String, String>,

    /// Annotations to add to the server pod.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    #[merge(with = "policy::map_union")]
    pub annotations: BTreeMap<String, String>,

    /// Environment variables to add to the server container.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[merge(with = "policy::keyed_union")]
    pub env: Vec<EnvVar>,

    /// Settings for the liveness probe associated with a server.
    #[serde(default)]
    pub liveness_probe: ProbeTuning,

    /// Settings for the readiness probe associated with a server.
    #[serde(default)]
    pub readiness_probe: ProbeTuning,

    /// Selector which must match a node's labels for the pod to be scheduled on that node.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    #[merge(with = "policy::map_union")]
    pub node_selector: BTreeMap<String, String>,

    /// The pod's scheduling constraints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[merge(with = "policy::nested")]
    pub affinity: Option<Affinity>,

    /// The pod's priority class.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority_class_name: Option<String>,

    /// Additional conditions evaluated for pod readiness.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[merge(with = "policy::append")]
    pub readiness_gates: Vec<PodReadinessGate>,

    /// Restart policy for all containers within the pod. One of Always, OnFailure, Never.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restart_policy: Option<String>,

    /// The RuntimeClass used to run the pod.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime_class_name: Option<String>,

    /// Request to schedule the pod onto a specific node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_name: Option<String>,

    /// The scheduler that dispatches the pod.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduler_name: Option<String>,

    /// The pod's tolerations.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[merge(with = "policy::append")]
    pub tolerations: Vec<Toleration>,

    /// Memory and CPU minimum requirements and limits for the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[merge(with = "policy::nested")]
    pub resources: Option<ResourceRequirements>,

    /// Pod-level security attributes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[merge(with = "policy::nested")]
    pub pod_security_context: Option<PodSecurityContext>,

    /// Initialization containers to be included in the server pod.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[merge(with = "policy::keyed_union")]
    pub init_containers: Vec<Container>,

    /// Additional containers to be included in the server pod.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[merge(with = "policy::keyed_union")]
    pub containers: Vec<Container>,

    /// Configures how the operator should shut the server instance down.
    #[serde(default)]
    pub shutdown: Shutdown,

    /// Container-level security attributes. Override any matching pod-level attributes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[merge(with = "policy::nested")]
    pub container_security_context: Option<SecurityContext>,

    /// Additional volumes to be created in the server pod.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[merge(with = "policy::keyed_union")]
    pub volumes: Vec<Volume>,

    /// Additional volume mounts for the server container.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[merge(with = "policy::keyed_union")]
    pub volume_mounts: Vec<VolumeMount>,
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use k8s_openapi::{
        api::core::v1::HostPathVolumeSource, apimachinery::pkg::api::resource::Quantity,
    };

    use super::*;
    use crate::{commons::shutdown::ShutdownType, config::merge::merge};

    fn toleration(key: &str) -> Toleration {
        Toleration {
            key: Some(key.to_owned()),
            operator: Some("Exists".to_owned()),
            ..Toleration::default()
        }
    }

    fn host_path_volume(name: &str, path: &str) -> Volume {
        Volume {
            name: name.to_owned(),
            host_path: Some(HostPathVolumeSource {
                path: path.to_owned(),
                type_: None,
            }),
            ..Volume::default()
        }
    }

    #[test]
    fn deserialize_server_pod() {
        let input = indoc! {"
            env:
              - name: JAVA_OPTIONS
                value: -Xms512m
            livenessProbe:
              initialDelaySeconds: 30
            nodeSelector:
              disktype: ssd
            restartPolicy: Always
            tolerations:
              - key: dedicated
                operator: Exists
            resources:
              requests:
                memory: 768Mi
            shutdown:
              shutdownType: Graceful
              timeoutSeconds: 45
            volumes:
              - name: logs
                hostPath:
                  path: /shared/logs
            volumeMounts:
              - name: logs
                mountPath: /shared/logs
        "};
        let spec: ScopedPodSpec = serde_yaml::from_str(input).expect("illegal test input");

        assert_eq!(spec.env.len(), 1);
        assert_eq!(spec.liveness_probe.initial_delay_seconds, Some(30));
        assert_eq!(spec.readiness_probe, ProbeTuning::default());
        assert_eq!(
            spec.node_selector,
            BTreeMap::from([("disktype".to_owned(), "ssd".to_owned())])
        );
        assert_eq!(spec.restart_policy.as_deref(), Some("Always"));
        assert_eq!(spec.tolerations, vec![toleration("dedicated")]);
        assert_eq!(
            spec.resources.and_then(|resources| resources.requests),
            Some(BTreeMap::from([(
                "memory".to_owned(),
                Quantity("768Mi".to_owned())
            )]))
        );
        assert_eq!(spec.shutdown.shutdown_type, Some(ShutdownType::Graceful));
        assert_eq!(spec.shutdown.timeout_seconds, Some(45));
        assert_eq!(spec.volumes, vec![host_path_volume("logs", "/shared/logs")]);
        assert_eq!(spec.volume_mounts[0].mount_path, "/shared/logs");
        assert!(spec.affinity.is_none());
    }

    #[test]
    fn empty_document_is_the_empty_scope() {
        let spec: ScopedPodSpec = serde_yaml::from_str("{}").expect("illegal test input");
        assert_eq!(spec, ScopedPodSpec::default());
    }

    #[test]
    fn scalars_prefer_the_more_specific_scope() {
        let server = ScopedPodSpec {
            restart_policy: Some("Always".to_owned()),
            ..ScopedPodSpec::default()
        };
        let cluster = ScopedPodSpec {
            restart_policy: Some("OnFailure".to_owned()),
            scheduler_name: Some("custom-scheduler".to_owned()),
            priority_class_name: Some("high".to_owned()),
            ..ScopedPodSpec::default()
        };

        let merged = merge(server, &cluster);
        assert_eq!(merged.restart_policy.as_deref(), Some("Always"));
        assert_eq!(merged.scheduler_name.as_deref(), Some("custom-scheduler"));
        assert_eq!(merged.priority_class_name.as_deref(), Some("high"));
        assert_eq!(merged.runtime_class_name, None);
        assert_eq!(merged.node_name, None);
    }

    #[test]
    fn tolerations_and_readiness_gates_accumulate() {
        let gate = |condition: &str| PodReadinessGate {
            condition_type: condition.to_owned(),
        };
        let server = ScopedPodSpec {
            tolerations: vec![toleration("dedicated")],
            readiness_gates: vec![gate("www.example.com/feature-1")],
            ..ScopedPodSpec::default()
        };
        let cluster = ScopedPodSpec {
            tolerations: vec![toleration("dedicated"), toleration("gpu")],
            readiness_gates: vec![gate("www.example.com/feature-2")],
            ..ScopedPodSpec::default()
        };

        let merged = merge(server, &cluster);
        assert_eq!(
            merged.tolerations,
            vec![
                toleration("dedicated"),
                toleration("dedicated"),
                toleration("gpu"),
            ]
        );
        assert_eq!(
            merged.readiness_gates,
            vec![
                gate("www.example.com/feature-1"),
                gate("www.example.com/feature-2"),
            ]
        );
    }

    #[test]
    fn keyed_lists_inherit_only_missing_names() {
        let container = |name: &str, image: &str| Container {
            name: name.to_owned(),
            image: Some(image.to_owned()),
            ..Container::default()
        };
        let server = ScopedPodSpec {
            init_containers: vec![container("setup", "busybox:1")],
            containers: vec![container("sidecar", "envoy:1")],
            volumes: vec![host_path_volume("data", "/server")],
            ..ScopedPodSpec::default()
        };
        let cluster = ScopedPodSpec {
            init_containers: vec![
                container("setup", "busybox:2"),
                container("wait", "busybox:2"),
            ],
            containers: vec![
                container("exporter", "exporter:1"),
                container("sidecar", "envoy:2"),
            ],
            volumes: vec![
                host_path_volume("data", "/cluster"),
                host_path_volume("logs", "/cluster-logs"),
            ],
            ..ScopedPodSpec::default()
        };

        let merged = merge(server, &cluster);
        assert_eq!(
            merged.init_containers,
            vec![
                container("setup", "busybox:1"),
                container("wait", "busybox:2"),
            ]
        );
        assert_eq!(
            merged.containers,
            vec![
                container("sidecar", "envoy:1"),
                container("exporter", "exporter:1"),
            ]
        );
        assert_eq!(
            merged.volumes,
            vec![
                host_path_volume("data", "/server"),
                host_path_volume("logs", "/cluster-logs"),
            ]
        );
    }

    #[test]
    fn labels_and_annotations_are_map_unions() {
        let server = ScopedPodSpec {
            labels: BTreeMap::from([("tier".to_owned(), "server".to_owned())]),
            ..ScopedPodSpec::default()
        };
        let domain = ScopedPodSpec {
            labels: BTreeMap::from([
                ("tier".to_owned(), "domain".to_owned()),
                ("team".to_owned(), "payments".to_owned()),
            ]),
            annotations: BTreeMap::from([("owner".to_owned(), "ops".to_owned())]),
            ..ScopedPodSpec::default()
        };

        let merged = merge(server, &domain);
        assert_eq!(
            merged.labels,
            BTreeMap::from([
                ("team".to_owned(), "payments".to_owned()),
                ("tier".to_owned(), "server".to_owned()),
            ])
        );
        assert_eq!(
            merged.annotations,
            BTreeMap::from([("owner".to_owned(), "ops".to_owned())])
        );
    }
}
