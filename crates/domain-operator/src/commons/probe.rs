use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::config::merge::Merge;

/// Tuning of a liveness or readiness probe. Every setting that is not configured at any scope
/// falls back to the default of the probe the operator generates.
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, JsonSchema, Merge, PartialEq, Serialize)]
#[merge(path_overrides(merge = "crate::config::merge"))]
#[serde(rename_all = "camelCase")]
pub struct ProbeTuning {
    /// Number of seconds after the container has started before the probe is initiated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_delay_seconds: Option<i32>,

    /// Number of seconds after which the probe times out.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<i32>,

    /// How often (in seconds) to perform the probe.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_seconds: Option<i32>,
}
