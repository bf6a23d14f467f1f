use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::config::merge::{Atomic, Merge};

/// Configures how the operator shuts a server instance down.
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, JsonSchema, Merge, PartialEq, Serialize)]
#[merge(path_overrides(merge = "crate::config::merge"))]
#[serde(rename_all = "camelCase")]
pub struct Shutdown {
    /// Tells the operator how to shut the server down, gracefully or forced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shutdown_type: Option<ShutdownType>,

    /// For graceful shutdown only, number of seconds to wait before aborting in-flight work and
    /// shutting down the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<i64>,

    /// For graceful shutdown only, whether to drop HTTP sessions instead of waiting for them to
    /// complete or time out.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_sessions: Option<bool>,
}

#[derive(
    Clone, Copy, Debug, Deserialize, Display, EnumString, Eq, Hash, JsonSchema, PartialEq, Serialize,
)]
pub enum ShutdownType {
    Graceful,
    Forced,
}

impl Atomic for ShutdownType {}
