//! Cascading of pod scheduling constraints.
//!
//! Preferred terms are additive hints, so every scope contributes its terms. Required node terms
//! live inside a single [`NodeSelector`] object, which is merged recursively rather than replaced,
//! so the terms of all scopes end up in the same selector.

use k8s_openapi::api::core::v1::{
    Affinity, NodeAffinity, NodeSelector, PodAffinity, PodAntiAffinity,
};

use crate::config::{
    merge::Merge,
    policy::{append, nested, optional_with},
};

impl Merge for Affinity {
    fn merge(&mut self, defaults: &Self) {
        nested(&mut self.node_affinity, &defaults.node_affinity);
        nested(&mut self.pod_affinity, &defaults.pod_affinity);
        nested(&mut self.pod_anti_affinity, &defaults.pod_anti_affinity);
    }
}

impl Merge for NodeAffinity {
    fn merge(&mut self, defaults: &Self) {
        optional_with(
            &mut self.preferred_during_scheduling_ignored_during_execution,
            &defaults.preferred_during_scheduling_ignored_during_execution,
            |this, defaults| append(this, defaults),
        );
        nested(
            &mut self.required_during_scheduling_ignored_during_execution,
            &defaults.required_during_scheduling_ignored_during_execution,
        );
    }
}

impl Merge for NodeSelector {
    fn merge(&mut self, defaults: &Self) {
        append(&mut self.node_selector_terms, &defaults.node_selector_terms);
    }
}

impl Merge for PodAffinity {
    fn merge(&mut self, defaults: &Self) {
        optional_with(
            &mut self.preferred_during_scheduling_ignored_during_execution,
            &defaults.preferred_during_scheduling_ignored_during_execution,
            |this, defaults| append(this, defaults),
        );
        optional_with(
            &mut self.required_during_scheduling_ignored_during_execution,
            &defaults.required_during_scheduling_ignored_during_execution,
            |this, defaults| append(this, defaults),
        );
    }
}

impl Merge for PodAntiAffinity {
    fn merge(&mut self, defaults: &Self) {
        optional_with(
            &mut self.preferred_during_scheduling_ignored_during_execution,
            &defaults.preferred_during_scheduling_ignored_during_execution,
            |this, defaults| append(this, defaults),
        );
        optional_with(
            &mut self.required_during_scheduling_ignored_during_execution,
            &defaults.required_during_scheduling_ignored_during_execution,
            |this, defaults| append(this, defaults),
        );
    }
}
