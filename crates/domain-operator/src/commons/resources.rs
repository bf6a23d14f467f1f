use k8s_openapi::api::core::v1::ResourceRequirements;

use crate::config::{
    merge::Merge,
    policy::{keyed_union, map_union, optional_with},
};

/// Requests and limits are inherited per resource name, so a server that only overrides its
/// memory request still gets the cpu request of its cluster.
impl Merge for ResourceRequirements {
    fn merge(&mut self, defaults: &Self) {
        optional_with(&mut self.requests, &defaults.requests, map_union);
        optional_with(&mut self.limits, &defaults.limits, map_union);
        optional_with(&mut self.claims, &defaults.claims, |this, defaults| {
            keyed_union(this, defaults);
        });
    }
}
