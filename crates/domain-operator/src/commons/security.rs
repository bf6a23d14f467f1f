use k8s_openapi::api::core::v1::{Capabilities, PodSecurityContext, SecurityContext};

use crate::config::{
    merge::Merge,
    policy::{coalesce, nested, optional_set_union},
};

impl Merge for PodSecurityContext {
    fn merge(&mut self, defaults: &Self) {
        coalesce(&mut self.app_armor_profile, &defaults.app_armor_profile);
        coalesce(&mut self.run_as_non_root, &defaults.run_as_non_root);
        coalesce(&mut self.fs_group, &defaults.fs_group);
        coalesce(
            &mut self.fs_group_change_policy,
            &defaults.fs_group_change_policy,
        );
        coalesce(&mut self.run_as_group, &defaults.run_as_group);
        coalesce(&mut self.run_as_user, &defaults.run_as_user);
        coalesce(
            &mut self.se_linux_change_policy,
            &defaults.se_linux_change_policy,
        );
        coalesce(&mut self.se_linux_options, &defaults.se_linux_options);
        coalesce(&mut self.seccomp_profile, &defaults.seccomp_profile);
        coalesce(&mut self.supplemental_groups, &defaults.supplemental_groups);
        coalesce(
            &mut self.supplemental_groups_policy,
            &defaults.supplemental_groups_policy,
        );
        coalesce(&mut self.sysctls, &defaults.sysctls);
        coalesce(&mut self.windows_options, &defaults.windows_options);
    }
}

/// Container level settings. Capabilities are the only nested object that is merged
/// recursively, everything else is inherited as a single value.
impl Merge for SecurityContext {
    fn merge(&mut self, defaults: &Self) {
        coalesce(
            &mut self.allow_privilege_escalation,
            &defaults.allow_privilege_escalation,
        );
        coalesce(&mut self.app_armor_profile, &defaults.app_armor_profile);
        coalesce(&mut self.privileged, &defaults.privileged);
        coalesce(&mut self.proc_mount, &defaults.proc_mount);
        coalesce(
            &mut self.read_only_root_filesystem,
            &defaults.read_only_root_filesystem,
        );
        coalesce(&mut self.run_as_non_root, &defaults.run_as_non_root);
        nested(&mut self.capabilities, &defaults.capabilities);
        coalesce(&mut self.run_as_group, &defaults.run_as_group);
        coalesce(&mut self.run_as_user, &defaults.run_as_user);
        coalesce(&mut self.se_linux_options, &defaults.se_linux_options);
        coalesce(&mut self.seccomp_profile, &defaults.seccomp_profile);
        coalesce(&mut self.windows_options, &defaults.windows_options);
    }
}

impl Merge for Capabilities {
    fn merge(&mut self, defaults: &Self) {
        optional_set_union(&mut self.add, &defaults.add);
        optional_set_union(&mut self.drop, &defaults.drop);
    }
}
