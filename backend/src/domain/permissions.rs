//! Capability checks consulted before every mutation.
//!
//! The condominium front-end asks a permission service `can(action)`; the
//! backend keeps the same shape so that a real identity provider can be
//! plugged in behind [`PermissionChecker`].

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ManageCommonAreas,
    ManagePeriods,
    ManageFees,
    Reserve,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::ManageCommonAreas => "manage common areas",
            Action::ManagePeriods => "manage reservation periods",
            Action::ManageFees => "manage utilization fees",
            Action::Reserve => "make reservations",
        };
        write!(f, "{}", name)
    }
}

pub trait PermissionChecker: Send + Sync {
    fn can(&self, action: Action) -> bool;
}

/// Grants everything unless the deployment is read-only
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticPermissions {
    pub read_only: bool,
}

impl PermissionChecker for StaticPermissions {
    fn can(&self, _action: Action) -> bool {
        !self.read_only
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_only_denies_every_action() {
        let permissions = StaticPermissions { read_only: true };
        for action in [Action::ManageCommonAreas, Action::ManagePeriods, Action::ManageFees, Action::Reserve] {
            assert!(!permissions.can(action));
        }
        assert!(StaticPermissions::default().can(Action::ManageFees));
        assert_eq!(Action::ManagePeriods.to_string(), "manage reservation periods");
    }
}
