//! Route guard decision
//!
//! One pure function shared by the server's page handlers and the client's
//! component guard, so both layers agree on the outcome for the same inputs.

use serde::{Deserialize, Serialize};

use crate::models::{Module, PermissionTable, Role};

/// Where unauthenticated users are sent
pub const LOGIN_PATH: &str = "/login";
/// Where authenticated but unauthorized users are sent
pub const UNAUTHORIZED_PATH: &str = "/unauthorized";

/// Outcome of a guard check for one navigation/request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardOutcome {
    /// No valid session
    Unauthenticated,
    /// Valid session, role lacks the module grant
    Forbidden,
    /// Valid session, access granted
    Authorized,
}

impl GuardOutcome {
    /// Redirect target, `None` when access is granted
    pub fn redirect(&self) -> Option<&'static str> {
        match self {
            GuardOutcome::Unauthenticated => Some(LOGIN_PATH),
            GuardOutcome::Forbidden => Some(UNAUTHORIZED_PATH),
            GuardOutcome::Authorized => None,
        }
    }

    pub fn is_authorized(&self) -> bool {
        matches!(self, GuardOutcome::Authorized)
    }
}

/// Decide whether `role` may open `module`
///
/// `role` is `None` when there is no valid session. Roles whose descriptor
/// carries `bypass_all` are authorized without looking at `table`.
pub fn authorize(role: Option<Role>, module: Module, table: &PermissionTable) -> GuardOutcome {
    let Some(role) = role else {
        return GuardOutcome::Unauthenticated;
    };

    if role.descriptor().bypass_all || table.has_permission(role, module) {
        GuardOutcome::Authorized
    } else {
        GuardOutcome::Forbidden
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_session_is_unauthenticated() {
        let table = PermissionTable::defaults();
        for module in Module::ALL {
            let outcome = authorize(None, module, &table);
            assert_eq!(outcome, GuardOutcome::Unauthenticated);
            assert_eq!(outcome.redirect(), Some("/login"));
        }
    }

    #[test]
    fn test_bypass_roles_ignore_table() {
        // An empty table denies everything, and ADMIN/HR still pass
        let table = PermissionTable::empty();
        for role in [Role::Admin, Role::Hr] {
            for module in Module::ALL {
                assert!(authorize(Some(role), module, &table).is_authorized());
            }
        }
    }

    #[test]
    fn test_other_roles_follow_table() {
        let mut table = PermissionTable::defaults();
        table.update_role_permission(Role::Payroll, Module::Hr, true);
        table.update_role_permission(Role::Employee, Module::Dashboard, false);

        for role in [Role::Payroll, Role::Employee] {
            for module in Module::ALL {
                let outcome = authorize(Some(role), module, &table);
                assert_eq!(
                    outcome.is_authorized(),
                    table.has_permission(role, module),
                    "{role} / {module}"
                );
            }
        }
    }

    #[test]
    fn test_employee_settings_redirects_to_unauthorized() {
        let table = PermissionTable::defaults();
        let outcome = authorize(Some(Role::Employee), Module::Settings, &table);
        assert_eq!(outcome, GuardOutcome::Forbidden);
        assert_eq!(outcome.redirect(), Some("/unauthorized"));
    }
}
