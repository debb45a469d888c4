//! Role → module permission table

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Module, Role};

/// Per-role module grants
///
/// Serialized as a plain nested object:
///
/// ```json
/// { "EMPLOYEE": { "dashboard": true, "settings": false, ... }, ... }
/// ```
///
/// Every role is expected to carry every module. A missing cell is read as
/// denied, never granted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionTable(BTreeMap<Role, BTreeMap<Module, bool>>);

/// Cells missing from a table that must be complete
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("permission table is missing entries: {}", format_missing(.0))]
pub struct IncompleteTable(pub Vec<(Role, Module)>);

fn format_missing(missing: &[(Role, Module)]) -> String {
    missing
        .iter()
        .map(|(r, m)| format!("{}.{}", r, m))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Seed grants for roles without the bypass capability.
/// ADMIN and HR are seeded with every module granted.
const PAYROLL_DEFAULTS: &[Module] = &[
    Module::Dashboard,
    Module::Employees,
    Module::Attendance,
    Module::Payroll,
    Module::Reports,
    Module::Profile,
];

const EMPLOYEE_DEFAULTS: &[Module] = &[
    Module::Dashboard,
    Module::Attendance,
    Module::Timeoff,
    Module::Profile,
];

impl PermissionTable {
    /// Table with no entries (every lookup denied)
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    /// The static seed table
    pub fn defaults() -> Self {
        let mut table = BTreeMap::new();
        for role in Role::ALL {
            let granted: &[Module] = match role {
                Role::Admin | Role::Hr => &Module::ALL,
                Role::Payroll => PAYROLL_DEFAULTS,
                Role::Employee => EMPLOYEE_DEFAULTS,
            };
            let row = Module::ALL
                .into_iter()
                .map(|m| (m, granted.contains(&m)))
                .collect();
            table.insert(role, row);
        }
        Self(table)
    }

    /// Stored grant for `(role, module)`; `false` when absent
    pub fn has_permission(&self, role: Role, module: Module) -> bool {
        self.0
            .get(&role)
            .and_then(|row| row.get(&module))
            .copied()
            .unwrap_or(false)
    }

    /// Replace the whole table
    pub fn set_permissions(&mut self, table: PermissionTable) {
        *self = table;
    }

    /// Set a single cell
    pub fn update_role_permission(&mut self, role: Role, module: Module, allowed: bool) {
        self.0.entry(role).or_default().insert(module, allowed);
    }

    /// Restore the static seed table
    pub fn reset_to_defaults(&mut self) {
        *self = Self::defaults();
    }

    /// Check that every role carries every module
    pub fn validate_complete(&self) -> Result<(), IncompleteTable> {
        let missing: Vec<(Role, Module)> = Role::ALL
            .into_iter()
            .flat_map(|r| Module::ALL.into_iter().map(move |m| (r, m)))
            .filter(|(r, m)| self.0.get(r).is_none_or(|row| !row.contains_key(m)))
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(IncompleteTable(missing))
        }
    }

    /// Modules granted to `role` by the table, in display order
    pub fn granted_modules(&self, role: Role) -> Vec<Module> {
        Module::ALL
            .into_iter()
            .filter(|m| self.has_permission(role, *m))
            .collect()
    }

    /// Row for one role
    pub fn role(&self, role: Role) -> Option<&BTreeMap<Module, bool>> {
        self.0.get(&role)
    }
}

impl Default for PermissionTable {
    fn default() -> Self {
        Self::defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_complete() {
        assert!(PermissionTable::defaults().validate_complete().is_ok());
    }

    #[test]
    fn test_seed_values() {
        let table = PermissionTable::defaults();
        for module in Module::ALL {
            assert!(table.has_permission(Role::Admin, module));
            assert!(table.has_permission(Role::Hr, module));
        }
        assert!(table.has_permission(Role::Payroll, Module::Payroll));
        assert!(!table.has_permission(Role::Payroll, Module::Settings));
        assert!(table.has_permission(Role::Employee, Module::Timeoff));
        assert!(!table.has_permission(Role::Employee, Module::Settings));
        assert!(!table.has_permission(Role::Employee, Module::Payroll));
    }

    #[test]
    fn test_absent_cells_deny() {
        let table = PermissionTable::empty();
        for role in Role::ALL {
            for module in Module::ALL {
                assert!(!table.has_permission(role, module));
            }
        }
    }

    #[test]
    fn test_update_and_reset() {
        let mut table = PermissionTable::defaults();
        table.update_role_permission(Role::Employee, Module::Settings, true);
        assert!(table.has_permission(Role::Employee, Module::Settings));

        table.reset_to_defaults();
        assert_eq!(table, PermissionTable::defaults());
        assert!(!table.has_permission(Role::Employee, Module::Settings));
    }

    #[test]
    fn test_update_on_empty_creates_row() {
        let mut table = PermissionTable::empty();
        table.update_role_permission(Role::Payroll, Module::Reports, true);
        assert!(table.has_permission(Role::Payroll, Module::Reports));
        assert!(!table.has_permission(Role::Payroll, Module::Payroll));
    }

    #[test]
    fn test_validate_complete_reports_missing() {
        let mut table = PermissionTable::empty();
        for module in Module::ALL {
            for role in [Role::Admin, Role::Hr, Role::Payroll] {
                table.update_role_permission(role, module, true);
            }
        }
        table.update_role_permission(Role::Employee, Module::Dashboard, true);

        let err = table.validate_complete().unwrap_err();
        assert_eq!(err.0.len(), Module::ALL.len() - 1);
        assert!(err.0.iter().all(|(r, _)| *r == Role::Employee));
        assert!(err.to_string().contains("EMPLOYEE.settings"));
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(PermissionTable::defaults()).unwrap();
        assert_eq!(json["EMPLOYEE"]["settings"], false);
        assert_eq!(json["PAYROLL"]["payroll"], true);

        let back: PermissionTable = serde_json::from_value(json).unwrap();
        assert_eq!(back, PermissionTable::defaults());
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let bad = r#"{"MANAGER": {"dashboard": true}}"#;
        assert!(serde_json::from_str::<PermissionTable>(bad).is_err());

        let bad = r#"{"HR": {"kitchen": true}}"#;
        assert!(serde_json::from_str::<PermissionTable>(bad).is_err());

        let bad = r#"{"HR": {"dashboard": "yes"}}"#;
        assert!(serde_json::from_str::<PermissionTable>(bad).is_err());
    }

    #[test]
    fn test_granted_modules() {
        let table = PermissionTable::defaults();
        assert_eq!(
            table.granted_modules(Role::Employee),
            vec![
                Module::Dashboard,
                Module::Attendance,
                Module::Timeoff,
                Module::Profile
            ]
        );
    }
}
