//! Role Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// User role. Exactly one per user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Hr,
    Payroll,
    Employee,
}

impl Role {
    /// All roles, in table order
    pub const ALL: [Role; 4] = [Role::Admin, Role::Hr, Role::Payroll, Role::Employee];

    /// Wire name (`ADMIN`, `HR`, ...)
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Hr => "HR",
            Role::Payroll => "PAYROLL",
            Role::Employee => "EMPLOYEE",
        }
    }

    /// Static descriptor carrying this role's capabilities
    pub fn descriptor(&self) -> &'static RoleDescriptor {
        match self {
            Role::Admin => &ADMIN,
            Role::Hr => &HR,
            Role::Payroll => &PAYROLL,
            Role::Employee => &EMPLOYEE,
        }
    }

    /// Shorthand for `descriptor().bypass_all`
    pub fn bypasses_permissions(&self) -> bool {
        self.descriptor().bypass_all
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown role string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Role::Admin),
            "HR" => Ok(Role::Hr),
            "PAYROLL" => Ok(Role::Payroll),
            "EMPLOYEE" => Ok(Role::Employee),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// Role capabilities
///
/// `bypass_all` roles are authorized for every module without consulting
/// the permission table. Only ADMIN and HR carry it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleDescriptor {
    pub role: Role,
    pub label: &'static str,
    pub bypass_all: bool,
    /// Landing page after login
    pub dashboard_path: &'static str,
}

static ADMIN: RoleDescriptor = RoleDescriptor {
    role: Role::Admin,
    label: "Administrator",
    bypass_all: true,
    dashboard_path: "/dashboard/admin",
};

static HR: RoleDescriptor = RoleDescriptor {
    role: Role::Hr,
    label: "HR Manager",
    bypass_all: true,
    dashboard_path: "/dashboard/hr",
};

static PAYROLL: RoleDescriptor = RoleDescriptor {
    role: Role::Payroll,
    label: "Payroll Officer",
    bypass_all: false,
    dashboard_path: "/dashboard/payroll",
};

static EMPLOYEE: RoleDescriptor = RoleDescriptor {
    role: Role::Employee,
    label: "Employee",
    bypass_all: false,
    dashboard_path: "/dashboard/employee",
};
