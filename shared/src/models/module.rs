//! Application modules (unit of permission granularity)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Functional area of the portal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Module {
    Dashboard,
    Employees,
    Attendance,
    Timeoff,
    Payroll,
    Reports,
    Settings,
    Profile,
    Hr,
}

impl Module {
    pub const ALL: [Module; 9] = [
        Module::Dashboard,
        Module::Employees,
        Module::Attendance,
        Module::Timeoff,
        Module::Payroll,
        Module::Reports,
        Module::Settings,
        Module::Profile,
        Module::Hr,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Module::Dashboard => "dashboard",
            Module::Employees => "employees",
            Module::Attendance => "attendance",
            Module::Timeoff => "timeoff",
            Module::Payroll => "payroll",
            Module::Reports => "reports",
            Module::Settings => "settings",
            Module::Profile => "profile",
            Module::Hr => "hr",
        }
    }

    /// Page route guarding this module
    pub fn path(&self) -> String {
        format!("/{}", self.as_str())
    }

    /// Resolve the module owning a page path (`/payroll/runs/3` → payroll)
    pub fn from_path(path: &str) -> Option<Module> {
        let first = path.trim_start_matches('/').split('/').next()?;
        first.parse().ok()
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown module string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown module: {0}")]
pub struct UnknownModule(pub String);

impl FromStr for Module {
    type Err = UnknownModule;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Module::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| UnknownModule(s.to_string()))
    }
}
