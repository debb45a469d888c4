//! Component guard
//!
//! Gates a UI component on the cached table. Server page routes run the
//! same decision against the authoritative table.

use shared::{GuardOutcome, Module, PermissionTable, Role, UserInfo, authorize};

use crate::PermissionCache;

/// Guard for one module's components
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleGuard {
    module: Module,
}

impl ModuleGuard {
    pub fn new(module: Module) -> Self {
        Self { module }
    }

    pub fn module(&self) -> Module {
        self.module
    }

    /// Decide for the signed-in `user` (`None` when signed out)
    pub fn check(&self, user: Option<&UserInfo>, cache: &PermissionCache) -> GuardOutcome {
        authorize(user.map(|u| u.role), self.module, cache.table())
    }

    /// Render `content` when authorized, otherwise return the redirect target
    pub fn render<T>(
        &self,
        user: Option<&UserInfo>,
        cache: &PermissionCache,
        content: impl FnOnce() -> T,
    ) -> Result<T, &'static str> {
        match self.check(user, cache).redirect() {
            None => Ok(content()),
            Some(target) => Err(target),
        }
    }
}

/// Modules `role` may open, for navigation menus
pub fn visible_modules(role: Role, table: &PermissionTable) -> Vec<Module> {
    Module::ALL
        .into_iter()
        .filter(|m| authorize(Some(role), *m, table).is_authorized())
        .collect()
}
