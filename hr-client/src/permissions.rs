//! Client-side permission cache
//!
//! A persisted copy of the server's table, stored under the
//! `permissions-storage` key as `{"state":{"permissions":…},"version":0}`.
//! The server stays authoritative; [`PermissionCache::refresh`] overwrites
//! the local copy with the server's.

use serde::{Deserialize, Serialize};
use shared::client::PERMISSIONS_STORAGE_KEY;
use shared::{Module, PermissionTable, Role};

use crate::{ClientResult, HttpClient, LocalStorage};

/// Format version of the stored entry
pub const STORAGE_VERSION: u32 = 0;

#[derive(Debug, Serialize, Deserialize)]
struct StoredPermissions {
    state: PermissionState,
    version: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct PermissionState {
    permissions: PermissionTable,
}

#[derive(Debug)]
pub struct PermissionCache {
    storage: LocalStorage,
    table: PermissionTable,
}

impl PermissionCache {
    /// Load the cached table, falling back to the defaults when the entry
    /// is missing, unreadable or incomplete
    pub fn open(storage: LocalStorage) -> Self {
        let table = match storage.get_item::<StoredPermissions>(PERMISSIONS_STORAGE_KEY) {
            Ok(Some(stored)) if stored.state.permissions.validate_complete().is_ok() => {
                stored.state.permissions
            }
            Ok(Some(_)) => {
                tracing::warn!("Cached permission table is incomplete, using defaults");
                PermissionTable::defaults()
            }
            Ok(None) => PermissionTable::defaults(),
            Err(e) => {
                tracing::warn!(error = %e, "Cached permission table unreadable, using defaults");
                PermissionTable::defaults()
            }
        };

        Self { storage, table }
    }

    pub fn table(&self) -> &PermissionTable {
        &self.table
    }

    pub fn has_permission(&self, role: Role, module: Module) -> bool {
        self.table.has_permission(role, module)
    }

    /// Replace the cached table
    pub fn set_permissions(&mut self, table: PermissionTable) -> ClientResult<()> {
        self.table.set_permissions(table);
        self.persist()
    }

    /// Set one cached cell
    pub fn update_role_permission(
        &mut self,
        role: Role,
        module: Module,
        allowed: bool,
    ) -> ClientResult<()> {
        self.table.update_role_permission(role, module, allowed);
        self.persist()
    }

    /// Restore the seed table locally
    pub fn reset_to_defaults(&mut self) -> ClientResult<()> {
        self.table.reset_to_defaults();
        self.persist()
    }

    /// Overwrite the cache with the server's table
    pub async fn refresh(&mut self, client: &HttpClient) -> ClientResult<()> {
        let table = client.permissions().await?;
        tracing::debug!("Permission cache refreshed from server");
        self.set_permissions(table)
    }

    fn persist(&self) -> ClientResult<()> {
        let stored = StoredPermissions {
            state: PermissionState {
                permissions: self.table.clone(),
            },
            version: STORAGE_VERSION,
        };
        self.storage.set_item(PERMISSIONS_STORAGE_KEY, &stored)
    }
}
