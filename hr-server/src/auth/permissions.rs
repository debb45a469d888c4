//! Server-side permission store
//!
//! Holds the authoritative [`PermissionTable`] in memory and mirrors every
//! mutation to a JSON snapshot under the work directory. A mutation is
//! applied in memory only after the snapshot was written.

use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use shared::{AppError, AppResult, ErrorCode, GuardOutcome, Module, PermissionTable, Role};

/// File name of the snapshot inside `WORK_DIR`
pub const SNAPSHOT_FILE: &str = "permissions.json";

#[derive(Debug)]
pub struct PermissionStore {
    table: RwLock<PermissionTable>,
    /// `None` keeps the store memory-only
    path: Option<PathBuf>,
}

impl PermissionStore {
    /// Memory-only store seeded with the defaults
    pub fn in_memory() -> Self {
        Self {
            table: RwLock::new(PermissionTable::defaults()),
            path: None,
        }
    }

    /// Load the snapshot at `path`
    ///
    /// A missing file yields the defaults. An unreadable, corrupt or
    /// incomplete file also yields the defaults and is reported at `warn`.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let table = match std::fs::read_to_string(&path) {
            Ok(raw) => match parse_snapshot(&raw) {
                Ok(table) => {
                    tracing::info!(path = %path.display(), "Loaded permission snapshot");
                    table
                }
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Permission snapshot unusable, falling back to defaults"
                    );
                    PermissionTable::defaults()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "No permission snapshot, using defaults");
                PermissionTable::defaults()
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Failed to read permission snapshot, falling back to defaults"
                );
                PermissionTable::defaults()
            }
        };

        Self {
            table: RwLock::new(table),
            path: Some(path),
        }
    }

    /// Load `<work_dir>/permissions.json`
    pub fn open_in(work_dir: impl AsRef<Path>) -> Self {
        Self::load(work_dir.as_ref().join(SNAPSHOT_FILE))
    }

    /// Copy of the current table
    pub fn snapshot(&self) -> PermissionTable {
        self.table.read().clone()
    }

    pub fn has_permission(&self, role: Role, module: Module) -> bool {
        self.table.read().has_permission(role, module)
    }

    /// Run the guard decision against the current table
    pub fn authorize(&self, role: Option<Role>, module: Module) -> GuardOutcome {
        shared::authorize(role, module, &self.table.read())
    }

    /// Replace the whole table. The table must be complete.
    pub fn set_permissions(&self, table: PermissionTable) -> AppResult<PermissionTable> {
        table
            .validate_complete()
            .map_err(|e| AppError::validation(e.to_string()))?;
        self.mutate(|current| current.set_permissions(table))
    }

    /// Set a single `(role, module)` cell
    pub fn update_role_permission(
        &self,
        role: Role,
        module: Module,
        allowed: bool,
    ) -> AppResult<PermissionTable> {
        self.mutate(|current| current.update_role_permission(role, module, allowed))
    }

    /// Restore the seed table
    pub fn reset_to_defaults(&self) -> AppResult<PermissionTable> {
        self.mutate(PermissionTable::reset_to_defaults)
    }

    fn mutate(&self, apply: impl FnOnce(&mut PermissionTable)) -> AppResult<PermissionTable> {
        let mut guard = self.table.write();
        let mut next = guard.clone();
        apply(&mut next);

        if let Some(path) = &self.path {
            write_snapshot(path, &next)?;
        }

        *guard = next.clone();
        Ok(next)
    }
}

impl Default for PermissionStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

fn parse_snapshot(raw: &str) -> Result<PermissionTable, AppError> {
    let table: PermissionTable = serde_json::from_str(raw)
        .map_err(|e| AppError::with_message(ErrorCode::StorageCorrupted, e.to_string()))?;
    table
        .validate_complete()
        .map_err(|e| AppError::with_message(ErrorCode::StorageCorrupted, e.to_string()))?;
    Ok(table)
}

/// Write to a sibling temp file, then rename over the snapshot
fn write_snapshot(path: &Path, table: &PermissionTable) -> AppResult<()> {
    let fail = |e: std::io::Error| {
        tracing::error!(path = %path.display(), error = %e, "Failed to write permission snapshot");
        AppError::with_message(
            ErrorCode::StorageWriteFailed,
            "Failed to save permissions",
        )
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(fail)?;
    }

    let json = serde_json::to_vec_pretty(table)
        .map_err(|e| AppError::internal(format!("Failed to serialize permissions: {}", e)))?;

    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json).map_err(fail)?;
    std::fs::rename(&tmp, path).map_err(fail)?;
    Ok(())
}
