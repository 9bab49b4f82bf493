// ============================================================================
// CMS Core - Menu Grant Entity (Permission Matrix)
// File: crates/cms-core/src/domain/grant.rs
// Description: Per-object permissions linking groups to menu nodes
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::menu_node::MenuNodeId;

/// Menu permission flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MenuPermissions {
    pub is_edit: bool,
    pub is_delete: bool,
}

impl MenuPermissions {
    pub fn full_access() -> Self {
        Self {
            is_edit: true,
            is_delete: true,
        }
    }

    pub fn edit_only() -> Self {
        Self {
            is_edit: true,
            is_delete: false,
        }
    }

    pub fn no_access() -> Self {
        Self::default()
    }

    pub fn has_any(&self) -> bool {
        self.is_edit || self.is_delete
    }

    /// Union of two permission sets (an actor holds the sum of its groups).
    pub fn merge(self, other: MenuPermissions) -> Self {
        Self {
            is_edit: self.is_edit || other.is_edit,
            is_delete: self.is_delete || other.is_delete,
        }
    }
}

/// Menu Grant entity (one row of the permission matrix)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuGrant {
    pub id: Uuid,
    pub group_name: String,
    pub menu_node_id: MenuNodeId,

    // Permission flags
    pub is_edit: bool,
    pub is_delete: bool,

    pub created_at: DateTime<Utc>,
}

impl MenuGrant {
    pub fn new(group_name: String, menu_node_id: MenuNodeId, permissions: MenuPermissions) -> Self {
        Self {
            id: Uuid::new_v4(),
            group_name,
            menu_node_id,
            is_edit: permissions.is_edit,
            is_delete: permissions.is_delete,
            created_at: Utc::now(),
        }
    }

    pub fn to_permissions(&self) -> MenuPermissions {
        MenuPermissions {
            is_edit: self.is_edit,
            is_delete: self.is_delete,
        }
    }
}

/// Model-level permissions a group holds on every menu node it creates.
/// Copied onto each new node as a [`MenuGrant`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupDefaults {
    pub group_name: String,
    pub permissions: MenuPermissions,
}
