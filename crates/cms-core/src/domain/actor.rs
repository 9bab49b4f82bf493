//! Acting user as seen by the menu subsystem

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cms_shared::constants::ANONYMOUS_GROUP;

/// The authenticated (or anonymous) user behind a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: Uuid,
    pub username: String,
    pub is_superuser: bool,
    pub is_staff: bool,
    /// Model-level permission to open the menu item management at all.
    pub can_change_menu_items: bool,
    pub groups: Vec<String>,
}

impl Actor {
    pub fn anonymous() -> Self {
        Self {
            id: Uuid::nil(),
            username: "anonymous".to_string(),
            is_superuser: false,
            is_staff: false,
            can_change_menu_items: false,
            groups: vec![ANONYMOUS_GROUP.to_string()],
        }
    }

    pub fn is_anonymous(&self) -> bool {
        self.id.is_nil()
    }

    pub fn in_group(&self, group: &str) -> bool {
        self.groups.iter().any(|g| g == group)
    }

    /// Superusers always may manage menu items.
    pub fn may_manage_menu(&self) -> bool {
        self.is_superuser || self.can_change_menu_items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_actor() {
        let actor = Actor::anonymous();
        assert!(actor.is_anonymous());
        assert!(actor.in_group(ANONYMOUS_GROUP));
        assert!(!actor.may_manage_menu());
    }
}
