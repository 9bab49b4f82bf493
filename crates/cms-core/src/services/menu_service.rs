// ============================================================================
// CMS Core - Menu Item Management
// File: crates/cms-core/src/services/menu_service.rs
// Description: Create, update, delete and list menu nodes
// ============================================================================

use std::sync::Arc;

use serde::Deserialize;
use tracing::{info, warn};
use validator::Validate;

use cms_shared::constants::MAX_MENU_DEPTH;

use crate::authority::MenuAuthority;
use crate::domain::{Actor, DocumentRef, MenuNode, MenuNodeId, MenuTarget, MenuType};
use crate::error::DomainError;
use crate::repositories::{GrantRepository, MenuRepository};
use crate::tree::MenuTree;

/// Input for a new menu node. `link` and `document` are mutually exclusive;
/// leaving both empty creates a folder.
#[derive(Debug, Clone, Deserialize)]
pub struct NewMenuNode {
    pub title: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub document: Option<DocumentRef>,
    #[serde(default = "default_menu_type")]
    pub menu_type: MenuType,
    #[serde(default)]
    pub parent_id: Option<MenuNodeId>,
    #[serde(default)]
    pub staff_only: bool,
}

fn default_menu_type() -> MenuType {
    MenuType::MainMenu
}

/// Partial edit. The target is replaced when `link` or `document` is given.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MenuNodeChanges {
    pub title: Option<String>,
    pub link: Option<String>,
    pub document: Option<DocumentRef>,
    pub staff_only: Option<bool>,
}

impl MenuNodeChanges {
    fn touches_target(&self) -> bool {
        self.link.is_some() || self.document.is_some()
    }
}

pub struct MenuService {
    menus: Arc<dyn MenuRepository>,
    grants: Arc<dyn GrantRepository>,
    authority: Arc<dyn MenuAuthority>,
}

impl MenuService {
    pub fn new(
        menus: Arc<dyn MenuRepository>,
        grants: Arc<dyn GrantRepository>,
        authority: Arc<dyn MenuAuthority>,
    ) -> Self {
        Self {
            menus,
            grants,
            authority,
        }
    }

    /// Nodes the actor may edit, main menu first, grouped by parent.
    pub async fn list_editable(&self, actor: &Actor) -> Result<Vec<MenuNode>, DomainError> {
        let mut editable = Vec::new();
        for node in self.menus.list_all().await? {
            if self.authority.can_edit(actor, &node).await? {
                editable.push(node);
            }
        }
        editable.sort_by(|a, b| {
            (a.menu_type == MenuType::Footer, a.parent_id, a.order, &a.title).cmp(&(
                b.menu_type == MenuType::Footer,
                b.parent_id,
                b.order,
                &b.title,
            ))
        });
        Ok(editable)
    }

    pub async fn create(&self, actor: &Actor, input: NewMenuNode) -> Result<MenuNode, DomainError> {
        if !actor.may_manage_menu() {
            return Err(DomainError::PermissionDenied(format!(
                "{} may not add menu items",
                actor.username
            )));
        }

        let target = MenuTarget::from_parts(input.link, input.document)?;
        if !actor.is_superuser {
            // members link documents below an item they already manage
            if target.document().is_none() {
                return Err(DomainError::PermissionDenied(
                    "only documents may be added to the menu".to_string(),
                ));
            }
            if input.parent_id.is_none() {
                return Err(DomainError::PermissionDenied(
                    "a parent item is required".to_string(),
                ));
            }
        }

        let tree = MenuTree::from_nodes(self.menus.list_all().await?);
        if let Some(parent_id) = input.parent_id {
            let parent = tree
                .get(&parent_id)
                .ok_or_else(|| DomainError::InvalidParent(format!("parent {} does not exist", parent_id)))?;
            if parent.menu_type != MenuType::MainMenu {
                return Err(DomainError::InvalidParent(
                    "only main menu items can have children".to_string(),
                ));
            }
            let depth = tree.depth(&parent_id).unwrap_or(MAX_MENU_DEPTH);
            if depth >= MAX_MENU_DEPTH {
                return Err(DomainError::InvalidParent(format!(
                    "menus are limited to {} levels",
                    MAX_MENU_DEPTH
                )));
            }
            if !actor.is_superuser && !self.authority.can_edit(actor, parent).await? {
                return Err(DomainError::PermissionDenied(format!(
                    "{} may not add items below {}",
                    actor.username, parent.title
                )));
            }
        }

        let order = tree
            .children_of(input.parent_id, input.menu_type)
            .iter()
            .filter_map(|id| tree.get(id))
            .map(|n| n.order)
            .max()
            .map_or(0, |max| max + 1);

        let node = MenuNode::new(
            input.title,
            target,
            input.menu_type,
            input.parent_id,
            order,
            input.staff_only,
        )?;
        let created = self.menus.create(&node).await?;
        let grants = self.grants.assign_group_defaults(&created.id).await?;

        info!(
            "Menu item created: {} by {} ({} default grants)",
            created.title,
            actor.username,
            grants.len()
        );
        Ok(created)
    }

    pub async fn update(
        &self,
        actor: &Actor,
        id: &MenuNodeId,
        changes: MenuNodeChanges,
    ) -> Result<MenuNode, DomainError> {
        let mut node = self.find_existing(id).await?;
        if !self.authority.can_edit(actor, &node).await? {
            return Err(DomainError::PermissionDenied(format!(
                "{} may not edit {}",
                actor.username, node.title
            )));
        }

        if changes.touches_target() {
            let target = MenuTarget::from_parts(changes.link.clone(), changes.document.clone())?;
            if !actor.is_superuser && target.link().is_some() {
                return Err(DomainError::PermissionDenied(
                    "only superusers may link named routes".to_string(),
                ));
            }
            node.target = target;
        }
        if let Some(title) = changes.title {
            node.title = title.trim().to_string();
        }
        if let Some(staff_only) = changes.staff_only {
            node.staff_only = staff_only;
        }
        node.validate()?;

        let updated = self.menus.update(&node).await?;
        info!("Menu item updated: {}", updated.id);
        Ok(updated)
    }

    pub async fn delete(&self, actor: &Actor, id: &MenuNodeId) -> Result<(), DomainError> {
        let node = self.find_existing(id).await?;
        if !self.authority.can_delete(actor, &node).await? {
            return Err(DomainError::PermissionDenied(format!(
                "{} may not delete {}",
                actor.username, node.title
            )));
        }

        if let Err(e) = self.menus.delete(id).await {
            warn!("Menu item {} not deleted: {}", id, e);
            return Err(e);
        }
        self.grants.remove_for_node(id).await?;

        info!("Menu item deleted: {} by {}", node.title, actor.username);
        Ok(())
    }

    async fn find_existing(&self, id: &MenuNodeId) -> Result<MenuNode, DomainError> {
        self.menus
            .find_by_id(id)
            .await?
            .ok_or(DomainError::MenuNodeNotFound(*id))
    }
}
