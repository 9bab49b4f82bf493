//! Per-object permission checks consumed by the menu algorithms.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::{Actor, MenuNode, MenuTarget};
use crate::error::DomainError;
use crate::repositories::GrantRepository;

/// Capability checks for one (actor, node) pair. Implementations must
/// answer from live state; callers never cache the result.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuAuthority: Send + Sync {
    async fn can_view(&self, actor: &Actor, node: &MenuNode) -> Result<bool, DomainError>;
    async fn can_edit(&self, actor: &Actor, node: &MenuNode) -> Result<bool, DomainError>;

    async fn can_delete(&self, actor: &Actor, node: &MenuNode) -> Result<bool, DomainError> {
        self.can_edit(actor, node).await
    }
}

/// Authority backed by group grants on menu nodes and documents.
pub struct GrantAuthority {
    grants: Arc<dyn GrantRepository>,
}

impl GrantAuthority {
    pub fn new(grants: Arc<dyn GrantRepository>) -> Self {
        Self { grants }
    }
}

#[async_trait]
impl MenuAuthority for GrantAuthority {
    async fn can_view(&self, actor: &Actor, node: &MenuNode) -> Result<bool, DomainError> {
        if actor.is_superuser {
            return Ok(true);
        }
        if node.staff_only && !actor.is_staff {
            return Ok(false);
        }
        match &node.target {
            MenuTarget::Document(document) => {
                let allowed = self.grants.can_view_document(&actor.groups, &document.id).await?;
                if !allowed {
                    debug!("Actor {} may not view document {}", actor.username, document.slug);
                }
                Ok(allowed)
            }
            _ => Ok(true),
        }
    }

    async fn can_edit(&self, actor: &Actor, node: &MenuNode) -> Result<bool, DomainError> {
        if actor.is_superuser {
            return Ok(true);
        }
        let permissions = self.grants.permissions_for(&actor.groups, &node.id).await?;
        Ok(permissions.is_edit)
    }

    async fn can_delete(&self, actor: &Actor, node: &MenuNode) -> Result<bool, DomainError> {
        if actor.is_superuser {
            return Ok(true);
        }
        let permissions = self.grants.permissions_for(&actor.groups, &node.id).await?;
        Ok(permissions.is_delete)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DocumentRef, MenuGrant, MenuPermissions, MenuType};
    use crate::repositories::InMemoryGrantRepository;
    use uuid::Uuid;

    fn actor(groups: &[&str], is_staff: bool) -> Actor {
        Actor {
            id: Uuid::new_v4(),
            username: "member".to_string(),
            is_superuser: false,
            is_staff,
            can_change_menu_items: true,
            groups: groups.iter().map(|g| g.to_string()).collect(),
        }
    }

    fn superuser() -> Actor {
        Actor {
            is_superuser: true,
            ..actor(&[], false)
        }
    }

    fn link_node(staff_only: bool) -> MenuNode {
        MenuNode::new(
            "Polls".to_string(),
            MenuTarget::Link("polls:index".to_string()),
            MenuType::MainMenu,
            None,
            0,
            staff_only,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_staff_only_hidden_from_students() {
        let authority = GrantAuthority::new(Arc::new(InMemoryGrantRepository::new()));
        let node = link_node(true);

        assert!(!authority.can_view(&actor(&["Students"], false), &node).await.unwrap());
        assert!(authority.can_view(&actor(&["Staff"], true), &node).await.unwrap());
        assert!(authority.can_view(&superuser(), &node).await.unwrap());
    }

    #[tokio::test]
    async fn test_document_visibility_follows_document_grants() {
        let grants = Arc::new(InMemoryGrantRepository::new());
        let document = DocumentRef { id: Uuid::new_v4(), slug: "minutes-2016".to_string() };
        grants.allow_document_view("Staff", document.id);
        let authority = GrantAuthority::new(grants);
        let node = MenuNode::new(
            "Minutes".to_string(),
            MenuTarget::Document(document),
            MenuType::MainMenu,
            None,
            0,
            false,
        )
        .unwrap();

        assert!(authority.can_view(&actor(&["Staff"], true), &node).await.unwrap());
        assert!(!authority.can_view(&actor(&["Students"], false), &node).await.unwrap());
    }

    #[tokio::test]
    async fn test_edit_and_delete_from_grants() {
        let grants = Arc::new(InMemoryGrantRepository::new());
        let node = link_node(false);
        grants
            .grant(&MenuGrant::new("Staff".to_string(), node.id, MenuPermissions::edit_only()))
            .await
            .unwrap();
        let authority = GrantAuthority::new(grants);
        let staff = actor(&["Staff"], true);

        assert!(authority.can_edit(&staff, &node).await.unwrap());
        assert!(!authority.can_delete(&staff, &node).await.unwrap());
        assert!(!authority.can_edit(&actor(&["Students"], false), &node).await.unwrap());
        assert!(authority.can_delete(&superuser(), &node).await.unwrap());
    }
}
