//! In-memory adapters for local development and tests

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::domain::{Actor, GroupDefaults, MenuGrant, MenuNode, MenuNodeId, MenuPermissions, Placement};
use crate::error::DomainError;

use super::{ActorRepository, GrantRepository, MenuRepository};

#[derive(Default)]
pub struct InMemoryMenuRepository {
    nodes: RwLock<HashMap<MenuNodeId, MenuNode>>,
    placement_writes: AtomicUsize,
}

impl InMemoryMenuRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_nodes(nodes: impl IntoIterator<Item = MenuNode>) -> Self {
        let repo = Self::new();
        {
            let mut map = repo.nodes.write();
            for node in nodes {
                map.insert(node.id, node);
            }
        }
        repo
    }

    pub fn get(&self, id: &MenuNodeId) -> Option<MenuNode> {
        self.nodes.read().get(id).cloned()
    }

    /// Number of `save_placement` calls served so far.
    pub fn placement_writes(&self) -> usize {
        self.placement_writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MenuRepository for InMemoryMenuRepository {
    async fn list_all(&self) -> Result<Vec<MenuNode>, DomainError> {
        Ok(self.nodes.read().values().cloned().collect())
    }

    async fn find_by_id(&self, id: &MenuNodeId) -> Result<Option<MenuNode>, DomainError> {
        Ok(self.get(id))
    }

    async fn create(&self, node: &MenuNode) -> Result<MenuNode, DomainError> {
        let mut nodes = self.nodes.write();
        if let Some(parent) = node.parent_id {
            if !nodes.contains_key(&parent) {
                return Err(DomainError::InvalidParent(format!("parent {} does not exist", parent)));
            }
        }
        nodes.insert(node.id, node.clone());
        Ok(node.clone())
    }

    async fn update(&self, node: &MenuNode) -> Result<MenuNode, DomainError> {
        let mut nodes = self.nodes.write();
        let stored = nodes
            .get_mut(&node.id)
            .ok_or(DomainError::MenuNodeNotFound(node.id))?;
        *stored = node.clone();
        stored.modified_at = Some(Utc::now());
        Ok(stored.clone())
    }

    async fn save_placement(&self, placement: &Placement) -> Result<(), DomainError> {
        let mut nodes = self.nodes.write();
        let stored = nodes
            .get_mut(&placement.node_id)
            .ok_or(DomainError::MenuNodeNotFound(placement.node_id))?;
        stored.apply_placement(placement);
        self.placement_writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn delete(&self, id: &MenuNodeId) -> Result<(), DomainError> {
        let mut nodes = self.nodes.write();
        if nodes.values().any(|n| n.parent_id.as_ref() == Some(id)) {
            return Err(DomainError::MenuHasChildren(*id));
        }
        nodes.remove(id).ok_or(DomainError::MenuNodeNotFound(*id))?;
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryGrantRepository {
    grants: RwLock<Vec<MenuGrant>>,
    defaults: RwLock<Vec<GroupDefaults>>,
    /// document id -> groups allowed to view it
    document_viewers: RwLock<HashMap<Uuid, HashSet<String>>>,
}

impl InMemoryGrantRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_group_defaults(&self, group_name: &str, permissions: MenuPermissions) {
        let mut defaults = self.defaults.write();
        defaults.retain(|d| d.group_name != group_name);
        defaults.push(GroupDefaults {
            group_name: group_name.to_string(),
            permissions,
        });
    }

    pub fn allow_document_view(&self, group_name: &str, document_id: Uuid) {
        self.document_viewers
            .write()
            .entry(document_id)
            .or_default()
            .insert(group_name.to_string());
    }

    pub fn grants_for_node(&self, node_id: &MenuNodeId) -> Vec<MenuGrant> {
        self.grants
            .read()
            .iter()
            .filter(|g| &g.menu_node_id == node_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl GrantRepository for InMemoryGrantRepository {
    async fn permissions_for(&self, groups: &[String], node_id: &MenuNodeId) -> Result<MenuPermissions, DomainError> {
        Ok(self
            .grants
            .read()
            .iter()
            .filter(|g| &g.menu_node_id == node_id && groups.contains(&g.group_name))
            .fold(MenuPermissions::no_access(), |acc, g| acc.merge(g.to_permissions())))
    }

    async fn can_view_document(&self, groups: &[String], document_id: &Uuid) -> Result<bool, DomainError> {
        Ok(self
            .document_viewers
            .read()
            .get(document_id)
            .is_some_and(|viewers| groups.iter().any(|g| viewers.contains(g))))
    }

    async fn grant(&self, grant: &MenuGrant) -> Result<(), DomainError> {
        let mut grants = self.grants.write();
        grants.retain(|g| !(g.menu_node_id == grant.menu_node_id && g.group_name == grant.group_name));
        grants.push(grant.clone());
        Ok(())
    }

    async fn assign_group_defaults(&self, node_id: &MenuNodeId) -> Result<Vec<MenuGrant>, DomainError> {
        let defaults = self.defaults.read().clone();
        let mut assigned = Vec::new();
        for default in defaults.into_iter().filter(|d| d.permissions.has_any()) {
            let grant = MenuGrant::new(default.group_name, *node_id, default.permissions);
            self.grant(&grant).await?;
            assigned.push(grant);
        }
        Ok(assigned)
    }

    async fn remove_for_node(&self, node_id: &MenuNodeId) -> Result<(), DomainError> {
        self.grants.write().retain(|g| &g.menu_node_id != node_id);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryActorRepository {
    actors: RwLock<HashMap<Uuid, Actor>>,
}

impl InMemoryActorRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, actor: Actor) {
        self.actors.write().insert(actor.id, actor);
    }
}

#[async_trait]
impl ActorRepository for InMemoryActorRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Actor>, DomainError> {
        Ok(self.actors.read().get(id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MenuTarget, MenuType};

    fn folder(title: &str) -> MenuNode {
        MenuNode::new(title.to_string(), MenuTarget::Folder, MenuType::MainMenu, None, 0, false).unwrap()
    }

    #[tokio::test]
    async fn test_delete_restricted_by_children() {
        let parent = folder("parent");
        let mut child = folder("child");
        child.parent_id = Some(parent.id);
        let repo = InMemoryMenuRepository::with_nodes([parent.clone(), child.clone()]);

        assert!(matches!(repo.delete(&parent.id).await, Err(DomainError::MenuHasChildren(_))));
        repo.delete(&child.id).await.unwrap();
        repo.delete(&parent.id).await.unwrap();
        assert!(repo.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_group_permissions_are_merged() {
        let node = folder("node");
        let grants = InMemoryGrantRepository::new();
        grants
            .grant(&MenuGrant::new("Staff".to_string(), node.id, MenuPermissions::edit_only()))
            .await
            .unwrap();
        grants
            .grant(&MenuGrant::new(
                "Admins".to_string(),
                node.id,
                MenuPermissions { is_edit: false, is_delete: true },
            ))
            .await
            .unwrap();

        let groups = vec!["Staff".to_string(), "Admins".to_string()];
        assert_eq!(grants.permissions_for(&groups, &node.id).await.unwrap(), MenuPermissions::full_access());
        let outsider = vec!["Students".to_string()];
        assert_eq!(grants.permissions_for(&outsider, &node.id).await.unwrap(), MenuPermissions::no_access());
    }
}
