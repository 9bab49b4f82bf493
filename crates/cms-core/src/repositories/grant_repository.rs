//! Grant repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;
use crate::domain::{MenuGrant, MenuNodeId, MenuPermissions};
use crate::error::DomainError;

#[async_trait]
pub trait GrantRepository: Send + Sync {
    /// Union of the permissions the given groups hold on one node.
    async fn permissions_for(&self, groups: &[String], node_id: &MenuNodeId) -> Result<MenuPermissions, DomainError>;
    async fn can_view_document(&self, groups: &[String], document_id: &Uuid) -> Result<bool, DomainError>;
    async fn grant(&self, grant: &MenuGrant) -> Result<(), DomainError>;
    /// Copies every group's default permissions onto a freshly created node.
    async fn assign_group_defaults(&self, node_id: &MenuNodeId) -> Result<Vec<MenuGrant>, DomainError>;
    async fn remove_for_node(&self, node_id: &MenuNodeId) -> Result<(), DomainError>;
}
