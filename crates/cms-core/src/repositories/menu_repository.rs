//! Menu node repository trait (port)

use async_trait::async_trait;
use crate::domain::{MenuNode, MenuNodeId, Placement};
use crate::error::DomainError;

#[async_trait]
pub trait MenuRepository: Send + Sync {
    /// Every node of both forests; the basis of a [`crate::MenuTree`] snapshot.
    async fn list_all(&self) -> Result<Vec<MenuNode>, DomainError>;
    async fn find_by_id(&self, id: &MenuNodeId) -> Result<Option<MenuNode>, DomainError>;
    async fn create(&self, node: &MenuNode) -> Result<MenuNode, DomainError>;
    async fn update(&self, node: &MenuNode) -> Result<MenuNode, DomainError>;
    /// Writes parent, order and menu type of one node in a single transaction.
    async fn save_placement(&self, placement: &Placement) -> Result<(), DomainError>;
    /// Fails with [`DomainError::MenuHasChildren`] while children exist.
    async fn delete(&self, id: &MenuNodeId) -> Result<(), DomainError>;
}
