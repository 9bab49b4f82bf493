//! Actor repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;
use crate::domain::Actor;
use crate::error::DomainError;

#[async_trait]
pub trait ActorRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Actor>, DomainError>;
}
