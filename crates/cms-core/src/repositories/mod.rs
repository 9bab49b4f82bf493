//! Repository traits (ports)

pub mod menu_repository;
pub mod grant_repository;
pub mod actor_repository;
pub mod memory;

pub use menu_repository::MenuRepository;
pub use grant_repository::GrantRepository;
pub use actor_repository::ActorRepository;
pub use memory::{InMemoryActorRepository, InMemoryGrantRepository, InMemoryMenuRepository};
