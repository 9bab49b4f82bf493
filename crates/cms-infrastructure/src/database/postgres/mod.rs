//! PostgreSQL repository implementations

pub mod menu_repo_impl;
pub mod grant_repo_impl;
pub mod actor_repo_impl;

pub use menu_repo_impl::PgMenuRepository;
pub use grant_repo_impl::PgGrantRepository;
pub use actor_repo_impl::PgActorRepository;
