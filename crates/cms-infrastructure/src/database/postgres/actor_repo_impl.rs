// ============================================================================
// CMS Infrastructure - PostgreSQL Actor Repository
// File: crates/cms-infrastructure/src/database/postgres/actor_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use tracing::error;
use uuid::Uuid;

use cms_core::domain::Actor;
use cms_core::error::DomainError;
use cms_core::repositories::ActorRepository;

pub struct PgActorRepository {
    pool: PgPool,
}

impl PgActorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ActorRow {
    pub id: Uuid,
    pub username: String,
    pub is_superuser: bool,
    pub is_staff: bool,
    pub can_change_menu_items: bool,
    pub groups: Vec<String>,
}

impl From<ActorRow> for Actor {
    fn from(row: ActorRow) -> Self {
        Actor {
            id: row.id,
            username: row.username,
            is_superuser: row.is_superuser,
            is_staff: row.is_staff,
            can_change_menu_items: row.can_change_menu_items,
            groups: row.groups,
        }
    }
}

#[async_trait]
impl ActorRepository for PgActorRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Actor>, DomainError> {
        let row: Option<ActorRow> = sqlx::query_as(
            r#"
            SELECT
                a.id, a.username, a.is_superuser, a.is_staff, a.can_change_menu_items,
                COALESCE(
                    ARRAY_AGG(g.group_name) FILTER (WHERE g.group_name IS NOT NULL),
                    '{}'
                )::TEXT[] AS groups
            FROM actors a
            LEFT JOIN actor_groups g ON g.actor_id = a.id
            WHERE a.id = $1
            GROUP BY a.id
            "#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding actor by id: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }
}
