// ============================================================================
// CMS Infrastructure - PostgreSQL Grant Repository
// File: crates/cms-infrastructure/src/database/postgres/grant_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{debug, error};
use uuid::Uuid;

use cms_core::domain::{MenuGrant, MenuNodeId, MenuPermissions};
use cms_core::error::DomainError;
use cms_core::repositories::GrantRepository;

pub struct PgGrantRepository {
    pool: PgPool,
}

impl PgGrantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct MenuGrantRow {
    pub id: Uuid,
    pub group_name: String,
    pub menu_node_id: Uuid,
    pub is_edit: bool,
    pub is_delete: bool,
    pub created_at: DateTime<Utc>,
}

impl From<MenuGrantRow> for MenuGrant {
    fn from(row: MenuGrantRow) -> Self {
        MenuGrant {
            id: row.id,
            group_name: row.group_name,
            menu_node_id: row.menu_node_id,
            is_edit: row.is_edit,
            is_delete: row.is_delete,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct PermissionsRow {
    pub is_edit: bool,
    pub is_delete: bool,
}

#[async_trait]
impl GrantRepository for PgGrantRepository {
    async fn permissions_for(&self, groups: &[String], node_id: &MenuNodeId) -> Result<MenuPermissions, DomainError> {
        let row: PermissionsRow = sqlx::query_as(
            r#"
            SELECT
                COALESCE(BOOL_OR(is_edit), FALSE) AS is_edit,
                COALESCE(BOOL_OR(is_delete), FALSE) AS is_delete
            FROM menu_grants
            WHERE menu_node_id = $1 AND group_name = ANY($2)
            "#
        )
        .bind(node_id)
        .bind(groups)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error loading menu permissions: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(MenuPermissions {
            is_edit: row.is_edit,
            is_delete: row.is_delete,
        })
    }

    async fn can_view_document(&self, groups: &[String], document_id: &Uuid) -> Result<bool, DomainError> {
        sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM document_grants
                WHERE document_id = $1 AND group_name = ANY($2)
            )
            "#
        )
        .bind(document_id)
        .bind(groups)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error checking document view permission: {}", e);
            DomainError::DatabaseError(e.to_string())
        })
    }

    async fn grant(&self, grant: &MenuGrant) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO menu_grants (id, group_name, menu_node_id, is_edit, is_delete, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (group_name, menu_node_id) DO UPDATE SET
                is_edit = EXCLUDED.is_edit,
                is_delete = EXCLUDED.is_delete
            "#
        )
        .bind(grant.id)
        .bind(&grant.group_name)
        .bind(grant.menu_node_id)
        .bind(grant.is_edit)
        .bind(grant.is_delete)
        .bind(grant.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error granting menu permission: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(())
    }

    async fn assign_group_defaults(&self, node_id: &MenuNodeId) -> Result<Vec<MenuGrant>, DomainError> {
        let rows: Vec<MenuGrantRow> = sqlx::query_as(
            r#"
            INSERT INTO menu_grants (id, group_name, menu_node_id, is_edit, is_delete, created_at)
            SELECT gen_random_uuid(), group_name, $1, is_edit, is_delete, NOW()
            FROM group_default_permissions
            WHERE is_edit OR is_delete
            ON CONFLICT (group_name, menu_node_id) DO UPDATE SET
                is_edit = EXCLUDED.is_edit,
                is_delete = EXCLUDED.is_delete
            RETURNING id, group_name, menu_node_id, is_edit, is_delete, created_at
            "#
        )
        .bind(node_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error assigning default grants: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        debug!("Assigned {} default grants to menu node {}", rows.len(), node_id);
        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn remove_for_node(&self, node_id: &MenuNodeId) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM menu_grants WHERE menu_node_id = $1")
            .bind(node_id)
            .execute(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error removing menu grants: {}", e);
                DomainError::DatabaseError(e.to_string())
            })?;

        Ok(())
    }
}
