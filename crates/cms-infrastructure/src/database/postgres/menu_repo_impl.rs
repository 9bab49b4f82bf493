// ============================================================================
// CMS Infrastructure - PostgreSQL Menu Repository
// File: crates/cms-infrastructure/src/database/postgres/menu_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{error, info, warn};
use uuid::Uuid;

use cms_core::domain::{DocumentRef, MenuNode, MenuNodeId, MenuTarget, MenuType, Placement};
use cms_core::error::DomainError;
use cms_core::repositories::MenuRepository;

pub struct PgMenuRepository {
    pool: PgPool,
}

impl PgMenuRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct MenuNodeRow {
    pub id: Uuid,
    pub title: String,
    pub link: Option<String>,
    pub document_id: Option<Uuid>,
    pub document_slug: Option<String>,
    pub menu_order: i32,
    pub menu_type: String,
    pub parent_id: Option<Uuid>,
    pub staff_only: bool,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
}

impl From<MenuNodeRow> for MenuNode {
    fn from(row: MenuNodeRow) -> Self {
        let target = match (row.link, row.document_id) {
            (Some(link), _) => MenuTarget::Link(link),
            (None, Some(id)) => MenuTarget::Document(DocumentRef {
                id,
                slug: row.document_slug.unwrap_or_default(),
            }),
            (None, None) => MenuTarget::Folder,
        };
        // the menu_type CHECK constraint only admits the two known values
        let menu_type = MenuType::from_str(&row.menu_type).unwrap_or_else(|| {
            warn!(
                "Menu node {} has unknown menu type {:?}, treated as main menu",
                row.id, row.menu_type
            );
            MenuType::MainMenu
        });

        MenuNode {
            id: row.id,
            title: row.title,
            target,
            order: row.menu_order,
            menu_type,
            parent_id: row.parent_id,
            staff_only: row.staff_only,
            created_at: row.created_at,
            modified_at: row.modified_at,
        }
    }
}

fn target_columns(target: &MenuTarget) -> (Option<&str>, Option<Uuid>, Option<&str>) {
    match target {
        MenuTarget::Folder => (None, None, None),
        MenuTarget::Link(link) => (Some(link.as_str()), None, None),
        MenuTarget::Document(document) => (None, Some(document.id), Some(document.slug.as_str())),
    }
}

#[async_trait]
impl MenuRepository for PgMenuRepository {
    async fn list_all(&self) -> Result<Vec<MenuNode>, DomainError> {
        let rows: Vec<MenuNodeRow> = sqlx::query_as(
            r#"
            SELECT
                id, title, link, document_id, document_slug,
                menu_order, menu_type, parent_id, staff_only,
                created_at, modified_at
            FROM menu_nodes
            "#
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error listing menu nodes: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn find_by_id(&self, id: &MenuNodeId) -> Result<Option<MenuNode>, DomainError> {
        let row: Option<MenuNodeRow> = sqlx::query_as(
            r#"
            SELECT
                id, title, link, document_id, document_slug,
                menu_order, menu_type, parent_id, staff_only,
                created_at, modified_at
            FROM menu_nodes
            WHERE id = $1
            "#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding menu node by id: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn create(&self, node: &MenuNode) -> Result<MenuNode, DomainError> {
        let (link, document_id, document_slug) = target_columns(&node.target);
        let row: MenuNodeRow = sqlx::query_as(
            r#"
            INSERT INTO menu_nodes (
                id, title, link, document_id, document_slug,
                menu_order, menu_type, parent_id, staff_only, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING
                id, title, link, document_id, document_slug,
                menu_order, menu_type, parent_id, staff_only,
                created_at, modified_at
            "#
        )
        .bind(node.id)
        .bind(&node.title)
        .bind(link)
        .bind(document_id)
        .bind(document_slug)
        .bind(node.order)
        .bind(node.menu_type.as_str())
        .bind(node.parent_id)
        .bind(node.staff_only)
        .bind(node.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error creating menu node: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        info!("Menu node created: {}", row.id);
        Ok(row.into())
    }

    async fn update(&self, node: &MenuNode) -> Result<MenuNode, DomainError> {
        let (link, document_id, document_slug) = target_columns(&node.target);
        let row: Option<MenuNodeRow> = sqlx::query_as(
            r#"
            UPDATE menu_nodes SET
                title = $2,
                link = $3,
                document_id = $4,
                document_slug = $5,
                staff_only = $6,
                modified_at = NOW()
            WHERE id = $1
            RETURNING
                id, title, link, document_id, document_slug,
                menu_order, menu_type, parent_id, staff_only,
                created_at, modified_at
            "#
        )
        .bind(node.id)
        .bind(&node.title)
        .bind(link)
        .bind(document_id)
        .bind(document_slug)
        .bind(node.staff_only)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error updating menu node: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        row.map(|r| r.into()).ok_or(DomainError::MenuNodeNotFound(node.id))
    }

    async fn save_placement(&self, placement: &Placement) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e: sqlx::Error| {
            error!("Database error opening placement transaction: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        let result = sqlx::query(
            r#"
            UPDATE menu_nodes SET
                parent_id = $2,
                menu_order = $3,
                menu_type = $4,
                modified_at = NOW()
            WHERE id = $1
            "#
        )
        .bind(placement.node_id)
        .bind(placement.parent_id)
        .bind(placement.order)
        .bind(placement.menu_type.as_str())
        .execute(&mut *tx)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error saving placement of {}: {}", placement.node_id, e);
            DomainError::DatabaseError(e.to_string())
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::MenuNodeNotFound(placement.node_id));
        }

        tx.commit().await.map_err(|e: sqlx::Error| {
            error!("Database error committing placement: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(())
    }

    async fn delete(&self, id: &MenuNodeId) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e: sqlx::Error| {
            error!("Database error opening delete transaction: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        let has_children: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM menu_nodes WHERE parent_id = $1)"
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error checking children of {}: {}", id, e);
            DomainError::DatabaseError(e.to_string())
        })?;

        if has_children {
            return Err(DomainError::MenuHasChildren(*id));
        }

        let result = sqlx::query("DELETE FROM menu_nodes WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error deleting menu node: {}", e);
                DomainError::DatabaseError(e.to_string())
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::MenuNodeNotFound(*id));
        }

        tx.commit().await.map_err(|e: sqlx::Error| {
            error!("Database error committing delete: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        info!("Menu node deleted: {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(link: Option<&str>, document_id: Option<Uuid>) -> MenuNodeRow {
        MenuNodeRow {
            id: Uuid::new_v4(),
            title: "Minutes".to_string(),
            link: link.map(str::to_string),
            document_id,
            document_slug: document_id.map(|_| "minutes".to_string()),
            menu_order: 3,
            menu_type: "footer".to_string(),
            parent_id: None,
            staff_only: true,
            created_at: Utc::now(),
            modified_at: None,
        }
    }

    #[test]
    fn test_row_to_target() {
        let node: MenuNode = row(None, None).into();
        assert!(node.is_folder());
        assert_eq!(node.menu_type, MenuType::Footer);
        assert_eq!(node.order, 3);

        let node: MenuNode = row(Some("minutes:list"), None).into();
        assert_eq!(node.target.link(), Some("minutes:list"));

        let document_id = Uuid::new_v4();
        let node: MenuNode = row(None, Some(document_id)).into();
        assert_eq!(node.target.document().map(|d| d.id), Some(document_id));
        assert_eq!(node.target.document().map(|d| d.slug.as_str()), Some("minutes"));
    }

    #[test]
    fn test_unknown_menu_type_reads_as_main_menu() {
        let mut sidebar = row(Some("polls:index"), None);
        sidebar.menu_type = "sidebar".to_string();

        let node: MenuNode = sidebar.into();
        assert_eq!(node.menu_type, MenuType::MainMenu);
        assert_eq!(node.target.link(), Some("polls:index"));
    }

    #[test]
    fn test_target_columns() {
        assert_eq!(target_columns(&MenuTarget::Folder), (None, None, None));
        let link = MenuTarget::Link("polls:index".to_string());
        assert_eq!(target_columns(&link), (Some("polls:index"), None, None));
    }
}
