// ============================================================================
// CMS Core - Menu Node Entity
// File: crates/cms-core/src/domain/menu_node.rs
// Description: Navigation tree node (main menu and footer)
// ============================================================================

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use cms_shared::constants::MAX_LINK_LENGTH;
use cms_shared::{new_id, EntityId};

use crate::error::DomainError;

pub type MenuNodeId = EntityId;

static ROUTE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+(:[A-Za-z0-9_-]+)*$").expect("valid route name pattern"));

/// Which independent forest a node belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuType {
    MainMenu,
    Footer,
}

impl MenuType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MenuType::MainMenu => "main_menu",
            MenuType::Footer => "footer",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "main_menu" => Some(MenuType::MainMenu),
            "footer" => Some(MenuType::Footer),
            _ => None,
        }
    }
}

/// Reference into the external document store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRef {
    pub id: Uuid,
    pub slug: String,
}

/// What a node points at. A node never carries both a link and a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum MenuTarget {
    /// Only groups children.
    Folder,
    /// Named route, e.g. `polls:index`.
    Link(String),
    Document(DocumentRef),
}

impl MenuTarget {
    /// Builds a target from the two optional form fields.
    pub fn from_parts(link: Option<String>, document: Option<DocumentRef>) -> Result<Self, DomainError> {
        let link = link
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty());

        match (link, document) {
            (Some(_), Some(_)) => Err(DomainError::ConflictingTarget),
            (Some(link), None) => {
                validate_link(&link)?;
                Ok(MenuTarget::Link(link))
            }
            (None, Some(document)) => Ok(MenuTarget::Document(document)),
            (None, None) => Ok(MenuTarget::Folder),
        }
    }

    pub fn link(&self) -> Option<&str> {
        match self {
            MenuTarget::Link(link) => Some(link),
            _ => None,
        }
    }

    pub fn document(&self) -> Option<&DocumentRef> {
        match self {
            MenuTarget::Document(document) => Some(document),
            _ => None,
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, MenuTarget::Folder)
    }
}

fn validate_link(link: &str) -> Result<(), DomainError> {
    if link.len() > MAX_LINK_LENGTH {
        return Err(DomainError::InvalidLink(format!(
            "link longer than {} characters",
            MAX_LINK_LENGTH
        )));
    }
    if !ROUTE_NAME.is_match(link) {
        return Err(DomainError::InvalidLink(link.to_string()));
    }
    Ok(())
}

/// Menu node entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct MenuNode {
    pub id: MenuNodeId,

    #[validate(length(min = 1, max = 255, message = "Title must be between 1 and 255 characters"))]
    pub title: String,

    pub target: MenuTarget,
    pub order: i32,
    pub menu_type: MenuType,
    pub parent_id: Option<MenuNodeId>,
    pub staff_only: bool,

    // Audit fields
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
}

impl MenuNode {
    pub fn new(
        title: String,
        target: MenuTarget,
        menu_type: MenuType,
        parent_id: Option<MenuNodeId>,
        order: i32,
        staff_only: bool,
    ) -> Result<Self, DomainError> {
        let node = Self {
            id: new_id(),
            title: title.trim().to_string(),
            target,
            order,
            menu_type,
            parent_id,
            staff_only,
            created_at: Utc::now(),
            modified_at: None,
        };

        node.validate()?;
        if node.menu_type == MenuType::Footer && node.parent_id.is_some() {
            return Err(DomainError::InvalidParent(
                "footer menu items must not have a parent item".to_string(),
            ));
        }
        Ok(node)
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    pub fn is_folder(&self) -> bool {
        self.target.is_folder()
    }

    pub fn placement(&self) -> Placement {
        Placement {
            node_id: self.id,
            parent_id: self.parent_id,
            order: self.order,
            menu_type: self.menu_type,
        }
    }

    pub fn apply_placement(&mut self, placement: &Placement) {
        self.parent_id = placement.parent_id;
        self.order = placement.order;
        self.menu_type = placement.menu_type;
        self.modified_at = Some(Utc::now());
    }
}

/// The three fields the reorder engine is allowed to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub node_id: MenuNodeId,
    pub parent_id: Option<MenuNodeId>,
    pub order: i32,
    pub menu_type: MenuType,
}
