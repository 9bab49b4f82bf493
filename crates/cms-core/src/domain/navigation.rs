//! Navigation highlighting types

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use cms_shared::config::NavigationSettings;

use super::menu_node::{MenuNode, MenuNodeId, MenuTarget, MenuType};

/// The resolved route of the page being rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentRoute {
    pub view_name: String,
    #[serde(default)]
    pub kwargs: BTreeMap<String, String>,
}

impl CurrentRoute {
    pub fn new(view_name: impl Into<String>) -> Self {
        Self {
            view_name: view_name.into(),
            kwargs: BTreeMap::new(),
        }
    }

    pub fn with_kwarg(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.kwargs.insert(key.into(), value.into());
        self
    }
}

/// Decides whether a node's own target is the page being rendered.
#[derive(Debug, Clone)]
pub struct RouteMatcher {
    admin_namespace_prefix: String,
    document_slug_param: String,
}

impl RouteMatcher {
    pub fn new(admin_namespace_prefix: impl Into<String>, document_slug_param: impl Into<String>) -> Self {
        Self {
            admin_namespace_prefix: admin_namespace_prefix.into(),
            document_slug_param: document_slug_param.into(),
        }
    }

    /// Route parameter carrying the document slug.
    pub fn document_slug_param(&self) -> &str {
        &self.document_slug_param
    }

    pub fn matches(&self, target: &MenuTarget, route: &CurrentRoute) -> bool {
        match target {
            MenuTarget::Link(link) => {
                if *link == route.view_name {
                    return true;
                }
                // any admin page lights up the single admin entry
                !self.admin_namespace_prefix.is_empty()
                    && link.starts_with(&self.admin_namespace_prefix)
                    && route.view_name.starts_with(&self.admin_namespace_prefix)
            }
            MenuTarget::Document(document) => route
                .kwargs
                .get(&self.document_slug_param)
                .is_some_and(|slug| *slug == document.slug),
            MenuTarget::Folder => false,
        }
    }
}

impl From<&NavigationSettings> for RouteMatcher {
    fn from(settings: &NavigationSettings) -> Self {
        Self::new(
            settings.admin_namespace_prefix.clone(),
            settings.document_slug_param.clone(),
        )
    }
}

impl Default for RouteMatcher {
    fn default() -> Self {
        Self::from(&NavigationSettings::default())
    }
}

/// A visible node annotated for template consumption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavItem {
    pub id: MenuNodeId,
    pub title: String,
    pub menu_type: MenuType,
    pub target: MenuTarget,
    pub selected: bool,
    pub submenu: Vec<NavItem>,
}

impl NavItem {
    pub fn from_node(node: &MenuNode) -> Self {
        Self {
            id: node.id,
            title: node.title.clone(),
            menu_type: node.menu_type,
            target: node.target.clone(),
            selected: false,
            submenu: Vec::new(),
        }
    }

    /// Depth-first search by id.
    pub fn find(&self, id: &MenuNodeId) -> Option<&NavItem> {
        if &self.id == id {
            return Some(self);
        }
        self.submenu.iter().find_map(|child| child.find(id))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuContext {
    pub main_menu: Vec<NavItem>,
    pub footer: Vec<NavItem>,
}
