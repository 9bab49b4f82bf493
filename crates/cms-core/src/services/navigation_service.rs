//! Builds the navigation context for a page render.

use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use tracing::warn;

use crate::authority::MenuAuthority;
use crate::domain::{Actor, CurrentRoute, MenuContext, MenuNode, MenuNodeId, MenuType, NavItem, RouteMatcher};
use crate::error::DomainError;
use crate::repositories::MenuRepository;
use crate::tree::MenuTree;

pub struct NavigationService {
    menus: Arc<dyn MenuRepository>,
    authority: Arc<dyn MenuAuthority>,
    matcher: RouteMatcher,
}

impl NavigationService {
    pub fn new(menus: Arc<dyn MenuRepository>, authority: Arc<dyn MenuAuthority>, matcher: RouteMatcher) -> Self {
        Self {
            menus,
            authority,
            matcher,
        }
    }

    pub fn slug_param(&self) -> &str {
        self.matcher.document_slug_param()
    }

    /// Visible main menu and footer with the active path marked.
    pub async fn menu_context(&self, actor: &Actor, route: Option<&CurrentRoute>) -> Result<MenuContext, DomainError> {
        let tree = MenuTree::from_nodes(self.menus.list_all().await?);
        Ok(MenuContext {
            main_menu: self.render_forest(&tree, MenuType::MainMenu, actor, route).await?,
            footer: self.render_forest(&tree, MenuType::Footer, actor, route).await?,
        })
    }

    async fn render_forest(
        &self,
        tree: &MenuTree,
        menu_type: MenuType,
        actor: &Actor,
        route: Option<&CurrentRoute>,
    ) -> Result<Vec<NavItem>, DomainError> {
        let mut items = Vec::new();
        for id in tree.children_of(None, menu_type) {
            let Some(node) = tree.get(&id) else { continue };
            if !self.authority.can_view(actor, node).await? {
                continue;
            }
            items.push(self.annotate_node(tree, node, actor, route, true, 1).await?);
        }
        Ok(items)
    }

    /// Annotates one node: `submenu` holds its visible children, `selected`
    /// is set when the node or a descendant is the rendered page.
    pub async fn annotate(
        &self,
        tree: &MenuTree,
        node_id: &MenuNodeId,
        actor: &Actor,
        route: Option<&CurrentRoute>,
    ) -> Result<NavItem, DomainError> {
        let node = tree.get(node_id).ok_or(DomainError::MenuNodeNotFound(*node_id))?;
        self.annotate_node(tree, node, actor, route, true, 1).await
    }

    fn annotate_node<'a>(
        &'a self,
        tree: &'a MenuTree,
        node: &'a MenuNode,
        actor: &'a Actor,
        route: Option<&'a CurrentRoute>,
        selectable: bool,
        depth: usize,
    ) -> BoxFuture<'a, Result<NavItem, DomainError>> {
        async move {
            let mut item = NavItem::from_node(node);
            if depth > tree.len() {
                warn!("Menu node {} sits in a parent cycle, submenu truncated", node.id);
                return Ok(item);
            }

            let mut child_selected = false;
            for child_id in tree.children_of(Some(node.id), node.menu_type) {
                let Some(child) = tree.get(&child_id) else { continue };
                // hidden children are not descended into
                if !self.authority.can_view(actor, child).await? {
                    continue;
                }
                // first selected child wins; later siblings render unselected
                let child_item = self
                    .annotate_node(tree, child, actor, route, selectable && !child_selected, depth + 1)
                    .await?;
                child_selected |= child_item.selected;
                item.submenu.push(child_item);
            }

            item.selected = child_selected
                || (selectable && route.is_some_and(|r| self.matcher.matches(&node.target, r)));
            Ok(item)
        }
        .boxed()
    }
}
