//! Snapshot arena over all menu nodes.
//!
//! Loaded once per operation so tree walks never hit storage and always
//! terminate on a fixed node set.

use std::collections::{HashMap, HashSet};

use crate::domain::{MenuNode, MenuNodeId, MenuType, Placement};

#[derive(Debug, Clone, Default)]
pub struct MenuTree {
    nodes: Vec<MenuNode>,
    index: HashMap<MenuNodeId, usize>,
}

impl MenuTree {
    pub fn from_nodes(nodes: Vec<MenuNode>) -> Self {
        let index = nodes
            .iter()
            .enumerate()
            .map(|(slot, node)| (node.id, slot))
            .collect();
        Self { nodes, index }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: &MenuNodeId) -> Option<&MenuNode> {
        self.index.get(id).map(|&slot| &self.nodes[slot])
    }

    pub fn contains(&self, id: &MenuNodeId) -> bool {
        self.index.contains_key(id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &MenuNode> {
        self.nodes.iter()
    }

    /// Current siblings under `parent` within one forest, in display order.
    pub fn children_of(&self, parent: Option<MenuNodeId>, menu_type: MenuType) -> Vec<MenuNodeId> {
        let mut children: Vec<&MenuNode> = self
            .nodes
            .iter()
            .filter(|n| n.parent_id == parent && n.menu_type == menu_type)
            .collect();
        children.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.title.cmp(&b.title)));
        children.into_iter().map(|n| n.id).collect()
    }

    /// Whether any node, of either menu type, hangs below `id`.
    pub fn has_children(&self, id: &MenuNodeId) -> bool {
        self.nodes.iter().any(|n| n.parent_id.as_ref() == Some(id))
    }

    /// Root nodes are at depth 1. `None` for unknown ids or broken chains.
    pub fn depth(&self, id: &MenuNodeId) -> Option<usize> {
        let mut depth = 0;
        let mut seen = HashSet::new();
        let mut current = Some(*id);
        while let Some(cursor) = current {
            if !seen.insert(cursor) {
                return None;
            }
            let node = self.get(&cursor)?;
            depth += 1;
            current = node.parent_id;
        }
        Some(depth)
    }

    /// True when `ancestor` is `node` itself or lies on its parent chain.
    pub fn is_ancestor_or_self(&self, ancestor: &MenuNodeId, node: &MenuNodeId) -> bool {
        let mut seen = HashSet::new();
        let mut current = Some(*node);
        while let Some(cursor) = current {
            if &cursor == ancestor {
                return true;
            }
            if !seen.insert(cursor) {
                return false;
            }
            current = self.get(&cursor).and_then(|n| n.parent_id);
        }
        false
    }

    /// Applies a placement to the snapshot. Returns false for unknown ids.
    pub fn apply(&mut self, placement: &Placement) -> bool {
        match self.index.get(&placement.node_id) {
            Some(&slot) => {
                self.nodes[slot].apply_placement(placement);
                true
            }
            None => false,
        }
    }

    /// Topmost ancestors of an arbitrary node subset, deduplicated.
    ///
    /// Works frontier by frontier: nodes without a parent are roots, the
    /// parents of everything else form the next frontier. Ids missing from
    /// the snapshot are ignored; a node whose parent is missing counts as a
    /// root. Each node is visited at most once, so corrupted (cyclic) parent
    /// chains still terminate.
    pub fn find_roots<I>(&self, ids: I) -> HashSet<MenuNodeId>
    where
        I: IntoIterator<Item = MenuNodeId>,
    {
        let mut roots = HashSet::new();
        let mut visited = HashSet::new();
        let mut frontier: HashSet<MenuNodeId> = ids.into_iter().collect();

        while !frontier.is_empty() {
            let mut parents = HashSet::new();
            for id in frontier {
                if !visited.insert(id) {
                    continue;
                }
                let Some(node) = self.get(&id) else { continue };
                match node.parent_id {
                    Some(parent) if self.contains(&parent) => {
                        parents.insert(parent);
                    }
                    _ => {
                        roots.insert(id);
                    }
                }
            }
            frontier = parents;
        }

        roots
    }
}
