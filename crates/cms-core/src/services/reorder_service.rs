// ============================================================================
// CMS Core - Menu Reorder Service
// File: crates/cms-core/src/services/reorder_service.rs
// ============================================================================
//! Applies a client-submitted menu arrangement under partial authority.
//!
//! Every entry the actor may edit receives the next value of a zero-based
//! counter in submission order. Entries the actor may not edit are left
//! untouched, so their stored `order` survives even when it now collides
//! with a freshly counted one. Fixed items keep their slot and edited items
//! fill in around them; this is not a merge of the two sequences.

use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use tracing::{debug, info};

use crate::authority::MenuAuthority;
use crate::domain::{
    Actor, DesiredOrderEntry, MenuNodeId, MenuType, Placement, ReorderOutcome, SkipReason,
};
use crate::error::DomainError;
use crate::repositories::MenuRepository;
use crate::tree::MenuTree;

pub struct ReorderService {
    menus: Arc<dyn MenuRepository>,
    authority: Arc<dyn MenuAuthority>,
}

impl ReorderService {
    pub fn new(menus: Arc<dyn MenuRepository>, authority: Arc<dyn MenuAuthority>) -> Self {
        Self { menus, authority }
    }

    /// Rearranges one forest level and everything nested below it.
    ///
    /// Missing ids and nodes the actor may not edit are skipped and reported
    /// in the outcome; the rest of the batch still applies. Only storage
    /// failures abort. `parent_id` is ignored for the footer, which is flat.
    pub async fn reorder(
        &self,
        forest: &[DesiredOrderEntry],
        actor: &Actor,
        menu_type: MenuType,
        parent_id: Option<MenuNodeId>,
    ) -> Result<ReorderOutcome, DomainError> {
        let mut tree = MenuTree::from_nodes(self.menus.list_all().await?);
        let mut outcome = ReorderOutcome::default();

        match menu_type {
            MenuType::MainMenu => {
                self.reorder_main_level(&mut tree, forest, actor, parent_id, &mut outcome)
                    .await?;
            }
            MenuType::Footer => {
                self.note_partial_authority(&tree, actor, None, MenuType::Footer, &mut outcome)
                    .await?;
                self.reorder_footer_level(&mut tree, forest, actor, 0, &mut outcome)
                    .await?;
            }
        }

        let mut roots: Vec<MenuNodeId> = tree.find_roots(outcome.touched().copied()).into_iter().collect();
        roots.sort();
        outcome.affected_roots = roots;

        info!(
            "Reordered {} for {}: {} updated, {} unchanged, {} skipped",
            menu_type.as_str(),
            actor.username,
            outcome.updated.len(),
            outcome.unchanged.len(),
            outcome.skipped.len()
        );

        Ok(outcome)
    }

    pub async fn reorder_main_menu(
        &self,
        forest: &[DesiredOrderEntry],
        actor: &Actor,
    ) -> Result<ReorderOutcome, DomainError> {
        self.reorder(forest, actor, MenuType::MainMenu, None).await
    }

    pub async fn reorder_footer(
        &self,
        forest: &[DesiredOrderEntry],
        actor: &Actor,
    ) -> Result<ReorderOutcome, DomainError> {
        self.reorder(forest, actor, MenuType::Footer, None).await
    }

    fn reorder_main_level<'a>(
        &'a self,
        tree: &'a mut MenuTree,
        entries: &'a [DesiredOrderEntry],
        actor: &'a Actor,
        parent_id: Option<MenuNodeId>,
        outcome: &'a mut ReorderOutcome,
    ) -> BoxFuture<'a, Result<(), DomainError>> {
        async move {
            self.note_partial_authority(tree, actor, parent_id, MenuType::MainMenu, outcome)
                .await?;

            let mut counter: i32 = 0;
            for entry in entries {
                self.place_main_entry(tree, entry, actor, parent_id, &mut counter, outcome)
                    .await?;
                if entry.has_children() {
                    self.reorder_main_level(tree, &entry.children, actor, Some(entry.id), outcome)
                        .await?;
                }
            }
            Ok(())
        }
        .boxed()
    }

    async fn place_main_entry(
        &self,
        tree: &mut MenuTree,
        entry: &DesiredOrderEntry,
        actor: &Actor,
        parent_id: Option<MenuNodeId>,
        counter: &mut i32,
        outcome: &mut ReorderOutcome,
    ) -> Result<(), DomainError> {
        let Some(node) = tree.get(&entry.id) else {
            debug!("Skipping unknown menu node {}", entry.id);
            outcome.skip(entry.id, SkipReason::NotFound);
            return Ok(());
        };
        if !self.authority.can_edit(actor, node).await? {
            debug!("Skipping menu node {}: not editable by {}", entry.id, actor.username);
            outcome.skip(entry.id, SkipReason::NotEditable);
            return Ok(());
        }
        // folders carrying children are ordered but keep their parent
        let relocatable = !(node.is_folder() && entry.has_children());
        let current_parent = node.parent_id;
        let mut new_parent = current_parent;
        if parent_id != current_parent && !relocatable {
            debug!("Folder {} keeps its parent {:?}", entry.id, current_parent);
        } else if parent_id != current_parent && self.may_reparent(tree, actor, parent_id).await? {
            if let Some(target) = parent_id {
                if tree.is_ancestor_or_self(&entry.id, &target) {
                    debug!("Skipping menu node {}: {} lies below it", entry.id, target);
                    outcome.skip(entry.id, SkipReason::WouldCreateCycle);
                    return Ok(());
                }
            }
            new_parent = parent_id;
        }

        let placement = Placement {
            node_id: entry.id,
            parent_id: new_parent,
            order: *counter,
            menu_type: MenuType::MainMenu,
        };
        *counter += 1;
        self.persist(tree, placement, outcome).await
    }

    fn reorder_footer_level<'a>(
        &'a self,
        tree: &'a mut MenuTree,
        entries: &'a [DesiredOrderEntry],
        actor: &'a Actor,
        counter: i32,
        outcome: &'a mut ReorderOutcome,
    ) -> BoxFuture<'a, Result<i32, DomainError>> {
        async move {
            let mut counter = counter;
            for entry in entries {
                match tree.get(&entry.id) {
                    None => {
                        debug!("Skipping unknown footer node {}", entry.id);
                        outcome.skip(entry.id, SkipReason::NotFound);
                    }
                    Some(node) => {
                        if self.authority.can_edit(actor, node).await? {
                            let placement = Placement {
                                node_id: entry.id,
                                parent_id: None,
                                order: counter,
                                menu_type: MenuType::Footer,
                            };
                            counter += 1;
                            self.persist(tree, placement, outcome).await?;
                        } else {
                            debug!("Skipping footer node {}: not editable by {}", entry.id, actor.username);
                            outcome.skip(entry.id, SkipReason::NotEditable);
                        }
                    }
                }
                // nested entries are flattened into the footer, continuing the count
                if entry.has_children() {
                    counter = self
                        .reorder_footer_level(tree, &entry.children, actor, counter, outcome)
                        .await?;
                }
            }
            Ok(counter)
        }
        .boxed()
    }

    /// Superusers may move a node anywhere; everyone else only below a
    /// parent they can edit. Moving to the top level is superuser-only.
    async fn may_reparent(
        &self,
        tree: &MenuTree,
        actor: &Actor,
        parent_id: Option<MenuNodeId>,
    ) -> Result<bool, DomainError> {
        match parent_id {
            None => Ok(actor.is_superuser),
            Some(parent_id) => match tree.get(&parent_id) {
                None => Ok(false),
                Some(_) if actor.is_superuser => Ok(true),
                Some(parent) => self.authority.can_edit(actor, parent).await,
            },
        }
    }

    async fn note_partial_authority(
        &self,
        tree: &MenuTree,
        actor: &Actor,
        parent_id: Option<MenuNodeId>,
        menu_type: MenuType,
        outcome: &mut ReorderOutcome,
    ) -> Result<(), DomainError> {
        let siblings = tree.children_of(parent_id, menu_type);
        let mut editable = 0usize;
        for id in &siblings {
            if let Some(node) = tree.get(id) {
                if self.authority.can_edit(actor, node).await? {
                    editable += 1;
                }
            }
        }
        if editable < siblings.len() {
            debug!(
                "Partial authority below {:?}: {} of {} siblings editable, the rest keep their order",
                parent_id,
                editable,
                siblings.len()
            );
            outcome.partial_levels.push(parent_id);
        }
        Ok(())
    }

    async fn persist(
        &self,
        tree: &mut MenuTree,
        placement: Placement,
        outcome: &mut ReorderOutcome,
    ) -> Result<(), DomainError> {
        let current = tree.get(&placement.node_id).map(|n| n.placement());
        if current == Some(placement) {
            outcome.unchanged.push(placement.node_id);
            return Ok(());
        }

        self.menus.save_placement(&placement).await?;
        tree.apply(&placement);
        debug!(
            "Placed menu node {} at order {} under {:?}",
            placement.node_id, placement.order, placement.parent_id
        );
        outcome.updated.push(placement.node_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authority::MockMenuAuthority;
    use crate::domain::{DocumentRef, MenuNode, MenuTarget};
    use crate::repositories::InMemoryMenuRepository;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use uuid::Uuid;

    /// Editable iff the node id is in the set; everything is visible.
    struct TableAuthority {
        editable: HashSet<MenuNodeId>,
    }

    #[async_trait]
    impl MenuAuthority for TableAuthority {
        async fn can_view(&self, _actor: &Actor, _node: &MenuNode) -> Result<bool, DomainError> {
            Ok(true)
        }

        async fn can_edit(&self, actor: &Actor, node: &MenuNode) -> Result<bool, DomainError> {
            Ok(actor.is_superuser || self.editable.contains(&node.id))
        }
    }

    fn member() -> Actor {
        Actor {
            id: Uuid::new_v4(),
            username: "member".to_string(),
            is_superuser: false,
            is_staff: true,
            can_change_menu_items: true,
            groups: vec!["Staff".to_string()],
        }
    }

    fn superuser() -> Actor {
        Actor {
            username: "root".to_string(),
            is_superuser: true,
            ..member()
        }
    }

    fn link(title: &str, menu_type: MenuType, parent: Option<MenuNodeId>, order: i32) -> MenuNode {
        let mut node = MenuNode::new(
            title.to_string(),
            MenuTarget::Link(format!("page_{}", title)),
            menu_type,
            None,
            order,
            false,
        )
        .unwrap();
        node.parent_id = parent;
        node
    }

    fn document(title: &str, parent: Option<MenuNodeId>, order: i32) -> MenuNode {
        let mut node = MenuNode::new(
            title.to_string(),
            MenuTarget::Document(DocumentRef { id: Uuid::new_v4(), slug: title.to_string() }),
            MenuType::MainMenu,
            None,
            order,
            false,
        )
        .unwrap();
        node.parent_id = parent;
        node
    }

    fn folder(title: &str, order: i32) -> MenuNode {
        MenuNode::new(title.to_string(), MenuTarget::Folder, MenuType::MainMenu, None, order, false).unwrap()
    }

    fn service(repo: &Arc<InMemoryMenuRepository>, editable: &[MenuNodeId]) -> ReorderService {
        ReorderService::new(
            repo.clone(),
            Arc::new(TableAuthority { editable: editable.iter().copied().collect() }),
        )
    }

    fn leaves(ids: &[MenuNodeId]) -> Vec<DesiredOrderEntry> {
        ids.iter().map(|id| DesiredOrderEntry::leaf(*id)).collect()
    }

    #[tokio::test]
    async fn test_full_authority_reorders_in_submission_order() {
        let a = link("a", MenuType::MainMenu, None, 0);
        let b = link("b", MenuType::MainMenu, None, 1);
        let c = link("c", MenuType::MainMenu, None, 2);
        let repo = Arc::new(InMemoryMenuRepository::with_nodes([a.clone(), b.clone(), c.clone()]));

        let outcome = service(&repo, &[])
            .reorder_main_menu(&leaves(&[c.id, a.id, b.id]), &superuser())
            .await
            .unwrap();

        assert_eq!(repo.get(&c.id).unwrap().order, 0);
        assert_eq!(repo.get(&a.id).unwrap().order, 1);
        assert_eq!(repo.get(&b.id).unwrap().order, 2);
        assert!(outcome.skipped.is_empty());
        assert!(outcome.partial_levels.is_empty());
    }

    #[tokio::test]
    async fn test_resubmitting_same_order_changes_nothing() {
        let root = folder("root", 0);
        let a = link("a", MenuType::MainMenu, Some(root.id), 3);
        let b = link("b", MenuType::MainMenu, Some(root.id), 7);
        let repo = Arc::new(InMemoryMenuRepository::with_nodes([root.clone(), a.clone(), b.clone()]));
        let svc = service(&repo, &[]);
        let forest = vec![DesiredOrderEntry::with_children(root.id, leaves(&[b.id, a.id]))];

        svc.reorder_main_menu(&forest, &superuser()).await.unwrap();
        let writes = repo.placement_writes();
        let before: Vec<_> = [root.id, a.id, b.id].iter().map(|id| repo.get(id).unwrap().placement()).collect();

        let outcome = svc.reorder_main_menu(&forest, &superuser()).await.unwrap();
        let after: Vec<_> = [root.id, a.id, b.id].iter().map(|id| repo.get(id).unwrap().placement()).collect();

        assert_eq!(before, after);
        assert_eq!(repo.placement_writes(), writes);
        assert!(outcome.updated.is_empty());
    }

    #[tokio::test]
    async fn test_partial_authority_preserves_foreign_order() {
        let a = link("a", MenuType::MainMenu, None, 0);
        let b = link("b", MenuType::MainMenu, None, 1);
        let c = link("c", MenuType::MainMenu, None, 2);
        let repo = Arc::new(InMemoryMenuRepository::with_nodes([a.clone(), b.clone(), c.clone()]));

        let outcome = service(&repo, &[a.id, c.id])
            .reorder_main_menu(&leaves(&[c.id, a.id]), &member())
            .await
            .unwrap();

        assert_eq!(repo.get(&b.id).unwrap().order, 1);
        assert_eq!(repo.get(&c.id).unwrap().order, 0);
        assert_eq!(repo.get(&a.id).unwrap().order, 1);
        assert_eq!(outcome.partial_levels, vec![None]);
    }

    #[tokio::test]
    async fn test_submitted_but_foreign_node_is_skipped() {
        let a = link("a", MenuType::MainMenu, None, 0);
        let b = link("b", MenuType::MainMenu, None, 5);
        let repo = Arc::new(InMemoryMenuRepository::with_nodes([a.clone(), b.clone()]));

        let outcome = service(&repo, &[a.id])
            .reorder_main_menu(&leaves(&[b.id, a.id]), &member())
            .await
            .unwrap();

        assert_eq!(repo.get(&b.id).unwrap().order, 5);
        assert_eq!(repo.get(&a.id).unwrap().order, 0);
        assert_eq!(outcome.skip_reason(&b.id), Some(SkipReason::NotEditable));
    }

    #[tokio::test]
    async fn test_missing_id_does_not_abort_batch() {
        let a = link("a", MenuType::MainMenu, None, 4);
        let repo = Arc::new(InMemoryMenuRepository::with_nodes([a.clone()]));
        let ghost = Uuid::new_v4();

        let outcome = service(&repo, &[])
            .reorder_main_menu(&leaves(&[ghost, a.id]), &superuser())
            .await
            .unwrap();

        assert_eq!(repo.get(&a.id).unwrap().order, 0);
        assert_eq!(outcome.skip_reason(&ghost), Some(SkipReason::NotFound));
        assert_eq!(outcome.updated, vec![a.id]);
    }

    #[tokio::test]
    async fn test_superuser_moves_item_under_new_parent() {
        let left = folder("left", 0);
        let right = folder("right", 1);
        let item = link("item", MenuType::MainMenu, Some(left.id), 0);
        let repo = Arc::new(InMemoryMenuRepository::with_nodes([left.clone(), right.clone(), item.clone()]));

        let forest = vec![
            DesiredOrderEntry::leaf(left.id),
            DesiredOrderEntry::with_children(right.id, leaves(&[item.id])),
        ];
        let outcome = service(&repo, &[]).reorder_main_menu(&forest, &superuser()).await.unwrap();

        assert_eq!(repo.get(&item.id).unwrap().parent_id, Some(right.id));
        assert_eq!(repo.get(&item.id).unwrap().order, 0);
        assert_eq!(repo.get(&right.id).unwrap().order, 1);
        assert!(outcome.skipped.is_empty());
        assert_eq!(outcome.unchanged, vec![left.id, right.id]);
        assert_eq!(outcome.affected_roots, {
            let mut roots = vec![left.id, right.id];
            roots.sort();
            roots
        });
    }

    #[tokio::test]
    async fn test_folders_and_leaves_get_contiguous_orders() {
        let a = folder("a", 0);
        let b = folder("b", 1);
        let c = link("c", MenuType::MainMenu, None, 2);
        let a1 = link("a1", MenuType::MainMenu, Some(a.id), 0);
        let b1 = link("b1", MenuType::MainMenu, Some(b.id), 0);
        let repo = Arc::new(InMemoryMenuRepository::with_nodes([
            a.clone(),
            b.clone(),
            c.clone(),
            a1.clone(),
            b1.clone(),
        ]));

        let forest = vec![
            DesiredOrderEntry::leaf(c.id),
            DesiredOrderEntry::with_children(b.id, leaves(&[b1.id])),
            DesiredOrderEntry::with_children(a.id, leaves(&[a1.id])),
        ];
        let outcome = service(&repo, &[]).reorder_main_menu(&forest, &superuser()).await.unwrap();

        let orders: Vec<_> = [c.id, b.id, a.id].iter().map(|id| repo.get(id).unwrap().order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
        for (folder, child) in [(&a, &a1), (&b, &b1)] {
            assert_eq!(repo.get(&folder.id).unwrap().parent_id, None);
            let stored = repo.get(&child.id).unwrap();
            assert_eq!(stored.parent_id, Some(folder.id));
            assert_eq!(stored.order, 0);
        }
        assert!(outcome.skipped.is_empty());
    }

    #[tokio::test]
    async fn test_nested_folder_is_ordered_but_not_reparented() {
        let outer = folder("outer", 0);
        let inner = folder("inner", 1);
        let leaf = link("leaf", MenuType::MainMenu, None, 2);
        let child = link("child", MenuType::MainMenu, Some(inner.id), 0);
        let repo = Arc::new(InMemoryMenuRepository::with_nodes([
            outer.clone(),
            inner.clone(),
            leaf.clone(),
            child.clone(),
        ]));

        // inner is submitted below outer but carries its own children
        let forest = vec![DesiredOrderEntry::with_children(
            outer.id,
            vec![
                DesiredOrderEntry::leaf(leaf.id),
                DesiredOrderEntry::with_children(inner.id, leaves(&[child.id])),
            ],
        )];
        service(&repo, &[]).reorder_main_menu(&forest, &superuser()).await.unwrap();

        let stored = repo.get(&inner.id).unwrap();
        assert_eq!(stored.parent_id, None);
        assert_eq!(stored.order, 1);
        assert_eq!(repo.get(&leaf.id).unwrap().parent_id, Some(outer.id));
        assert_eq!(repo.get(&leaf.id).unwrap().order, 0);
        assert_eq!(repo.get(&child.id).unwrap().parent_id, Some(inner.id));
    }

    #[tokio::test]
    async fn test_member_cannot_move_into_foreign_parent() {
        let mine = document("mine", None, 0);
        let foreign = document("foreign", None, 1);
        let item = link("item", MenuType::MainMenu, Some(mine.id), 0);
        let repo = Arc::new(InMemoryMenuRepository::with_nodes([mine.clone(), foreign.clone(), item.clone()]));

        let forest = vec![
            DesiredOrderEntry::leaf(mine.id),
            DesiredOrderEntry::with_children(foreign.id, leaves(&[item.id])),
        ];
        service(&repo, &[mine.id, item.id])
            .reorder_main_menu(&forest, &member())
            .await
            .unwrap();

        let stored = repo.get(&item.id).unwrap();
        assert_eq!(stored.parent_id, Some(mine.id));
        assert_eq!(stored.order, 0);
    }

    #[tokio::test]
    async fn test_member_may_move_into_editable_parent() {
        let source = document("source", None, 0);
        let target = document("target", None, 1);
        let item = link("item", MenuType::MainMenu, Some(source.id), 0);
        let repo = Arc::new(InMemoryMenuRepository::with_nodes([source.clone(), target.clone(), item.clone()]));

        let forest = vec![
            DesiredOrderEntry::leaf(source.id),
            DesiredOrderEntry::with_children(target.id, leaves(&[item.id])),
        ];
        service(&repo, &[source.id, target.id, item.id])
            .reorder_main_menu(&forest, &member())
            .await
            .unwrap();

        assert_eq!(repo.get(&item.id).unwrap().parent_id, Some(target.id));
    }

    #[tokio::test]
    async fn test_member_cannot_promote_to_top_level() {
        let parent = document("parent", None, 0);
        let item = link("item", MenuType::MainMenu, Some(parent.id), 0);
        let repo = Arc::new(InMemoryMenuRepository::with_nodes([parent.clone(), item.clone()]));

        service(&repo, &[parent.id, item.id])
            .reorder_main_menu(&leaves(&[item.id, parent.id]), &member())
            .await
            .unwrap();

        assert_eq!(repo.get(&item.id).unwrap().parent_id, Some(parent.id));
    }

    #[tokio::test]
    async fn test_cycle_is_refused() {
        let outer = document("outer", None, 0);
        let inner = document("inner", Some(outer.id), 0);
        let repo = Arc::new(InMemoryMenuRepository::with_nodes([outer.clone(), inner.clone()]));

        // outer submitted as a child of its own child
        let outcome = service(&repo, &[])
            .reorder(&leaves(&[outer.id]), &superuser(), MenuType::MainMenu, Some(inner.id))
            .await
            .unwrap();

        assert_eq!(outcome.skip_reason(&outer.id), Some(SkipReason::WouldCreateCycle));
        assert_eq!(repo.get(&outer.id).unwrap().parent_id, None);
        assert_eq!(repo.get(&inner.id).unwrap().parent_id, Some(outer.id));
        assert_eq!(repo.placement_writes(), 0);
    }

    #[tokio::test]
    async fn test_footer_item_moves_into_main_menu() {
        let main = link("main", MenuType::MainMenu, None, 0);
        let footer = link("imprint", MenuType::Footer, None, 0);
        let repo = Arc::new(InMemoryMenuRepository::with_nodes([main.clone(), footer.clone()]));

        service(&repo, &[])
            .reorder_main_menu(&leaves(&[main.id, footer.id]), &superuser())
            .await
            .unwrap();

        let moved = repo.get(&footer.id).unwrap();
        assert_eq!(moved.menu_type, MenuType::MainMenu);
        assert_eq!(moved.order, 1);
    }

    #[tokio::test]
    async fn test_footer_flattens_nested_entries() {
        let imprint = link("imprint", MenuType::Footer, None, 0);
        let parent = document("parent", None, 0);
        let child = link("child", MenuType::MainMenu, Some(parent.id), 0);
        let contact = link("contact", MenuType::Footer, None, 1);
        let repo = Arc::new(InMemoryMenuRepository::with_nodes([
            imprint.clone(),
            parent.clone(),
            child.clone(),
            contact.clone(),
        ]));

        let forest = vec![
            DesiredOrderEntry::leaf(contact.id),
            DesiredOrderEntry::with_children(parent.id, leaves(&[child.id])),
            DesiredOrderEntry::leaf(imprint.id),
        ];
        service(&repo, &[]).reorder_footer(&forest, &superuser()).await.unwrap();

        for (id, order) in [(contact.id, 0), (parent.id, 1), (child.id, 2), (imprint.id, 3)] {
            let node = repo.get(&id).unwrap();
            assert_eq!(node.order, order);
            assert_eq!(node.parent_id, None);
            assert_eq!(node.menu_type, MenuType::Footer);
        }
    }

    #[tokio::test]
    async fn test_footer_rechecks_edit_authority_per_node() {
        let imprint = link("imprint", MenuType::Footer, None, 3);
        let contact = link("contact", MenuType::Footer, None, 4);
        let repo = Arc::new(InMemoryMenuRepository::with_nodes([imprint.clone(), contact.clone()]));

        let mut authority = MockMenuAuthority::new();
        let editable = contact.id;
        authority
            .expect_can_edit()
            .returning(move |_, node| Ok(node.id == editable));
        let svc = ReorderService::new(repo.clone(), Arc::new(authority));

        let outcome = svc
            .reorder_footer(&leaves(&[imprint.id, contact.id]), &member())
            .await
            .unwrap();

        assert_eq!(repo.get(&imprint.id).unwrap().order, 3);
        assert_eq!(repo.get(&contact.id).unwrap().order, 0);
        assert_eq!(outcome.skip_reason(&imprint.id), Some(SkipReason::NotEditable));
        assert_eq!(outcome.partial_levels, vec![None]);
    }

    #[tokio::test]
    async fn test_storage_is_never_asked_about_denied_nodes() {
        let a = link("a", MenuType::MainMenu, None, 0);
        let repo = Arc::new(InMemoryMenuRepository::with_nodes([a.clone()]));

        let mut authority = MockMenuAuthority::new();
        authority.expect_can_edit().returning(|_, _| Ok(false));
        let svc = ReorderService::new(repo.clone(), Arc::new(authority));

        svc.reorder_main_menu(&leaves(&[a.id]), &member()).await.unwrap();
        assert_eq!(repo.placement_writes(), 0);
    }
}
