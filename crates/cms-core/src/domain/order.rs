//! Reorder requests and their outcome

use serde::{Deserialize, Serialize};

use super::menu_node::MenuNodeId;

/// One client-submitted node in the desired arrangement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesiredOrderEntry {
    pub id: MenuNodeId,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DesiredOrderEntry>,
}

impl DesiredOrderEntry {
    pub fn leaf(id: MenuNodeId) -> Self {
        Self { id, children: Vec::new() }
    }

    pub fn with_children(id: MenuNodeId, children: Vec<DesiredOrderEntry>) -> Self {
        Self { id, children }
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    NotFound,
    NotEditable,
    WouldCreateCycle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedEntry {
    pub id: MenuNodeId,
    pub reason: SkipReason,
}

/// What a reorder call did. Skips are expected outcomes, never errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderOutcome {
    pub updated: Vec<MenuNodeId>,
    pub unchanged: Vec<MenuNodeId>,
    pub skipped: Vec<SkippedEntry>,
    /// Parents (None = top level) whose sibling group was only partly editable.
    pub partial_levels: Vec<Option<MenuNodeId>>,
    pub affected_roots: Vec<MenuNodeId>,
}

impl ReorderOutcome {
    pub fn skip(&mut self, id: MenuNodeId, reason: SkipReason) {
        self.skipped.push(SkippedEntry { id, reason });
    }

    pub fn touched(&self) -> impl Iterator<Item = &MenuNodeId> {
        self.updated.iter().chain(self.unchanged.iter())
    }

    pub fn skip_reason(&self, id: &MenuNodeId) -> Option<SkipReason> {
        self.skipped.iter().find(|s| &s.id == id).map(|s| s.reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_children_default_to_empty() {
        let id = Uuid::new_v4();
        let entry: DesiredOrderEntry = serde_json::from_value(serde_json::json!({ "id": id })).unwrap();
        assert_eq!(entry, DesiredOrderEntry::leaf(id));
        assert!(!entry.has_children());
    }
}
