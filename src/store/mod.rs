// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Tree state: the forest plus selection, expansion, and edit state.
//!
//! Every state-changing operation bumps a revision counter so observers can
//! detect change cheaply; `snapshot` hands out an immutable copy for
//! rendering. Dependent state is recomputed inside the store itself: removing
//! a subtree clears any selection, expansion, or edit entry that pointed into
//! it, and an id-changing rename rewrites stale references.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::format::paths::{assemble_forest, LabelPath};
use crate::model::{find_node, find_node_mut, subtree_ids, LabelId, LabelNode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    NotFound { id: LabelId },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { id } => write!(f, "label not found (id={id})"),
        }
    }
}

impl std::error::Error for StoreError {}

/// An immutable view of the tree for rendering and change detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeSnapshot {
    pub roots: Vec<LabelNode>,
    pub selected_id: Option<LabelId>,
    pub expanded_ids: BTreeSet<LabelId>,
    pub editing_id: Option<LabelId>,
    pub rev: u64,
}

/// The mutable tree state the controller runs against.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TreeState {
    roots: Vec<LabelNode>,
    selected_id: Option<LabelId>,
    expanded_ids: BTreeSet<LabelId>,
    editing_id: Option<LabelId>,
    rev: u64,
}

impl TreeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_paths(paths: &[LabelPath]) -> Self {
        Self {
            roots: assemble_forest(paths),
            ..Self::default()
        }
    }

    pub fn roots(&self) -> &[LabelNode] {
        &self.roots
    }

    pub fn selected_id(&self) -> Option<&LabelId> {
        self.selected_id.as_ref()
    }

    pub fn expanded_ids(&self) -> &BTreeSet<LabelId> {
        &self.expanded_ids
    }

    pub fn editing_id(&self) -> Option<&LabelId> {
        self.editing_id.as_ref()
    }

    pub fn rev(&self) -> u64 {
        self.rev
    }

    pub fn find(&self, id: &LabelId) -> Option<&LabelNode> {
        find_node(&self.roots, id)
    }

    pub fn contains(&self, id: &LabelId) -> bool {
        self.find(id).is_some()
    }

    pub fn is_expanded(&self, id: &LabelId) -> bool {
        self.expanded_ids.contains(id)
    }

    pub fn snapshot(&self) -> TreeSnapshot {
        TreeSnapshot {
            roots: self.roots.clone(),
            selected_id: self.selected_id.clone(),
            expanded_ids: self.expanded_ids.clone(),
            editing_id: self.editing_id.clone(),
            rev: self.rev,
        }
    }

    /// Set or clear the selection. Selecting an id that is not in the forest
    /// is a silent no-op. Returns whether the selection changed.
    pub fn select(&mut self, id: Option<&LabelId>) -> bool {
        if let Some(id) = id {
            if !self.contains(id) {
                return false;
            }
        }
        let next = id.cloned();
        if next == self.selected_id {
            return false;
        }
        self.selected_id = next;
        self.bump_rev();
        true
    }

    pub fn toggle_expanded(&mut self, id: &LabelId) {
        if !self.expanded_ids.remove(id) {
            self.expanded_ids.insert(id.clone());
        }
        self.bump_rev();
    }

    /// Ensure a node's children are visible. Returns whether the set changed.
    pub fn expand(&mut self, id: &LabelId) -> bool {
        let inserted = self.expanded_ids.insert(id.clone());
        if inserted {
            self.bump_rev();
        }
        inserted
    }

    /// Replace the expansion set wholesale.
    pub fn set_expanded(&mut self, ids: BTreeSet<LabelId>) {
        if ids != self.expanded_ids {
            self.expanded_ids = ids;
            self.bump_rev();
        }
    }

    /// Append `node` to the root list (no parent) or to the identified
    /// parent's children. The node's parent pointer is rewritten to match its
    /// actual position.
    pub fn insert_node(
        &mut self,
        parent_id: Option<&LabelId>,
        mut node: LabelNode,
    ) -> Result<(), StoreError> {
        node.set_parent_id(parent_id.cloned());
        match parent_id {
            None => self.roots.push(node),
            Some(parent_id) => {
                let Some(parent) = find_node_mut(&mut self.roots, parent_id) else {
                    return Err(StoreError::NotFound {
                        id: parent_id.clone(),
                    });
                };
                parent.children_mut().push(node);
            }
        }
        self.bump_rev();
        Ok(())
    }

    /// Detach a node and its whole subtree, returning it. Selection is
    /// cleared when the selected id was the removed node or any descendant
    /// (breadth-first sweep of the detached subtree); expansion and edit
    /// entries inside the subtree are pruned.
    pub fn remove_node(&mut self, id: &LabelId) -> Result<LabelNode, StoreError> {
        let Some(removed) = detach(&mut self.roots, id) else {
            return Err(StoreError::NotFound { id: id.clone() });
        };

        let removed_ids = subtree_ids(&removed);
        if self
            .selected_id
            .as_ref()
            .is_some_and(|selected| removed_ids.contains(selected))
        {
            self.selected_id = None;
        }
        if self
            .editing_id
            .as_ref()
            .is_some_and(|editing| removed_ids.contains(editing))
        {
            self.editing_id = None;
        }
        for removed_id in &removed_ids {
            self.expanded_ids.remove(removed_id);
        }

        self.bump_rev();
        Ok(removed)
    }

    /// Rename a node, adopting a service-issued replacement id when one was
    /// assigned. An id change cascades to the direct children's parent
    /// pointers and rewrites the old id wherever selection, expansion, or
    /// edit state referenced it.
    pub fn rename_node(
        &mut self,
        id: &LabelId,
        name: &str,
        new_id: Option<LabelId>,
    ) -> Result<(), StoreError> {
        let Some(node) = find_node_mut(&mut self.roots, id) else {
            return Err(StoreError::NotFound { id: id.clone() });
        };

        node.set_name(name);
        if let Some(new_id) = new_id.filter(|candidate| candidate != id) {
            node.set_id(new_id.clone());
            for child in node.children_mut().iter_mut() {
                child.set_parent_id(Some(new_id.clone()));
            }
            if self.selected_id.as_ref() == Some(id) {
                self.selected_id = Some(new_id.clone());
            }
            if self.editing_id.as_ref() == Some(id) {
                self.editing_id = Some(new_id.clone());
            }
            if self.expanded_ids.remove(id) {
                self.expanded_ids.insert(new_id);
            }
        }

        self.bump_rev();
        Ok(())
    }

    /// Enter or leave edit mode. At most one node edits at a time: setting a
    /// new id replaces the previous one.
    pub fn set_editing(&mut self, id: Option<&LabelId>) -> Result<(), StoreError> {
        if let Some(id) = id {
            if !self.contains(id) {
                return Err(StoreError::NotFound { id: id.clone() });
            }
        }
        let next = id.cloned();
        if next != self.editing_id {
            self.editing_id = next;
            self.bump_rev();
        }
        Ok(())
    }

    /// Full replace from a fresh label-path list. Selection survives only if
    /// its id is still present; expansion entries for vanished ids are
    /// dropped; any edit in progress is abandoned.
    pub fn rebuild(&mut self, paths: &[LabelPath]) {
        self.roots = assemble_forest(paths);
        if self
            .selected_id
            .as_ref()
            .is_some_and(|id| find_node(&self.roots, id).is_none())
        {
            self.selected_id = None;
        }
        let roots = &self.roots;
        self.expanded_ids.retain(|id| find_node(roots, id).is_some());
        self.editing_id = None;
        self.bump_rev();
    }

    fn bump_rev(&mut self) {
        self.rev = self.rev.saturating_add(1);
    }
}

fn detach(level: &mut Vec<LabelNode>, id: &LabelId) -> Option<LabelNode> {
    if let Some(index) = level.iter().position(|node| node.id() == id) {
        return Some(level.remove(index));
    }
    for node in level {
        if let Some(removed) = detach(node.children_mut(), id) {
            return Some(removed);
        }
    }
    None
}
