// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mutation orchestration: user actions against the remote service.
//!
//! `LabelTree` is the surface a host embeds. Local operations (selection,
//! expansion, edit start/cancel, rebuild) apply immediately; add, commit, and
//! delete first round-trip the label service and only mutate the tree on
//! success. All state lives behind `RefCell` so operations can overlap on a
//! cooperative (single-threaded) runtime; a per-target pending guard rejects
//! a second add/commit/delete racing the same target instead of letting the
//! calls race the service.
//!
//! Failures never panic past this module: they come back as `MutationError`
//! values for the host to surface as notifications.

use std::cell::{Cell, Ref, RefCell};
use std::collections::BTreeSet;
use std::fmt;

use crate::format::paths::LabelPath;
use crate::model::{LabelId, LabelNode};
use crate::store::{StoreError, TreeSnapshot, TreeState};
use crate::sync::{LabelSyncClient, SyncConfig, SyncError};

/// Name given to a freshly created label until the user commits a rename.
pub const DEFAULT_LABEL_NAME: &str = "default";

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum PendingTarget {
    /// A root-level add (no node id exists yet).
    Roots,
    Node(LabelId),
}

impl PendingTarget {
    fn for_parent(parent_id: Option<&LabelId>) -> Self {
        match parent_id {
            Some(parent_id) => Self::Node(parent_id.clone()),
            None => Self::Roots,
        }
    }

    fn into_node_id(self) -> Option<LabelId> {
        match self {
            Self::Roots => None,
            Self::Node(id) => Some(id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationError {
    /// The tree is readonly; only selection is possible.
    ReadOnly,
    /// Another operation is already in flight for the same target
    /// (`None` = the root list).
    Busy { target: Option<LabelId> },
    /// Commit was requested for a node that is not in edit mode.
    NotEditing { id: LabelId },
    /// Deletion refused: the label is still used by collection entries.
    InUse { id: LabelId, count: u64 },
    /// The target id is not in the forest.
    NotFound { id: LabelId },
    /// The remote call failed; no local state was changed.
    Sync(SyncError),
}

impl fmt::Display for MutationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadOnly => f.write_str("the label tree is readonly"),
            Self::Busy { target: Some(id) } => {
                write!(f, "another operation is already pending for label {id}")
            }
            Self::Busy { target: None } => {
                f.write_str("another operation is already pending for the root list")
            }
            Self::NotEditing { id } => write!(f, "label {id} is not being edited"),
            Self::InUse { id, count } => {
                write!(f, "label {id} still has {count} collection entries and cannot be deleted")
            }
            Self::NotFound { id } => write!(f, "label not found (id={id})"),
            Self::Sync(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for MutationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Sync(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for MutationError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { id } => Self::NotFound { id },
        }
    }
}

impl From<SyncError> for MutationError {
    fn from(err: SyncError) -> Self {
        Self::Sync(err)
    }
}

type SelectionListener = Box<dyn FnMut(Option<&LabelId>)>;

/// Releases a claimed mutation target when the operation finishes, including
/// when the driving future is dropped mid-flight.
struct PendingGuard<'a> {
    pending: &'a RefCell<BTreeSet<PendingTarget>>,
    target: PendingTarget,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.pending.borrow_mut().remove(&self.target);
    }
}

/// The editable label taxonomy a host embeds.
pub struct LabelTree {
    state: RefCell<TreeState>,
    client: LabelSyncClient,
    readonly: Cell<bool>,
    pending: RefCell<BTreeSet<PendingTarget>>,
    on_selection_change: RefCell<Option<SelectionListener>>,
}

impl fmt::Debug for LabelTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LabelTree")
            .field("state", &self.state)
            .field("readonly", &self.readonly.get())
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

impl LabelTree {
    pub fn new(config: SyncConfig) -> Self {
        Self {
            state: RefCell::new(TreeState::new()),
            client: LabelSyncClient::new(config),
            readonly: Cell::new(false),
            pending: RefCell::new(BTreeSet::new()),
            on_selection_change: RefCell::new(None),
        }
    }

    pub fn from_paths(config: SyncConfig, paths: &[LabelPath]) -> Self {
        let tree = Self::new(config);
        tree.state.replace(TreeState::from_paths(paths));
        tree
    }

    pub fn with_readonly(self, readonly: bool) -> Self {
        self.readonly.set(readonly);
        self
    }

    pub fn readonly(&self) -> bool {
        self.readonly.get()
    }

    pub fn set_readonly(&self, readonly: bool) {
        self.readonly.set(readonly);
    }

    /// Borrow the current tree state (read-only). Release the borrow before
    /// issuing mutations.
    pub fn state(&self) -> Ref<'_, TreeState> {
        self.state.borrow()
    }

    pub fn snapshot(&self) -> TreeSnapshot {
        self.state.borrow().snapshot()
    }

    /// Register the selection-change listener. It fires on every selection
    /// transition, including clears caused by deletion or rebuild. The
    /// listener must not call back into the tree.
    pub fn on_selection_change(&self, listener: impl FnMut(Option<&LabelId>) + 'static) {
        *self.on_selection_change.borrow_mut() = Some(Box::new(listener));
    }

    /// Full replace from a fresh label-path list (the host's input changed).
    pub fn set_label_paths(&self, paths: &[LabelPath]) {
        let before = self.selected_id();
        self.state.borrow_mut().rebuild(paths);
        self.notify_selection(before);
    }

    pub fn selected_id(&self) -> Option<LabelId> {
        self.state.borrow().selected_id().cloned()
    }

    /// Set or clear the selection; permitted in readonly mode. Selecting an
    /// unknown id is a silent no-op. Returns whether the selection changed.
    pub fn select(&self, id: Option<&LabelId>) -> bool {
        let before = self.selected_id();
        let changed = self.state.borrow_mut().select(id);
        if changed {
            self.notify_selection(before);
        }
        changed
    }

    /// Externally forced selection from the host (its `selectedValue` input).
    pub fn set_selected_value(&self, id: Option<&LabelId>) -> bool {
        self.select(id)
    }

    pub fn toggle_expand(&self, id: &LabelId) {
        self.state.borrow_mut().toggle_expanded(id);
    }

    pub fn set_expanded(&self, ids: BTreeSet<LabelId>) {
        self.state.borrow_mut().set_expanded(ids);
    }

    /// Enter edit mode for a node; replaces any previous editor. No network
    /// call is involved until the edit is committed.
    pub fn start_edit(&self, id: &LabelId) -> Result<(), MutationError> {
        self.ensure_mutable()?;
        self.state.borrow_mut().set_editing(Some(id))?;
        Ok(())
    }

    /// Abandon an edit: no persistence, no name change. A stale id is a
    /// silent no-op.
    pub fn cancel_edit(&self, id: &LabelId) {
        let mut state = self.state.borrow_mut();
        if state.editing_id() == Some(id) {
            state.set_editing(None).expect("clearing edit mode");
        }
    }

    /// Create a label under `parent_id` (or at the root), then place it in
    /// edit mode, select it, and make sure the parent's children are visible.
    pub async fn add(&self, parent_id: Option<&LabelId>) -> Result<LabelId, MutationError> {
        self.ensure_mutable()?;
        if let Some(parent_id) = parent_id {
            if !self.state.borrow().contains(parent_id) {
                return Err(MutationError::NotFound {
                    id: parent_id.clone(),
                });
            }
        }
        let _guard = self.claim(PendingTarget::for_parent(parent_id))?;

        let record = self
            .client
            .create_or_rename(None, DEFAULT_LABEL_NAME, parent_id)
            .await
            .map_err(|err| {
                tracing::warn!(%err, "label create failed");
                MutationError::Sync(err)
            })?;

        // Resumed: apply against the store's current state, never a pre-call
        // capture. The parent may have vanished while the request ran.
        let new_id = record.id.clone();
        let node = LabelNode::new(new_id.clone(), record.name, parent_id.cloned());
        let before = self.selected_id();
        {
            let mut state = self.state.borrow_mut();
            if let Err(err) = state.insert_node(parent_id, node) {
                tracing::warn!(%err, "created label has no insertion point");
                debug_assert!(false, "insertion parent vanished while the create was in flight");
                return Err(err.into());
            }
            state.set_editing(Some(&new_id)).expect("inserted node exists");
            state.select(Some(&new_id));
            if let Some(parent_id) = parent_id {
                state.expand(parent_id);
            }
        }
        self.notify_selection(before);
        Ok(new_id)
    }

    /// Commit an in-progress edit: persist the new name, adopt the id the
    /// service reports (renames may be issued a fresh id), leave edit mode,
    /// and select the surviving id. On failure the node stays in edit mode.
    pub async fn commit_edit(&self, id: &LabelId, new_name: &str) -> Result<LabelId, MutationError> {
        self.ensure_mutable()?;
        let parent_id = {
            let state = self.state.borrow();
            if state.editing_id() != Some(id) {
                return Err(MutationError::NotEditing { id: id.clone() });
            }
            let Some(node) = state.find(id) else {
                return Err(MutationError::NotFound { id: id.clone() });
            };
            node.parent_id().cloned()
        };
        let _guard = self.claim(PendingTarget::Node(id.clone()))?;

        let record = self
            .client
            .create_or_rename(Some(id), new_name, parent_id.as_ref())
            .await
            .map_err(|err| {
                tracing::warn!(%err, id = id.as_str(), "label rename failed");
                MutationError::Sync(err)
            })?;

        let new_id = (record.id != *id).then(|| record.id.clone());
        let final_id = record.id;
        let before = self.selected_id();
        {
            let mut state = self.state.borrow_mut();
            if let Err(err) = state.rename_node(id, new_name, new_id) {
                tracing::warn!(%err, "renamed label vanished locally");
                debug_assert!(false, "edited node vanished while the rename was in flight");
                return Err(err.into());
            }
            state.set_editing(None).expect("clearing edit mode");
            state.select(Some(&final_id));
        }
        self.notify_selection(before);
        Ok(final_id)
    }

    /// Delete a label and its subtree. Vetoed while the usage count is
    /// non-zero; on remote failure the node stays. A removed selection
    /// (the node itself or any descendant) fires the selection listener.
    pub async fn delete(&self, id: &LabelId) -> Result<(), MutationError> {
        self.ensure_mutable()?;
        if !self.state.borrow().contains(id) {
            return Err(MutationError::NotFound { id: id.clone() });
        }
        let _guard = self.claim(PendingTarget::Node(id.clone()))?;

        let count = self.client.usage_count(id).await?;
        if count > 0 {
            tracing::warn!(id = id.as_str(), count, "delete refused: label still in use");
            return Err(MutationError::InUse {
                id: id.clone(),
                count,
            });
        }

        self.client.delete(id).await.map_err(|err| {
            tracing::warn!(%err, id = id.as_str(), "label delete failed");
            MutationError::Sync(err)
        })?;

        let before = self.selected_id();
        if let Err(err) = self.state.borrow_mut().remove_node(id) {
            tracing::warn!(%err, "deleted label vanished locally");
            debug_assert!(false, "deleted node vanished while the delete was in flight");
            return Err(err.into());
        }
        self.notify_selection(before);
        Ok(())
    }

    fn ensure_mutable(&self) -> Result<(), MutationError> {
        if self.readonly.get() {
            return Err(MutationError::ReadOnly);
        }
        Ok(())
    }

    fn claim(&self, target: PendingTarget) -> Result<PendingGuard<'_>, MutationError> {
        if !self.pending.borrow_mut().insert(target.clone()) {
            return Err(MutationError::Busy {
                target: target.into_node_id(),
            });
        }
        Ok(PendingGuard {
            pending: &self.pending,
            target,
        })
    }

    fn notify_selection(&self, before: Option<LabelId>) {
        let current = self.selected_id();
        if before == current {
            return;
        }
        if let Some(listener) = self.on_selection_change.borrow_mut().as_mut() {
            listener(current.as_ref());
        }
    }
}
