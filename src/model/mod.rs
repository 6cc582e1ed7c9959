// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model: label ids and taxonomy nodes.
//!
//! A taxonomy is a forest of `LabelNode`s; every node carries the id of its
//! actual parent (or none for roots) so the remote contract can be replayed.

#[cfg(test)]
pub(crate) mod fixtures;
pub mod ids;
pub mod node;

pub use ids::{Id, IdError, LabelId};
pub use node::{find_node, find_node_mut, subtree_ids, LabelNode};
