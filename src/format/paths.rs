// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Label paths: the flat wire representation of the taxonomy.
//!
//! Each path is one root→…→node chain supplied *leaf-first* (index 0 is the
//! leaf, the last entry is the root). The forest is the union of all paths
//! with shared ancestors merged into one node per distinct id.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::model::{LabelId, LabelNode};

/// One record inside a label path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathEntry {
    pub id: LabelId,
    pub name: String,
}

/// A root→node chain, leaf-first. Chains are short in practice.
pub type LabelPath = SmallVec<[PathEntry; 4]>;

#[derive(Debug)]
pub enum PathParseError {
    Json(serde_json::Error),
}

impl fmt::Display for PathParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(err) => write!(f, "invalid label path document: {err}"),
        }
    }
}

impl std::error::Error for PathParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
        }
    }
}

/// Parse a JSON array of label paths (an array of leaf-first entry arrays).
pub fn parse_label_paths(text: &str) -> Result<Vec<LabelPath>, PathParseError> {
    serde_json::from_str(text).map_err(PathParseError::Json)
}

/// Assemble the nested forest from flat label paths.
///
/// Every path is walked from its root end. At each level an existing node
/// with the same id is descended into; a missing one is appended and then
/// descended into. Merging is by id only, never by name, and the first path
/// that mentions a node fixes its position (later paths sharing a prefix do
/// not reorder). Parent pointers are derived from the walk itself, so they
/// match the assembled structure by construction.
pub fn assemble_forest(paths: &[LabelPath]) -> Vec<LabelNode> {
    let mut roots = Vec::new();

    for path in paths {
        let mut level = &mut roots;
        let mut parent_id: Option<LabelId> = None;

        for entry in path.iter().rev() {
            let index = match level.iter().position(|node: &LabelNode| node.id() == &entry.id) {
                Some(index) => index,
                None => {
                    level.push(LabelNode::new(
                        entry.id.clone(),
                        entry.name.clone(),
                        parent_id.clone(),
                    ));
                    level.len() - 1
                }
            };
            parent_id = Some(entry.id.clone());
            level = level[index].children_mut();
        }
    }

    roots
}
