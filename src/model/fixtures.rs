// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use smallvec::smallvec;

use super::ids::LabelId;
use super::node::LabelNode;
use crate::format::paths::{LabelPath, PathEntry};

fn lid(value: &str) -> LabelId {
    LabelId::new(value).expect("label id")
}

fn entry(id: &str, name: &str) -> PathEntry {
    PathEntry {
        id: lid(id),
        name: name.to_owned(),
    }
}

/// Leaf-first paths describing the small animals taxonomy.
pub(crate) fn animals_paths() -> Vec<LabelPath> {
    vec![
        smallvec![
            entry("3", "Siamese"),
            entry("2", "Cats"),
            entry("1", "Animals"),
        ],
        smallvec![entry("4", "Dogs"), entry("1", "Animals")],
        smallvec![entry("5", "Plants")],
    ]
}

/// The forest `animals_paths` assembles into:
/// `Animals(1) { Cats(2) { Siamese(3) }, Dogs(4) }`, `Plants(5)`.
pub(crate) fn animals_forest() -> Vec<LabelNode> {
    let mut animals = LabelNode::new(lid("1"), "Animals", None);
    let mut cats = LabelNode::new(lid("2"), "Cats", Some(lid("1")));
    cats.children_mut()
        .push(LabelNode::new(lid("3"), "Siamese", Some(lid("2"))));
    animals.children_mut().push(cats);
    animals
        .children_mut()
        .push(LabelNode::new(lid("4"), "Dogs", Some(lid("1"))));

    vec![animals, LabelNode::new(lid("5"), "Plants", None)]
}
