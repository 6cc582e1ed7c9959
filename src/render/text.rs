// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::LabelNode;
use crate::store::TreeSnapshot;

/// Render a snapshot as an indented outline.
///
/// Interior nodes carry `-` (expanded) or `+` (collapsed, children hidden),
/// leaves carry `.`. The selected node is suffixed with `*`, a node in edit
/// mode with `(editing)`.
pub fn render_outline(snapshot: &TreeSnapshot) -> String {
    let mut lines = Vec::new();
    for root in &snapshot.roots {
        push_node(&mut lines, snapshot, root, 0);
    }
    lines.join("\n")
}

fn push_node(lines: &mut Vec<String>, snapshot: &TreeSnapshot, node: &LabelNode, depth: usize) {
    let expanded = snapshot.expanded_ids.contains(node.id());
    let marker = if node.is_leaf() {
        '.'
    } else if expanded {
        '-'
    } else {
        '+'
    };

    let mut line = format!("{}{} {}", "  ".repeat(depth), marker, node.name());
    if snapshot.selected_id.as_ref() == Some(node.id()) {
        line.push_str(" *");
    }
    if snapshot.editing_id.as_ref() == Some(node.id()) {
        line.push_str(" (editing)");
    }
    lines.push(line);

    if expanded {
        for child in node.children() {
            push_node(lines, snapshot, child, depth + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::render_outline;
    use crate::model::{fixtures, LabelId};
    use crate::store::TreeState;

    fn lid(value: &str) -> LabelId {
        LabelId::new(value).expect("label id")
    }

    #[test]
    fn collapsed_forest_shows_only_roots() {
        let state = TreeState::from_paths(&fixtures::animals_paths());
        assert_eq!(render_outline(&state.snapshot()), "+ Animals\n. Plants");
    }

    #[test]
    fn expansion_reveals_children_level_by_level() {
        let mut state = TreeState::from_paths(&fixtures::animals_paths());
        state.toggle_expanded(&lid("1"));

        assert_eq!(
            render_outline(&state.snapshot()),
            "- Animals\n  + Cats\n  . Dogs\n. Plants"
        );
    }

    #[test]
    fn selection_and_edit_markers() {
        let mut state = TreeState::from_paths(&fixtures::animals_paths());
        state.toggle_expanded(&lid("1"));
        state.toggle_expanded(&lid("2"));
        state.select(Some(&lid("3")));
        state.set_editing(Some(&lid("2"))).expect("edit");

        assert_eq!(
            render_outline(&state.snapshot()),
            "- Animals\n  - Cats (editing)\n    . Siamese *\n  . Dogs\n. Plants"
        );
    }

    #[test]
    fn empty_forest_renders_empty() {
        let state = TreeState::new();
        assert_eq!(render_outline(&state.snapshot()), "");
    }
}
