// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use dryad::format::paths::{LabelPath, PathEntry};
use dryad::model::{subtree_ids, LabelId, LabelNode};

fn entry(id: String, name: String) -> PathEntry {
    PathEntry {
        id: LabelId::new(id).expect("fixture id"),
        name,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TaxonomyParams {
    /// Number of root labels.
    pub roots: usize,
    /// Children hung under every interior node.
    pub fanout: usize,
    /// Chain length from root to leaf (1 = roots only).
    pub depth: usize,
}

/// One leaf-first path per leaf of a uniform taxonomy. Interior entries
/// repeat across paths exactly like shared ancestors do on the wire.
pub fn taxonomy_paths(params: TaxonomyParams) -> Vec<LabelPath> {
    let mut paths = Vec::new();
    for root in 0..params.roots {
        let root_entry = entry(format!("r{root}"), format!("Root {root}"));
        if params.depth <= 1 {
            paths.push([root_entry].into_iter().collect());
            continue;
        }
        let mut stack = vec![(vec![root_entry], format!("r{root}"))];
        while let Some((chain, prefix)) = stack.pop() {
            if chain.len() == params.depth {
                // Chains are built root-first; the wire format is leaf-first.
                paths.push(chain.iter().rev().cloned().collect());
                continue;
            }
            for child in 0..params.fanout {
                let child_id = format!("{prefix}_{child}");
                let mut next = chain.clone();
                next.push(entry(child_id.clone(), format!("Label {child_id}")));
                stack.push((next, child_id));
            }
        }
    }
    paths
}

#[derive(Debug, Clone, Copy)]
pub enum Case {
    Small,
    MediumShared,
    LargeDeep,
}

pub fn fixture(case: Case) -> Vec<LabelPath> {
    match case {
        Case::Small => taxonomy_paths(TaxonomyParams {
            roots: 4,
            fanout: 3,
            depth: 2,
        }),
        Case::MediumShared => taxonomy_paths(TaxonomyParams {
            roots: 8,
            fanout: 8,
            depth: 3,
        }),
        Case::LargeDeep => taxonomy_paths(TaxonomyParams {
            roots: 4,
            fanout: 3,
            depth: 7,
        }),
    }
}

pub fn checksum_forest(roots: &[LabelNode]) -> u64 {
    let mut acc = 0u64;
    for root in roots {
        for id in subtree_ids(root) {
            acc = acc.wrapping_mul(131).wrapping_add(id.as_str().len() as u64);
            acc = acc.wrapping_add(1);
        }
    }
    acc
}
