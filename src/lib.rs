// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Dryad — editable label taxonomy engine with remote sync.
//!
//! A host UI feeds in flat label *paths* (root-to-node chains, leaf-first);
//! `format::paths` assembles them into a forest, `store` owns the tree,
//! selection, expansion, and edit state, and `controller` drives
//! add/rename/delete against the remote label service through `sync`.

pub mod controller;
pub mod format;
pub mod model;
pub mod render;
pub mod store;
pub mod sync;
