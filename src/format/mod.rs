// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Interchange formats.
//!
//! The remote label service describes the taxonomy as a flat list of label
//! paths; `paths` parses that representation and assembles the forest.

pub mod paths;
