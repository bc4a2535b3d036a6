// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Blockboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Blockboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Blockboard: a modular block board on a cell-quantized grid.
//!
//! [`model`] holds the board, [`placement`] the pure layout algorithms, [`interaction`] the
//! reposition/reorder gestures, [`ops`] the revisioned controller that ties them together, and
//! [`store`], [`render`] and [`tui`] the surfaces around it.

pub mod interaction;
pub mod model;
pub mod ops;
pub mod placement;
pub mod render;
pub mod store;
pub mod tui;
