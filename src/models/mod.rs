// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod achievement;
pub mod friend;
pub mod language;
pub mod marker;
pub mod zone;

pub use achievement::{Achievement, ACHIEVEMENTS};
pub use friend::{Friend, TreeVisit};
pub use language::AppLanguage;
pub use marker::{Coordinate, TreeMarker};
pub use zone::CoverageZone;
