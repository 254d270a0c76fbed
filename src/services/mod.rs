// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod coverage;
pub mod discovery;
pub mod persistence;
pub mod profile;
pub mod roster;
pub mod session;
pub mod store;

pub use coverage::CoverageZoneBuilder;
pub use discovery::{DiscoverySession, LastLocationProvider, MapRegion};
pub use persistence::{MarkerFile, Snapshot};
pub use profile::{ProfileEngine, ProfileProgress};
pub use roster::{
    AuthenticationProvider, FileRosterLoader, FriendsRoster, RefreshOutcome, RosterLoader,
};
pub use session::{AuthSession, SignInCompletionHandler, SignInCredential};
pub use store::MarkerStore;
