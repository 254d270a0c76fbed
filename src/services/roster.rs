// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Friends roster cache.
//!
//! Holds the result of one "fetch my friends" call to the social platform.
//! The platform itself is reached only through [`RosterLoader`] and
//! [`AuthenticationProvider`], so tests substitute stubs.

use crate::error::AppError;
use crate::models::Friend;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::Mutex;

/// Answers whether the local player is signed in to the social platform.
pub trait AuthenticationProvider: Send + Sync {
    fn is_authenticated(&self) -> bool;
}

impl<F> AuthenticationProvider for F
where
    F: Fn() -> bool + Send + Sync,
{
    fn is_authenticated(&self) -> bool {
        self()
    }
}

/// Fetches the player's friends from the social platform.
#[async_trait]
pub trait RosterLoader: Send + Sync {
    async fn load_friends(&self) -> anyhow::Result<Vec<Friend>>;
}

/// Loads a roster exported as a JSON array of friends.
#[derive(Debug, Clone)]
pub struct FileRosterLoader {
    path: PathBuf,
}

impl FileRosterLoader {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl RosterLoader for FileRosterLoader {
    async fn load_friends(&self) -> anyhow::Result<Vec<Friend>> {
        let data = tokio::fs::read(&self.path).await?;
        Ok(serde_json::from_slice(&data)?)
    }
}

/// What a call to [`FriendsRoster::refresh`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Not signed in; roster cleared
    Unauthenticated,
    /// Roster replaced with this many friends
    Loaded(usize),
    /// Loader failed; roster cleared and `last_error` set
    Failed,
    /// Another refresh was running; this call did nothing
    AlreadyInFlight,
}

#[derive(Debug, Default)]
struct RosterState {
    friends: Vec<Friend>,
    is_authenticated: bool,
    is_loading: bool,
    last_error: Option<String>,
}

/// Cached friend list, shareable across tasks.
pub struct FriendsRoster {
    auth: Arc<dyn AuthenticationProvider>,
    loader: Arc<dyn RosterLoader>,
    state: RwLock<RosterState>,
    /// Held for the duration of a refresh
    in_flight: Mutex<()>,
}

impl FriendsRoster {
    pub fn new(auth: Arc<dyn AuthenticationProvider>, loader: Arc<dyn RosterLoader>) -> Self {
        let state = RosterState {
            is_authenticated: auth.is_authenticated(),
            ..RosterState::default()
        };
        Self {
            auth,
            loader,
            state: RwLock::new(state),
            in_flight: Mutex::new(()),
        }
    }

    /// Re-query the authentication state and reload the roster.
    ///
    /// Overlapping calls are not queued: a refresh that starts while another
    /// is running returns [`RefreshOutcome::AlreadyInFlight`] immediately.
    pub async fn refresh(&self) -> RefreshOutcome {
        let Ok(_running) = self.in_flight.try_lock() else {
            tracing::debug!("Roster refresh already in flight, ignoring");
            return RefreshOutcome::AlreadyInFlight;
        };

        if !self.auth.is_authenticated() {
            let mut state = self.write();
            state.is_authenticated = false;
            state.friends.clear();
            tracing::info!("Not authenticated, roster cleared");
            return RefreshOutcome::Unauthenticated;
        }

        let loading = LoadingFlag::raise(&self.state);
        let result = self.loader.load_friends().await;
        drop(loading);

        let mut state = self.write();
        match result {
            Ok(friends) => {
                let count = friends.len();
                state.friends = friends;
                state.is_authenticated = true;
                state.last_error = None;
                tracing::info!(count, "Roster loaded");
                RefreshOutcome::Loaded(count)
            }
            Err(e) => {
                let message = format!("{:#}", e);
                tracing::warn!(
                    error = %AppError::RosterLoad(message.clone()),
                    "Roster refresh failed"
                );
                state.friends.clear();
                state.last_error = Some(message);
                RefreshOutcome::Failed
            }
        }
    }

    /// Friend with `id`, if present.
    pub fn friend(&self, id: &str) -> Option<Friend> {
        self.read().friends.iter().find(|f| f.id == id).cloned()
    }

    pub fn friends(&self) -> Vec<Friend> {
        self.read().friends.clone()
    }

    /// Drop the roster, e.g. on sign-out.
    pub fn clear(&self) {
        self.write().friends.clear();
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_authenticated
    }

    pub fn is_loading(&self) -> bool {
        self.read().is_loading
    }

    pub fn last_error(&self) -> Option<String> {
        self.read().last_error.clone()
    }

    fn read(&self) -> RwLockReadGuard<'_, RosterState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RosterState> {
        write_state(&self.state)
    }
}

fn write_state(state: &RwLock<RosterState>) -> RwLockWriteGuard<'_, RosterState> {
    state.write().unwrap_or_else(PoisonError::into_inner)
}

/// Keeps `is_loading` set while a load is running, including when the
/// refresh future is dropped before the loader finishes.
struct LoadingFlag<'a> {
    state: &'a RwLock<RosterState>,
}

impl<'a> LoadingFlag<'a> {
    fn raise(state: &'a RwLock<RosterState>) -> Self {
        write_state(state).is_loading = true;
        Self { state }
    }
}

impl Drop for LoadingFlag<'_> {
    fn drop(&mut self) {
        write_state(self.state).is_loading = false;
    }
}
