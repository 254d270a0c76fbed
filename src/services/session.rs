// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Sign-in state fed by the platform identity provider.

use crate::error::AppError;

/// What the identity provider hands back on success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInCredential {
    pub user_id: String,
    pub full_name: Option<String>,
}

/// Receives the outcome of a platform sign-in sheet.
pub trait SignInCompletionHandler {
    fn handle_sign_in(&mut self, result: Result<SignInCredential, AppError>);
}

/// Whether the player is signed in, and as whom.
#[derive(Debug, Clone, Default)]
pub struct AuthSession {
    user_id: Option<String>,
    display_name: Option<String>,
    last_error: Option<String>,
}

impl AuthSession {
    /// Session from a previously stored user id; empty ids count as signed out.
    pub fn restore(stored_user_id: Option<String>) -> Self {
        Self {
            user_id: stored_user_id.filter(|id| !id.is_empty()),
            ..Self::default()
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.user_id.is_some()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Forget the user. Callers also clear the friends roster.
    pub fn sign_out(&mut self) {
        self.user_id = None;
        self.display_name = None;
        tracing::info!("Signed out");
    }
}

impl SignInCompletionHandler for AuthSession {
    fn handle_sign_in(&mut self, result: Result<SignInCredential, AppError>) {
        match result {
            Ok(credential) => {
                if let Some(name) = credential.full_name.as_deref().map(str::trim) {
                    if !name.is_empty() {
                        self.display_name = Some(name.to_string());
                    }
                }
                self.user_id = Some(credential.user_id);
                self.last_error = None;
                tracing::info!("Signed in");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Sign in failed");
                self.last_error = Some(e.to_string());
                self.user_id = None;
            }
        }
    }
}
