//! Per-view state machine for a private post
//!
//! ```text
//! Locked --open--> Prompting --submit(ok)--> Unlocked
//!    ^                 |
//!    +--submit(bad)----+
//!    +--dismiss--------+
//! ```
//!
//! `open` skips straight to `Unlocked` when the session already holds the
//! slug. `Unlocked` is terminal.

use std::fmt;
use std::time::Duration;

use super::{SecretGate, UnlockStore};
use crate::error::AccessError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Locked,
    Prompting,
    Unlocked,
}

impl ViewState {
    fn name(self) -> &'static str {
        match self {
            ViewState::Locked => "locked",
            ViewState::Prompting => "prompting",
            ViewState::Unlocked => "unlocked",
        }
    }
}

impl fmt::Display for ViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of submitting a secret
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// Reveal the post once `confirm_after` has passed
    Unlocked { confirm_after: Duration },
    Rejected,
}

/// The viewer closed the prompt; the caller should go back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dismissed;

/// One visitor's view of one private post
#[derive(Debug)]
pub struct PrivatePostView<S: UnlockStore> {
    slug: String,
    store: S,
    state: ViewState,
    confirm_delay: Duration,
}

impl<S: UnlockStore> PrivatePostView<S> {
    pub fn new(slug: impl Into<String>, store: S, confirm_delay: Duration) -> Self {
        Self {
            slug: slug.into(),
            store,
            state: ViewState::Locked,
            confirm_delay,
        }
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn is_unlocked(&self) -> bool {
        self.state == ViewState::Unlocked
    }

    /// Give the store back, ending this view
    pub fn into_store(self) -> S {
        self.store
    }

    fn expect_state(&self, expected: ViewState, action: &'static str) -> Result<(), AccessError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(AccessError::InvalidTransition {
                from: self.state.name(),
                action,
            })
        }
    }

    /// Start viewing: unlock from the session or ask for the secret
    pub fn open(&mut self) -> Result<ViewState, AccessError> {
        self.expect_state(ViewState::Locked, "open")?;

        self.state = if self.store.is_unlocked(&self.slug) {
            ViewState::Unlocked
        } else {
            ViewState::Prompting
        };
        Ok(self.state)
    }

    /// Check a candidate secret; success is remembered for the session
    pub fn submit(&mut self, gate: &SecretGate, candidate: &str) -> Result<Submission, AccessError> {
        self.expect_state(ViewState::Prompting, "submit")?;

        if gate.verify(candidate) {
            self.store.mark_unlocked(&self.slug);
            self.state = ViewState::Unlocked;
            tracing::debug!("Unlocked private post '{}'", self.slug);
            Ok(Submission::Unlocked {
                confirm_after: self.confirm_delay,
            })
        } else {
            self.state = ViewState::Locked;
            tracing::debug!("Rejected secret for private post '{}'", self.slug);
            Ok(Submission::Rejected)
        }
    }

    /// Close the prompt without unlocking
    pub fn dismiss(&mut self) -> Result<Dismissed, AccessError> {
        self.expect_state(ViewState::Prompting, "dismiss")?;
        self.state = ViewState::Locked;
        Ok(Dismissed)
    }
}
