//! Pitcher identifier resolution.
//!
//! A caller-supplied token is resolved by running an ordered chain of
//! strategies against the store; the first one that finds a pitcher wins.
//! The default chain is numeric id, then exact display name.

use tracing::debug;

use crate::models::Pitcher;
use crate::storage::{PitchStore, StorageError};

/// One way of turning a token into a pitcher.
pub trait ResolutionStrategy: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// `Ok(None)` means this strategy does not match; the chain moves on.
    fn resolve(&self, store: &dyn PitchStore, token: &str) -> Result<Option<Pitcher>, StorageError>;
}

/// Exact match on `player_id`.
///
/// Only canonical integer spellings qualify, so "0657277" or "+657277" fall
/// through to the next strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct ById;

impl ResolutionStrategy for ById {
    fn name(&self) -> &'static str {
        "id"
    }

    fn resolve(&self, store: &dyn PitchStore, token: &str) -> Result<Option<Pitcher>, StorageError> {
        match token.parse::<i64>() {
            Ok(id) if id.to_string() == token => store.pitcher_by_id(id),
            _ => Ok(None),
        }
    }
}

/// Exact, case-sensitive match on `name_use + " " + name_last`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ByDisplayName;

impl ResolutionStrategy for ByDisplayName {
    fn name(&self) -> &'static str {
        "display_name"
    }

    fn resolve(&self, store: &dyn PitchStore, token: &str) -> Result<Option<Pitcher>, StorageError> {
        if token.is_empty() {
            return Ok(None);
        }
        store.pitcher_by_name(token)
    }
}

/// Ordered chain of resolution strategies.
pub struct Resolver {
    strategies: Vec<Box<dyn ResolutionStrategy>>,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(vec![Box::new(ById), Box::new(ByDisplayName)])
    }
}

impl Resolver {
    pub fn new(strategies: Vec<Box<dyn ResolutionStrategy>>) -> Self {
        Self { strategies }
    }

    /// Resolve `token`, short-circuiting on the first match.
    ///
    /// `Ok(None)` is "not found". A store failure in any strategy aborts the chain.
    pub fn resolve(
        &self,
        store: &dyn PitchStore,
        token: &str,
    ) -> Result<Option<Pitcher>, StorageError> {
        for strategy in &self.strategies {
            if let Some(pitcher) = strategy.resolve(store, token)? {
                debug!(token, strategy = strategy.name(), id = pitcher.id, "Resolved pitcher");
                return Ok(Some(pitcher));
            }
        }
        debug!(token, "No strategy resolved pitcher");
        Ok(None)
    }
}
