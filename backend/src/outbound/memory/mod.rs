//! In-process adapter implementing every driven port.
//!
//! The server falls back to this store when no database URL is configured,
//! and HTTP tests drive it directly. A single mutex guards all tables so each
//! port call is atomic. Uniqueness, reference checks and cascade deletion
//! follow the PostgreSQL schema so both adapters report the same port errors.

mod repositories;
mod state;

#[cfg(test)]
mod tests;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::{Ingredient, Tag, User};

use self::state::State;

/// Shared in-memory store. Clones share the same tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert or replace a user profile, keyed by id.
    pub fn upsert_user(&self, user: User) {
        self.lock().users.insert(user.id.clone(), user);
    }

    /// Add a tag and return it with its assigned id.
    pub fn add_tag(&self, name: &str, color: &str, slug: &str) -> Tag {
        self.lock().add_tag(name, color, slug)
    }

    /// Add an ingredient and return it with its assigned id.
    pub fn add_ingredient(&self, name: &str, measurement_unit: &str) -> Ingredient {
        self.lock().add_ingredient(name, measurement_unit)
    }
}
