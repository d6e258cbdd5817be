//! Storage abstraction consumed by [`crate::UserService`].

use anyhow::Error;
use tidytask_core::User;
use tidytask_store_json::JsonStore;

/// Minimal persistence contract: read the whole state, write the whole
/// state. Mutation never happens inside the store.
pub trait UserStore {
    /// Error type bubbled up from the backing store.
    type Error: Into<Error>;

    /// Load the current user state.
    ///
    /// # Errors
    /// Returns a store-specific error when the state cannot be read.
    fn load(&self) -> Result<User, Self::Error>;

    /// Replace the persisted user state.
    ///
    /// # Errors
    /// Returns a store-specific error when persisting fails.
    fn save(&self, user: &User) -> Result<(), Self::Error>;
}

impl UserStore for JsonStore {
    type Error = tidytask_store_json::StoreError;

    fn load(&self) -> Result<User, Self::Error> {
        JsonStore::load(self)
    }

    fn save(&self, user: &User) -> Result<(), Self::Error> {
        JsonStore::save(self, user)
    }
}
