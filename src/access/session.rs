//! Session-scoped record of unlocked posts

use std::collections::HashSet;

/// Slug-keyed unlock flags for one browsing session
pub trait UnlockStore {
    fn is_unlocked(&self, slug: &str) -> bool;
    fn mark_unlocked(&mut self, slug: &str);
    /// Forget every unlock, as when the session ends
    fn clear(&mut self);
}

/// In-memory unlock store; dropping it ends the session
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    unlocked: HashSet<String>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.unlocked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.unlocked.is_empty()
    }
}

impl UnlockStore for SessionStore {
    fn is_unlocked(&self, slug: &str) -> bool {
        self.unlocked.contains(slug)
    }

    fn mark_unlocked(&mut self, slug: &str) {
        self.unlocked.insert(slug.to_string());
    }

    fn clear(&mut self) {
        self.unlocked.clear();
    }
}

impl<S: UnlockStore + ?Sized> UnlockStore for &mut S {
    fn is_unlocked(&self, slug: &str) -> bool {
        (**self).is_unlocked(slug)
    }

    fn mark_unlocked(&mut self, slug: &str) {
        (**self).mark_unlocked(slug)
    }

    fn clear(&mut self) {
        (**self).clear()
    }
}
