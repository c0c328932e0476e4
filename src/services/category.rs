//! Category registry
//!
//! Name to kind mapping used to classify transactions. Names are unique and
//! compared exactly (case-sensitive) after trimming surrounding whitespace. Transactions hold category names as
//! plain strings, so nothing here ever rewrites a transaction.

use crate::error::FinTrackResult;
use crate::models::{Category, TransactionKind};
use crate::storage::RecordStore;

/// Persisted set of categories
pub struct CategoryRegistry {
    store: Box<dyn RecordStore<Category>>,
    categories: Vec<Category>,
}

impl CategoryRegistry {
    /// Load categories from `store`, seeding the defaults when it is empty
    pub fn load(store: Box<dyn RecordStore<Category>>) -> FinTrackResult<Self> {
        let categories = store.load()?;
        let mut registry = Self { store, categories };

        if registry.categories.is_empty() {
            tracing::info!("category registry is empty; seeding defaults");
            registry.categories = Category::defaults();
            registry.flush()?;
        }

        Ok(registry)
    }

    /// Add a category. Returns false if the name is taken or blank.
    pub fn add(&mut self, name: &str, kind: TransactionKind) -> FinTrackResult<bool> {
        let name = name.trim();
        if name.is_empty() || self.contains(name) {
            return Ok(false);
        }

        self.categories.push(Category::new(name, kind));
        self.flush()?;
        Ok(true)
    }

    /// Remove a category by exact name
    pub fn remove(&mut self, name: &str) -> FinTrackResult<bool> {
        let name = name.trim();
        let before = self.categories.len();
        self.categories.retain(|c| c.name != name);
        if self.categories.len() == before {
            return Ok(false);
        }

        self.flush()?;
        Ok(true)
    }

    /// Rename a category in place and set its kind.
    ///
    /// Returns false if `old_name` does not exist, or if `new_name` differs
    /// from it and is already taken.
    pub fn update(
        &mut self,
        old_name: &str,
        new_name: &str,
        kind: TransactionKind,
    ) -> FinTrackResult<bool> {
        let old_name = old_name.trim();
        let new_name = new_name.trim();
        if new_name.is_empty() || (new_name != old_name && self.contains(new_name)) {
            return Ok(false);
        }

        let Some(category) = self.categories.iter_mut().find(|c| c.name == old_name) else {
            return Ok(false);
        };
        category.name = new_name.to_string();
        category.kind = kind;

        self.flush()?;
        Ok(true)
    }

    pub fn get_kind(&self, name: &str) -> Option<TransactionKind> {
        let name = name.trim();
        self.categories
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.kind)
    }

    pub fn contains(&self, name: &str) -> bool {
        let name = name.trim();
        self.categories.iter().any(|c| c.name == name)
    }

    /// Category names of one kind, in registry order
    pub fn list_by_kind(&self, kind: TransactionKind) -> Vec<&str> {
        self.categories
            .iter()
            .filter(|c| c.kind == kind)
            .map(|c| c.name.as_str())
            .collect()
    }

    pub fn all(&self) -> &[Category] {
        &self.categories
    }

    fn flush(&self) -> FinTrackResult<()> {
        self.store.save(&self.categories)
    }
}
