//! The in-memory record store.
//!
//! `RecordStore` owns the canonical, ordered list of records for one
//! dashboard instance. Records are held behind `Arc` so that an update
//! replaces exactly one pointer: every unaffected record keeps its identity,
//! which lets the presentation layer skip re-rendering it.

use std::{collections::HashSet, sync::Arc};

use tracing::debug;

use wardline_contracts::{
    error::{RegistryError, RegistryResult},
    record::Record,
};

/// Ordered collection of records with unique ids.
#[derive(Debug, Clone)]
pub struct RecordStore<R> {
    records: Vec<Arc<R>>,
}

impl<R> Default for RecordStore<R> {
    fn default() -> Self {
        Self { records: Vec::new() }
    }
}

impl<R: Record> RecordStore<R> {
    /// Build a store from a seed list, preserving its order.
    ///
    /// Returns `DuplicateId` if two seed records share an id.
    pub fn from_seed(seed: impl IntoIterator<Item = R>) -> RegistryResult<Self> {
        let mut seen = HashSet::new();
        let mut records = Vec::new();
        for record in seed {
            if !seen.insert(record.id().to_string()) {
                return Err(RegistryError::DuplicateId {
                    id: record.id().to_string(),
                });
            }
            records.push(Arc::new(record));
        }
        debug!(count = records.len(), "record store seeded");
        Ok(Self { records })
    }

    /// All records in insertion order.
    pub fn get_all(&self) -> &[Arc<R>] {
        &self.records
    }

    /// The record with `id`, if present.
    pub fn get(&self, id: &str) -> Option<&Arc<R>> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a record delivered by an external data source.
    pub fn insert(&mut self, record: R) -> RegistryResult<Arc<R>> {
        if self.contains(record.id()) {
            return Err(RegistryError::DuplicateId {
                id: record.id().to_string(),
            });
        }
        let record = Arc::new(record);
        self.records.push(Arc::clone(&record));
        Ok(record)
    }

    /// Apply `patch` to a copy of the record with `id` and swap it in.
    ///
    /// Only the target slot is replaced. Fails with `NotFound` when no record
    /// has that id and with `IdChanged` when the patch rewrites the id; in
    /// both cases the store is unchanged.
    pub fn update_by_id<F>(&mut self, id: &str, patch: F) -> RegistryResult<Arc<R>>
    where
        F: FnOnce(&mut R),
    {
        let slot = self
            .records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| RegistryError::NotFound { id: id.to_string() })?;

        let mut next = R::clone(&**slot);
        patch(&mut next);

        if next.id() != id {
            return Err(RegistryError::IdChanged {
                from: id.to_string(),
                to: next.id().to_string(),
            });
        }

        let next = Arc::new(next);
        *slot = Arc::clone(&next);
        Ok(next)
    }

    /// Remove the record with `id`. Removing an absent id is a no-op.
    ///
    /// Returns true when a record was removed.
    pub fn remove_by_id(&mut self, id: &str) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id() != id);
        let removed = self.records.len() != before;
        if removed {
            debug!(id = %id, "record removed");
        }
        removed
    }

    /// Records accepted by `predicate`, in store order.
    pub fn filter<P>(&self, predicate: P) -> Vec<Arc<R>>
    where
        P: Fn(&R) -> bool,
    {
        self.records
            .iter()
            .filter(|r| predicate(r))
            .cloned()
            .collect()
    }

    /// Iterate over the records by reference.
    pub fn iter(&self) -> impl Iterator<Item = &R> + Clone {
        self.records.iter().map(|r| &**r)
    }
}
