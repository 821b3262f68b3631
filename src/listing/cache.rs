use std::collections::HashMap;

use crate::models::MovieRecord;

use super::query::MovieQuery;

/// Session-lifetime response cache for the listing controller
///
/// Unbounded; entries live as long as the controller and are never
/// invalidated. An entry always holds exactly the last successful response
/// for its key.
#[derive(Debug, Default)]
pub struct ListingCache {
    entries: HashMap<MovieQuery, Vec<MovieRecord>>,
}

impl ListingCache {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn get(&self, query: &MovieQuery) -> Option<Vec<MovieRecord>> {
        self.entries.get(query).cloned()
    }

    pub fn insert(&mut self, query: MovieQuery, records: Vec<MovieRecord>) {
        self.entries.insert(query, records);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
