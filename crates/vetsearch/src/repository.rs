//! Repository executors for specifications.
//!
//! [`SearchRepository`] is the seam use cases program against;
//! [`MemoryRepository`] executes specifications over an in-memory
//! collection and is what tests and the CLI use.

use tracing::debug;

use crate::config::SearchConfig;
use crate::error::Result;
use crate::pagination::Page;
use crate::spec::Specification;
use crate::traits::Searchable;

/// A store that can execute specifications.
pub trait SearchRepository<R> {
    /// Returns the window of matching records. Stores resolve the window
    /// through their [`SearchConfig`], so a search always returns a bounded
    /// page.
    fn search(&self, spec: &Specification) -> Result<Page<R>>;

    /// Counts every matching record, ignoring pagination.
    fn count(&self, spec: &Specification) -> Result<usize>;

    /// Returns the first matching record, ignoring pagination.
    fn find_one(&self, spec: &Specification) -> Result<Option<R>>;
}

/// In-memory record store.
#[derive(Debug, Clone)]
pub struct MemoryRepository<R> {
    records: Vec<R>,
    config: SearchConfig,
}

impl<R> Default for MemoryRepository<R> {
    fn default() -> Self {
        MemoryRepository::new(SearchConfig::default())
    }
}

impl<R> MemoryRepository<R> {
    pub fn new(config: SearchConfig) -> Self {
        MemoryRepository {
            records: Vec::new(),
            config,
        }
    }

    pub fn with_records(config: SearchConfig, records: Vec<R>) -> Self {
        MemoryRepository { records, config }
    }

    pub fn insert(&mut self, record: R) {
        self.records.push(record);
    }

    pub fn extend<I: IntoIterator<Item = R>>(&mut self, records: I) {
        self.records.extend(records);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}

impl<R: Searchable + Clone> SearchRepository<R> for MemoryRepository<R> {
    fn search(&self, spec: &Specification) -> Result<Page<R>> {
        let window = self.config.resolve(spec.pagination())?;
        let page = spec.page_with(&self.records, Some(window));
        debug!(
            spec = %spec,
            limit = window.limit,
            offset = window.offset,
            total = page.total,
            returned = page.len(),
            "Search executed"
        );
        Ok(page.map(Clone::clone))
    }

    fn count(&self, spec: &Specification) -> Result<usize> {
        Ok(spec.count(&self.records))
    }

    fn find_one(&self, spec: &Specification) -> Result<Option<R>> {
        Ok(spec.find(&self.records).cloned())
    }
}
