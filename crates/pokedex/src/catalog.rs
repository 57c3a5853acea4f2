//! In-process memo of the remote catalog.
//!
//! The name -> locator mapping is fetched in one bulk request the first time
//! it is needed and kept for the lifetime of the [`CatalogCache`]. A failed
//! bulk fetch leaves the cache unset so the next call tries again.

use std::collections::HashMap;

use crate::fetch::Fetcher;
use crate::fuzzy::rank_similar;
use crate::{CatalogEntry, EntityRecord, EvolutionChainRecord};

/// Page size for the bulk fetch; large enough to cover every known entry.
pub const DEFAULT_CATALOG_LIMIT: usize = 2000;

/// Name -> locator mapping that preserves the service's ordering.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    by_name: HashMap<String, usize>,
}

impl Catalog {
    /// Build from a list of entries. A repeated name keeps its first
    /// position and takes the later locator.
    pub fn from_entries(entries: impl IntoIterator<Item = CatalogEntry>) -> Self {
        let mut catalog = Self::default();
        for entry in entries {
            match catalog.by_name.get(&entry.name) {
                Some(&pos) => catalog.entries[pos].locator = entry.locator,
                None => {
                    catalog
                        .by_name
                        .insert(entry.name.clone(), catalog.entries.len());
                    catalog.entries.push(entry);
                }
            }
        }
        catalog
    }

    pub fn locator(&self, name: &str) -> Option<&str> {
        self.by_name
            .get(name)
            .map(|&pos| self.entries[pos].locator.as_str())
    }

    /// Names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Up to `limit` names closest to `input` by edit distance.
    pub fn suggest(&self, input: &str, limit: usize) -> Vec<String> {
        rank_similar(input, self.names(), limit)
            .into_iter()
            .map(|s| s.value)
            .collect()
    }
}

/// Lazily built catalog plus on-demand record fetches.
pub struct CatalogCache<F> {
    fetcher: F,
    limit: usize,
    catalog: Option<Catalog>,
}

impl<F: Fetcher> CatalogCache<F> {
    pub fn new(fetcher: F) -> Self {
        Self::with_limit(fetcher, DEFAULT_CATALOG_LIMIT)
    }

    pub fn with_limit(fetcher: F, limit: usize) -> Self {
        Self {
            fetcher,
            limit,
            catalog: None,
        }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Whether the bulk fetch has succeeded.
    pub fn is_built(&self) -> bool {
        self.catalog.is_some()
    }

    /// Return the catalog, performing the bulk fetch on first use.
    ///
    /// Returns `None` when the bulk fetch fails or comes back empty; the
    /// cache stays unset and the next call retries.
    pub fn get_or_build(&mut self) -> Option<&Catalog> {
        if self.catalog.is_none() {
            let entries = self.fetcher.fetch_catalog(self.limit)?;
            if entries.is_empty() {
                tracing::warn!("Catalog fetch returned no entries");
                return None;
            }
            let catalog = Catalog::from_entries(entries);
            tracing::debug!("Cached {} catalog entries", catalog.len());
            self.catalog = Some(catalog);
        }
        self.catalog.as_ref()
    }

    /// Look up `name` and fetch its full record.
    ///
    /// `None` covers both an unknown name and a failed fetch.
    pub fn resolve_by_name(&mut self, name: &str) -> Option<EntityRecord> {
        let locator = self.get_or_build()?.locator(name)?.to_string();
        self.fetcher.fetch_entity(&locator)
    }

    /// Fetch the species for `id`, then the evolution chain it points at.
    pub fn fetch_evolution_chain(&self, id: u32) -> Option<EvolutionChainRecord> {
        let species = self.fetcher.fetch_species(id)?;
        self.fetcher.fetch_chain(&species.evolution_chain)
    }

    /// Closest cached names to `input`; empty when the catalog is unavailable.
    pub fn suggest(&mut self, input: &str, limit: usize) -> Vec<String> {
        self.get_or_build()
            .map(|catalog| catalog.suggest(input, limit))
            .unwrap_or_default()
    }
}
