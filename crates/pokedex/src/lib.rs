//! pokedex: creature catalog lookup core
//!
//! This crate provides the building blocks behind the interactive console:
//! - A lazily built name -> locator cache over the remote catalog
//! - Edit-distance ranking for "did you mean" suggestions
//! - First-child evolution lineage extraction and formatting
//! - A bounded, de-duplicated search history persisted as JSON

pub mod catalog;
pub mod config;
pub mod evolution;
pub mod fetch;
pub mod format;
pub mod fuzzy;
pub mod history;

// Re-export main types
pub use catalog::{Catalog, CatalogCache};
pub use config::Config;
pub use evolution::{extract_lineage, format_lineage};
pub use fetch::{Fetcher, HttpFetcher};
pub use history::HistoryStore;

/// One creature known to the remote catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: String,
    /// Opaque reference used to fetch the full record (a URL for the HTTP service)
    pub locator: String,
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>, locator: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            locator: locator.into(),
        }
    }
}

/// Full record for one creature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityRecord {
    pub id: u32,
    pub name: String,
    pub height: u32,
    pub weight: u32,
    /// Missing for some alternate forms
    pub base_experience: Option<u32>,
    pub types: Vec<String>,
    pub abilities: Vec<String>,
    /// Arrival order; display code sorts
    pub moves: Vec<String>,
}

/// Species record; only the evolution chain reference is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeciesRecord {
    pub evolution_chain: String,
}

/// A node in an evolution chain tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainLink {
    pub species: String,
    pub evolves_to: Vec<ChainLink>,
}

impl ChainLink {
    pub fn new(species: impl Into<String>) -> Self {
        Self {
            species: species.into(),
            evolves_to: Vec::new(),
        }
    }

    /// Append a child evolution and return self (builder style)
    pub fn evolves_to(mut self, child: ChainLink) -> Self {
        self.evolves_to.push(child);
        self
    }
}

/// Evolution chain record. `chain` is the base form, absent if the payload had none.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvolutionChainRecord {
    pub chain: Option<ChainLink>,
}

impl EvolutionChainRecord {
    pub fn new(root: ChainLink) -> Self {
        Self { chain: Some(root) }
    }
}

/// Errors that can escape the core (history persistence only).
#[derive(Debug, thiserror::Error)]
pub enum PokedexError {
    #[error("Failed to write history file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize history: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PokedexError>;
