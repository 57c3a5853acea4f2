//! Remote catalog collaborators.
//!
//! Every fetch returns `Option`: status 200 is the only success, and any
//! other status, transport failure, or undecodable body collapses to `None`.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::{CatalogEntry, ChainLink, EntityRecord, EvolutionChainRecord, SpeciesRecord};

/// Base URL of the public catalog service
pub const DEFAULT_API_URL: &str = "https://pokeapi.co/api/v2/";

const CATALOG_ENDPOINT: &str = "pokemon";
const SPECIES_ENDPOINT: &str = "pokemon-species";

/// Source of catalog data.
pub trait Fetcher {
    /// Fetch the whole catalog in a single page of up to `limit` entries.
    fn fetch_catalog(&self, limit: usize) -> Option<Vec<CatalogEntry>>;

    /// Fetch the full record at a catalog locator.
    fn fetch_entity(&self, locator: &str) -> Option<EntityRecord>;

    /// Fetch the species record for a creature id.
    fn fetch_species(&self, id: u32) -> Option<SpeciesRecord>;

    /// Fetch an evolution chain by locator.
    fn fetch_chain(&self, locator: &str) -> Option<EvolutionChainRecord>;
}

/// Blocking HTTP fetcher for the public catalog service.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    base_url: String,
    agent: ureq::Agent,
}

impl HttpFetcher {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            agent: ureq::AgentBuilder::new()
                .user_agent(concat!("pokedex/", env!("CARGO_PKG_VERSION")))
                .build(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    /// GET a URL and decode its JSON body, or `None` on any failure.
    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Option<T> {
        match self.agent.get(url).call() {
            Ok(response) => {
                tracing::debug!("GET {} -> {}", url, response.status());
                if response.status() != 200 {
                    return None;
                }
                match response.into_json::<T>() {
                    Ok(body) => Some(body),
                    Err(e) => {
                        tracing::warn!("GET {}: undecodable body: {}", url, e);
                        None
                    }
                }
            }
            Err(ureq::Error::Status(code, _)) => {
                tracing::debug!("GET {} -> {}", url, code);
                None
            }
            Err(ureq::Error::Transport(e)) => {
                tracing::warn!("GET {} failed: {}", url, e);
                None
            }
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

impl Fetcher for HttpFetcher {
    fn fetch_catalog(&self, limit: usize) -> Option<Vec<CatalogEntry>> {
        let url = format!("{}?limit={}", self.endpoint(CATALOG_ENDPOINT), limit);
        let page: CatalogPage = self.get_json(&url)?;
        Some(page.into_entries())
    }

    fn fetch_entity(&self, locator: &str) -> Option<EntityRecord> {
        let wire: WireEntity = self.get_json(locator)?;
        Some(wire.into())
    }

    fn fetch_species(&self, id: u32) -> Option<SpeciesRecord> {
        let url = self.endpoint(&format!("{}/{}", SPECIES_ENDPOINT, id));
        let wire: WireSpecies = self.get_json(&url)?;
        Some(SpeciesRecord {
            evolution_chain: wire.evolution_chain?.url,
        })
    }

    fn fetch_chain(&self, locator: &str) -> Option<EvolutionChainRecord> {
        let wire: WireChain = self.get_json(locator)?;
        Some(wire.into())
    }
}

// Wire shapes of the service. Unknown fields are ignored.

#[derive(Debug, Default, Deserialize)]
struct NamedResource {
    #[serde(default)]
    name: String,
    #[serde(default)]
    url: String,
}

#[derive(Debug, Deserialize)]
struct CatalogPage {
    #[serde(default)]
    results: Vec<NamedResource>,
}

impl CatalogPage {
    fn into_entries(self) -> Vec<CatalogEntry> {
        self.results
            .into_iter()
            .map(|r| CatalogEntry::new(r.name, r.url))
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct TypeSlot {
    #[serde(rename = "type")]
    kind: NamedResource,
}

#[derive(Debug, Deserialize)]
struct AbilitySlot {
    ability: NamedResource,
}

#[derive(Debug, Deserialize)]
struct MoveSlot {
    #[serde(rename = "move")]
    learned: NamedResource,
}

#[derive(Debug, Deserialize)]
struct WireEntity {
    id: u32,
    name: String,
    #[serde(default)]
    height: u32,
    #[serde(default)]
    weight: u32,
    #[serde(default)]
    base_experience: Option<u32>,
    #[serde(default)]
    types: Vec<TypeSlot>,
    #[serde(default)]
    abilities: Vec<AbilitySlot>,
    #[serde(default)]
    moves: Vec<MoveSlot>,
}

impl From<WireEntity> for EntityRecord {
    fn from(wire: WireEntity) -> Self {
        Self {
            id: wire.id,
            name: wire.name,
            height: wire.height,
            weight: wire.weight,
            base_experience: wire.base_experience,
            types: wire.types.into_iter().map(|t| t.kind.name).collect(),
            abilities: wire.abilities.into_iter().map(|a| a.ability.name).collect(),
            moves: wire.moves.into_iter().map(|m| m.learned.name).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct WireSpecies {
    #[serde(default)]
    evolution_chain: Option<NamedResource>,
}

#[derive(Debug, Deserialize)]
struct WireChainLink {
    #[serde(default)]
    species: Option<NamedResource>,
    #[serde(default)]
    evolves_to: Vec<WireChainLink>,
}

impl From<WireChainLink> for ChainLink {
    fn from(wire: WireChainLink) -> Self {
        Self {
            species: wire.species.map(|s| s.name).unwrap_or_default(),
            evolves_to: wire.evolves_to.into_iter().map(ChainLink::from).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct WireChain {
    #[serde(default)]
    chain: Option<WireChainLink>,
}

impl From<WireChain> for EvolutionChainRecord {
    fn from(wire: WireChain) -> Self {
        Self {
            chain: wire.chain.map(ChainLink::from),
        }
    }
}
