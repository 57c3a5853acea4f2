//! Evolution lineage: first-child walk over a chain record.
//!
//! Only the first `evolves_to` entry is followed at each level, so branching
//! families (eevee, tyrogue, ...) show a single primary line.

use crate::format::{capitalize, paint, COLOR_SUCCESS};
use crate::EvolutionChainRecord;

pub const NO_EVOLUTIONS_MESSAGE: &str = "This Pokémon has no known evolutions.";

/// Species names from the base form down the first-child path.
///
/// Empty only when the record carries no root.
#[must_use]
pub fn extract_lineage(record: &EvolutionChainRecord) -> Vec<String> {
    let mut names = Vec::new();
    let mut current = record.chain.as_ref();

    while let Some(link) = current {
        names.push(link.species.clone());
        current = link.evolves_to.first();
    }

    names
}

/// Join capitalized names with `" -> "`, coloring the entry equal to `highlight`.
///
/// `highlight` is compared against the raw names, case-sensitively.
#[must_use]
pub fn format_lineage(names: &[String], highlight: &str) -> String {
    if names.is_empty() {
        return NO_EVOLUTIONS_MESSAGE.to_string();
    }

    names
        .iter()
        .map(|name| {
            let display = capitalize(name);
            if name == highlight {
                paint(&display, COLOR_SUCCESS)
            } else {
                display
            }
        })
        .collect::<Vec<_>>()
        .join(" -> ")
}
