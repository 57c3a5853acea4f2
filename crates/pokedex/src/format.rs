//! Display formatting for records shown in the console.

use crate::EntityRecord;

/// Green
pub const COLOR_SUCCESS: &str = "\x1b[92m";
/// Red
pub const COLOR_ERROR: &str = "\x1b[91m";
pub const COLOR_RESET: &str = "\x1b[0m";

pub const NO_MOVES_MESSAGE: &str = "This Pokémon has no known moves.";

/// Wrap `text` in a color escape sequence.
pub fn paint(text: &str, color: &str) -> String {
    format!("{color}{text}{COLOR_RESET}")
}

/// Upper-case the first character and lower-case the rest.
///
/// ```
/// use pokedex::format::capitalize;
///
/// assert_eq!(capitalize("bulbasaur"), "Bulbasaur");
/// assert_eq!(capitalize("MR-MIME"), "Mr-mime");
/// ```
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Turn a kebab/snake identifier into display words.
///
/// ```
/// use pokedex::format::title_case;
///
/// assert_eq!(title_case("solar-beam"), "Solar Beam");
/// assert_eq!(title_case("swords_dance"), "Swords Dance");
/// ```
pub fn title_case(s: &str) -> String {
    s.split(['-', '_'])
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| title_case(item))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Stat block for a record, one field per line.
pub fn format_stats(record: &EntityRecord) -> String {
    let base_experience = record
        .base_experience
        .map_or_else(|| "unknown".to_string(), |xp| xp.to_string());

    [
        format!("Name: {}", capitalize(&record.name)),
        format!("Height: {}", record.height),
        format!("Weight: {}", record.weight),
        format!("Base Experience: {}", base_experience),
        format!("Types: {}", title_list(&record.types)),
        format!("Abilities: {}", title_list(&record.abilities)),
    ]
    .join("\n")
}

/// Alphabetical move list, one `- Move Name` line per move.
pub fn format_moves(record: &EntityRecord) -> String {
    if record.moves.is_empty() {
        return NO_MOVES_MESSAGE.to_string();
    }

    let mut moves: Vec<&str> = record.moves.iter().map(String::as_str).collect();
    moves.sort_unstable();
    moves
        .into_iter()
        .map(|m| format!("- {}", title_case(m)))
        .collect::<Vec<_>>()
        .join("\n")
}
