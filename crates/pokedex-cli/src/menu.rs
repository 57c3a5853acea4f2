//! Keyed menus and the typed actions they produce.

use std::fmt::Display;
use std::str::FromStr;

use anyhow::Result;

use crate::console::Console;

pub const SELECT_PROMPT: &str = "Select an option";
pub const BACK_TO_MAIN_LABEL: &str = "↩ Back to Main Menu";

/// A menu key that maps to no option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Invalid choice. Please try again.")]
pub struct InvalidChoice;

/// Show `options` under `header` until the user enters a key `parse` accepts.
///
/// Input is trimmed and lower-cased; an empty line selects `default` when one
/// is given. Rejected keys print an error and re-prompt.
pub fn select_option<K, L, T, P>(
    console: &mut dyn Console,
    header: &str,
    options: &[(K, L)],
    default: Option<&str>,
    parse: P,
) -> Result<T>
where
    K: Display,
    L: Display,
    P: Fn(&str) -> std::result::Result<T, InvalidChoice>,
{
    loop {
        console.success(&format!("\n=== {} ===", header));
        for (key, label) in options {
            console.line(&format!("[{}] {}", key, label));
        }

        let raw = console.read_line(SELECT_PROMPT)?;
        let mut choice = raw.trim().to_lowercase();
        if choice.is_empty() {
            if let Some(default) = default {
                choice = default.to_string();
            }
        }

        match parse(&choice) {
            Ok(action) => return Ok(action),
            Err(e) => console.error(&e.to_string()),
        }
    }
}

/// Top-level menu actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainAction {
    Search,
    History,
    Exit,
}

impl MainAction {
    pub const OPTIONS: [(&'static str, &'static str); 3] = [
        ("1", "Search for a Pokémon"),
        ("2", "View Search History"),
        ("3", "↩ Exit Application"),
    ];
}

impl FromStr for MainAction {
    type Err = InvalidChoice;

    fn from_str(key: &str) -> std::result::Result<Self, Self::Err> {
        match key {
            "1" => Ok(MainAction::Search),
            "2" => Ok(MainAction::History),
            "3" => Ok(MainAction::Exit),
            _ => Err(InvalidChoice),
        }
    }
}

/// Actions on a selected creature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreatureAction {
    Stats,
    Evolution,
    Moves,
    Back,
}

impl CreatureAction {
    pub const OPTIONS: [(&'static str, &'static str); 4] = [
        ("1", "View Pokémon Stats"),
        ("2", "View Pokémon Evolution Chain"),
        ("3", "View Pokémon Moves"),
        ("4", BACK_TO_MAIN_LABEL),
    ];

    pub const DEFAULT_KEY: &'static str = "4";
}

impl FromStr for CreatureAction {
    type Err = InvalidChoice;

    fn from_str(key: &str) -> std::result::Result<Self, Self::Err> {
        match key {
            "1" => Ok(CreatureAction::Stats),
            "2" => Ok(CreatureAction::Evolution),
            "3" => Ok(CreatureAction::Moves),
            "4" => Ok(CreatureAction::Back),
            _ => Err(InvalidChoice),
        }
    }
}

/// Choice from a numbered list followed by a back entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pick {
    /// Zero-based index into the list
    Item(usize),
    Back,
}

impl Pick {
    /// Keys `1..=len` pick an item, `len + 1` goes back.
    pub fn parse(key: &str, len: usize) -> std::result::Result<Self, InvalidChoice> {
        match key.parse::<usize>() {
            Ok(n) if (1..=len).contains(&n) => Ok(Pick::Item(n - 1)),
            Ok(n) if n == len + 1 => Ok(Pick::Back),
            _ => Err(InvalidChoice),
        }
    }

    /// Key of the back entry for a list of `len` items.
    pub fn back_key(len: usize) -> String {
        (len + 1).to_string()
    }

    /// Numbered options for `labels` plus the back entry.
    pub fn options(labels: &[String]) -> Vec<(String, String)> {
        labels
            .iter()
            .enumerate()
            .map(|(i, label)| ((i + 1).to_string(), label.clone()))
            .chain(std::iter::once((
                Pick::back_key(labels.len()),
                BACK_TO_MAIN_LABEL.to_string(),
            )))
            .collect()
    }
}
