//! Interactive session: main menu, search, history and per-creature views.

use anyhow::Result;
use pokedex::format::{capitalize, format_moves, format_stats};
use pokedex::{
    extract_lineage, format_lineage, CatalogCache, Config, EntityRecord, Fetcher, HistoryStore,
};

use crate::console::Console;
use crate::menu::{select_option, CreatureAction, MainAction, Pick};

pub const SEARCH_PROMPT: &str = "Enter the name of the Pokémon you want to find";

/// Owns the catalog cache and search history for one run of the console.
pub struct Session<F> {
    config: Config,
    catalog: CatalogCache<F>,
    history: HistoryStore,
}

impl<F: Fetcher> Session<F> {
    pub fn new(config: Config, fetcher: F) -> Self {
        let catalog = CatalogCache::with_limit(fetcher, config.catalog_limit);
        let history = HistoryStore::new(config.history_file.clone(), config.history_max_entries);
        Self {
            config,
            catalog,
            history,
        }
    }

    pub fn catalog(&self) -> &CatalogCache<F> {
        &self.catalog
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Load persisted history. Call once before [`Session::run`].
    pub fn load_history(&mut self) -> &[String] {
        self.history.load()
    }

    /// Run the main menu until the user exits.
    pub fn run(&mut self, console: &mut dyn Console) -> Result<()> {
        while self.main_menu(console)? {}
        Ok(())
    }

    /// Show the main menu once. Returns `false` when the user chose to exit.
    pub fn main_menu(&mut self, console: &mut dyn Console) -> Result<bool> {
        let action: MainAction =
            select_option(console, "Main Menu", &MainAction::OPTIONS, None, str::parse)?;

        match action {
            MainAction::Search => self.search(console)?,
            MainAction::History => self.browse_history(console)?,
            MainAction::Exit => return Ok(false),
        }
        Ok(true)
    }

    /// Prompt for a name, falling back to suggestions on a miss.
    fn search(&mut self, console: &mut dyn Console) -> Result<()> {
        console.line("");
        let name = console.read_line(SEARCH_PROMPT)?;
        let name = name.trim().to_lowercase();
        if name.is_empty() {
            console.error("You didn't enter a Pokémon name.");
            return Ok(());
        }

        let record = match self.catalog.resolve_by_name(&name) {
            Some(record) => Some(record),
            None => self.pick_suggestion(console, &name)?,
        };

        match record {
            Some(record) => self.creature_menu(console, &record),
            None => Ok(()),
        }
    }

    /// Offer the closest names after a failed lookup. `None` means go back.
    fn pick_suggestion(
        &mut self,
        console: &mut dyn Console,
        name: &str,
    ) -> Result<Option<EntityRecord>> {
        let suggestions = self.catalog.suggest(name, self.config.max_suggestions);
        console.error(&format!("Pokémon '{}' not found.", capitalize(name)));

        let labels: Vec<String> = suggestions.iter().map(|s| capitalize(s)).collect();
        let back_key = Pick::back_key(labels.len());
        let pick = select_option(
            console,
            "Suggestions",
            &Pick::options(&labels),
            Some(back_key.as_str()),
            |key| Pick::parse(key, labels.len()),
        )?;

        let index = match pick {
            Pick::Item(index) => index,
            Pick::Back => {
                console.line("Returning to main menu...");
                return Ok(None);
            }
        };

        // Reported under the name the user typed
        let record = self.catalog.resolve_by_name(&suggestions[index]);
        if record.is_none() {
            console.error(&format!("Pokémon '{}' not found!", name));
        }
        Ok(record)
    }

    fn browse_history(&mut self, console: &mut dyn Console) -> Result<()> {
        let names = self.history.entries().to_vec();
        let labels: Vec<String> = names.iter().map(|n| capitalize(n)).collect();
        let pick = select_option(
            console,
            "Search History",
            &Pick::options(&labels),
            None,
            |key| Pick::parse(key, labels.len()),
        )?;

        let Pick::Item(index) = pick else {
            return Ok(());
        };

        let name = &names[index];
        match self.catalog.resolve_by_name(name) {
            Some(record) => self.creature_menu(console, &record),
            None => {
                console.error(&format!("Pokémon '{}' not found!", name));
                Ok(())
            }
        }
    }

    /// Options for one creature until the user goes back.
    fn creature_menu(&mut self, console: &mut dyn Console, record: &EntityRecord) -> Result<()> {
        let header = format!("Options Menu for {}", capitalize(&record.name));
        loop {
            self.remember(console, &record.name);

            let action: CreatureAction = select_option(
                console,
                &header,
                &CreatureAction::OPTIONS,
                Some(CreatureAction::DEFAULT_KEY),
                str::parse,
            )?;

            match action {
                CreatureAction::Stats => show_stats(console, record),
                CreatureAction::Evolution => self.show_evolution(console, record),
                CreatureAction::Moves => show_moves(console, record),
                CreatureAction::Back => {
                    console.success("Returning to Pokémon selection...");
                    return Ok(());
                }
            }
        }
    }

    /// Record a viewed creature. Write failures are reported, not fatal.
    fn remember(&mut self, console: &mut dyn Console, name: &str) {
        if let Err(e) = self.history.record(name) {
            tracing::warn!("Failed to save history to {:?}: {}", self.history.path(), e);
            console.error(&format!("Could not save search history: {}", e));
        }
    }

    fn show_evolution(&self, console: &mut dyn Console, record: &EntityRecord) {
        let display_name = capitalize(&record.name);
        let Some(chain) = self.catalog.fetch_evolution_chain(record.id) else {
            console.error(&format!("Evolution chain for {} not found.", display_name));
            return;
        };

        console.success(&format!("\n=== Evolution Chain for {} ===", display_name));
        console.line(&format_lineage(&extract_lineage(&chain), &record.name));
    }
}

fn show_stats(console: &mut dyn Console, record: &EntityRecord) {
    console.success(&format!("\nStats for {}:", capitalize(&record.name)));
    console.line(&format_stats(record));
}

fn show_moves(console: &mut dyn Console, record: &EntityRecord) {
    console.success(&format!("\n=== Moves for {} ===", capitalize(&record.name)));
    console.line(&format_moves(record));
}
